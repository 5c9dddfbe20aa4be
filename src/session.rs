//! One quiz run: a sampled question subset, a cursor, and the running
//! score. Sessions are plain values; `AppState` owns the map of live ones
//! and mutates them in place as answers arrive.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Question, TopicBank};
use crate::evaluate::{evaluate, MatchMode};

/// Interaction style chosen on the start screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizMode {
  Mcq,
  Written,
}

impl QuizMode {
  /// MCQ selections must match exactly; written input gets typo tolerance.
  pub fn match_mode(self) -> MatchMode {
    match self {
      QuizMode::Mcq => MatchMode::Exact,
      QuizMode::Written => MatchMode::Fuzzy,
    }
  }
}

/// What the user answered on one question, kept for the review screen.
#[derive(Clone, Debug, Serialize)]
pub struct AnswerRecord {
  pub question_id: u32,
  pub prompt: String,
  pub user_answer: String,
  pub canonical: String,
  pub correct: bool,
}

#[derive(Clone, Debug)]
pub struct QuizSession {
  pub id: String,
  pub topic: String,
  pub mode: QuizMode,
  pub questions: Vec<Question>,
  pub index: usize,
  pub score: usize,
  pub answers: Vec<AnswerRecord>,
}

/// End-of-quiz summary for the results screen.
#[derive(Clone, Debug, Serialize)]
pub struct Summary {
  pub correct: usize,
  pub total: usize,
  pub percent: u32,
  pub message: String,
}

impl QuizSession {
  /// Sample a new session from `bank`: filter by selected subtopics, then
  /// draw up to `per_quiz` questions without replacement, shuffled.
  /// Returns `None` when the filtered pool is empty.
  pub fn start<R: Rng>(
    bank: &TopicBank,
    subtopics: &[String],
    mode: QuizMode,
    per_quiz: usize,
    rng: &mut R,
  ) -> Option<Self> {
    let pool = filter_pool(bank, subtopics);
    if pool.is_empty() || per_quiz == 0 {
      return None;
    }
    let mut questions: Vec<Question> = pool
      .choose_multiple(rng, per_quiz.min(pool.len()))
      .map(|q| (*q).clone())
      .collect();
    questions.shuffle(rng);

    Some(Self {
      id: Uuid::new_v4().to_string(),
      topic: bank.topic.clone(),
      mode,
      questions,
      index: 0,
      score: 0,
      answers: Vec::new(),
    })
  }

  pub fn current(&self) -> Option<&Question> {
    self.questions.get(self.index)
  }

  pub fn is_finished(&self) -> bool {
    self.index >= self.questions.len()
  }

  /// Evaluate `answer` against the current question, record it, and
  /// advance the cursor. Returns `None` when the quiz is already over.
  pub fn submit(&mut self, answer: &str) -> Option<AnswerRecord> {
    let question = self.questions.get(self.index)?;
    let correct = evaluate(answer, &question.answer, self.mode.match_mode());
    let record = AnswerRecord {
      question_id: question.id,
      prompt: question.prompt().to_string(),
      user_answer: answer.to_string(),
      canonical: question.answer.clone(),
      correct,
    };
    if correct {
      self.score += 1;
    }
    self.answers.push(record.clone());
    self.index += 1;
    Some(record)
  }

  pub fn summary(&self) -> Summary {
    let total = self.questions.len();
    let percent = if total == 0 {
      0
    } else {
      ((self.score as f64 / total as f64) * 100.0).round() as u32
    };
    Summary {
      correct: self.score,
      total,
      percent,
      message: results_message(percent).to_string(),
    }
  }
}

/// Questions matching the selected subtopics. An empty selection or the
/// "all" sentinel means no filtering.
pub fn filter_pool<'a>(bank: &'a TopicBank, subtopics: &[String]) -> Vec<&'a Question> {
  let all = subtopics.is_empty() || subtopics.iter().any(|s| s == "all");
  bank
    .questions
    .iter()
    .filter(|q| all || subtopics.iter().any(|s| *s == q.subtopic))
    .collect()
}

/// Results-screen grade message (quiz flow tiering).
pub fn results_message(percent: u32) -> &'static str {
  if percent >= 90 {
    "Erinomaista! 🌟"
  } else if percent >= 70 {
    "Hyvä työ! 👍"
  } else if percent >= 50 {
    "Ihan ok! 📚"
  } else {
    "Harjoittele lisää! 💪"
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::seeds::seed_banks;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  fn bank(topic: &str) -> TopicBank {
    seed_banks().into_iter().find(|b| b.topic == topic).unwrap()
  }

  fn rng() -> StdRng {
    StdRng::seed_from_u64(42)
  }

  #[test]
  fn sampling_respects_pool_and_cap() {
    let bank = bank("partitive");
    let s = QuizSession::start(&bank, &[], QuizMode::Mcq, 10, &mut rng()).unwrap();
    assert_eq!(s.questions.len(), bank.questions.len().min(10));

    let s = QuizSession::start(&bank, &[], QuizMode::Mcq, 3, &mut rng()).unwrap();
    assert_eq!(s.questions.len(), 3);
    // No repeats.
    let mut ids: Vec<u32> = s.questions.iter().map(|q| q.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 3);
  }

  #[test]
  fn subtopic_filter_and_all_sentinel() {
    let bank = bank("partitive");
    let only_people = QuizSession::start(
      &bank,
      &["people".to_string()],
      QuizMode::Written,
      10,
      &mut rng(),
    )
    .unwrap();
    assert!(only_people.questions.iter().all(|q| q.subtopic == "people"));

    let all = QuizSession::start(&bank, &["all".to_string()], QuizMode::Mcq, 10, &mut rng()).unwrap();
    assert_eq!(all.questions.len(), bank.questions.len());
  }

  #[test]
  fn empty_pool_yields_no_session() {
    let bank = bank("partitive");
    assert!(QuizSession::start(&bank, &["nosuch".to_string()], QuizMode::Mcq, 10, &mut rng()).is_none());
    assert!(QuizSession::start(&bank, &[], QuizMode::Mcq, 0, &mut rng()).is_none());
  }

  #[test]
  fn full_run_scores_and_summarizes() {
    let bank = bank("partitive");
    let mut s = QuizSession::start(&bank, &[], QuizMode::Written, 10, &mut rng()).unwrap();
    let total = s.questions.len();
    // Answer every question with its canonical answer.
    for _ in 0..total {
      let canonical = s.current().unwrap().answer.clone();
      let rec = s.submit(&canonical).unwrap();
      assert!(rec.correct);
    }
    assert!(s.is_finished());
    assert!(s.submit("anything").is_none());
    let summary = s.summary();
    assert_eq!(summary.correct, total);
    assert_eq!(summary.percent, 100);
    assert_eq!(summary.message, "Erinomaista! 🌟");
  }

  #[test]
  fn written_mode_tolerates_typos() {
    let bank = bank("partitive");
    let mut s = QuizSession::start(&bank, &["people".to_string()], QuizMode::Written, 10, &mut rng()).unwrap();
    // Find "naista" and answer with one dropped letter.
    while let Some(q) = s.current() {
      let answer = if q.answer == "naista" { "naist".to_string() } else { q.answer.clone() };
      s.submit(&answer);
    }
    assert_eq!(s.summary().correct, s.questions.len());
  }

  #[test]
  fn wrong_answers_land_in_review_records() {
    let bank = bank("existential");
    let mut s = QuizSession::start(&bank, &["existence".to_string()], QuizMode::Mcq, 10, &mut rng()).unwrap();
    while s.current().is_some() {
      s.submit("väärin");
    }
    assert_eq!(s.score, 0);
    assert!(s.answers.iter().all(|r| !r.correct));
    assert!(s.answers.iter().all(|r| !r.canonical.is_empty()));
  }
}
