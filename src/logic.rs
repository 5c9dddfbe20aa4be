//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Listing topics (with subtopics and exercise summaries)
//!   - Starting quiz sessions and serving their questions
//!   - Evaluating submitted answers and building results/review payloads
//!   - Scoring the batch exercise sets (drag-match, identify, blanks)

use std::collections::HashSet;

use tracing::{info, instrument};

use crate::domain::ExerciseKind;
use crate::options::generate_options;
use crate::protocol::*;
use crate::score;
use crate::state::AppState;

#[instrument(level = "debug", skip(state))]
pub fn list_topics(state: &AppState) -> Vec<TopicOut> {
  state.topics().into_iter().map(topic_to_out).collect()
}

#[instrument(level = "info", skip(state, req), fields(topic = %req.topic, mode = ?req.mode))]
pub async fn start_quiz(state: &AppState, req: StartQuizIn) -> Result<QuizStartedOut, String> {
  let (session_id, total) = state
    .start_session(&req.topic, &req.subtopics, req.mode, req.count)
    .await?;
  Ok(QuizStartedOut { session_id, total })
}

/// Current question of a session, with MCQ options generated fresh from
/// the topic pool. Finished sessions report `finished` with no question.
#[instrument(level = "info", skip(state), fields(session = %session_id))]
pub async fn fetch_question(state: &AppState, session_id: &str) -> Result<SessionQuestionOut, String> {
  let session = state
    .session(session_id)
    .await
    .ok_or_else(|| format!("Unknown session: {session_id}"))?;

  let Some(question) = session.current() else {
    return Ok(SessionQuestionOut { finished: true, question: None });
  };

  let options = match session.mode {
    crate::session::QuizMode::Mcq => {
      let pool = state
        .bank(&session.topic)
        .map(|b| b.questions.as_slice())
        .unwrap_or(&[]);
      let mut rng = rand::thread_rng();
      Some(generate_options(question, pool, &mut rng))
    }
    crate::session::QuizMode::Written => None,
  };

  Ok(SessionQuestionOut {
    finished: false,
    question: Some(question_to_out(
      question,
      session.index + 1,
      session.questions.len(),
      options,
    )),
  })
}

#[instrument(level = "info", skip(state, answer), fields(session = %session_id, answer_len = answer.len()))]
pub async fn answer_question(state: &AppState, session_id: &str, answer: &str) -> Result<AnswerOut, String> {
  let (record, explanation, finished) = state
    .submit_answer(session_id, answer)
    .await
    .ok_or_else(|| format!("Unknown or finished session: {session_id}"))?;
  Ok(AnswerOut {
    correct: record.correct,
    expected: record.canonical,
    explanation,
    finished,
  })
}

#[instrument(level = "info", skip(state), fields(session = %session_id))]
pub async fn quiz_results(state: &AppState, session_id: &str) -> Result<ResultsOut, String> {
  let (summary, review) = state
    .results(session_id)
    .await
    .ok_or_else(|| format!("Unknown session: {session_id}"))?;
  Ok(ResultsOut { summary, review })
}

#[instrument(level = "info", skip(state, req), fields(topic = %req.topic, set = %req.set_id))]
pub fn score_drag_match_set(state: &AppState, req: &DragMatchIn) -> Result<ExerciseScoreOut, String> {
  let set = lookup_exercise(state, &req.topic, &req.set_id)?;
  let ExerciseKind::DragMatch { items } = &set.kind else {
    return Err(format!("Exercise {} is not a drag_match set", req.set_id));
  };
  let result = score::score_drag_match(&req.placements, items);
  info!(target: "quiz", topic = %req.topic, set = %req.set_id, correct = result.correct, total = result.total, "Drag-match scored");
  let reveal = items.iter().map(|p| p.right.clone()).collect();
  Ok(ExerciseScoreOut::from_result(result, reveal, None))
}

#[instrument(level = "info", skip(state, req), fields(topic = %req.topic, set = %req.set_id))]
pub fn score_identify_set(state: &AppState, req: &IdentifyIn) -> Result<ExerciseScoreOut, String> {
  let set = lookup_exercise(state, &req.topic, &req.set_id)?;
  let ExerciseKind::ClickToIdentify { text, targets, .. } = &set.kind else {
    return Err(format!("Exercise {} is not a click_to_identify set", req.set_id));
  };
  let selected: HashSet<String> = req.selected.iter().cloned().collect();
  let result = score::score_token_identify(&selected, targets);
  info!(target: "quiz", topic = %req.topic, set = %req.set_id, correct = result.correct, total = result.total, "Identify scored");
  let tokens = score::classify_tokens(text, &selected, targets)
    .into_iter()
    .map(|(tok, mark)| TokenOut { display: tok.display, mark })
    .collect();
  Ok(ExerciseScoreOut::from_result(result, targets.clone(), Some(tokens)))
}

#[instrument(level = "info", skip(state, req), fields(topic = %req.topic, set = %req.set_id))]
pub fn score_blanks_set(state: &AppState, req: &BlanksIn) -> Result<ExerciseScoreOut, String> {
  let set = lookup_exercise(state, &req.topic, &req.set_id)?;
  let ExerciseKind::FillBlanks { items } = &set.kind else {
    return Err(format!("Exercise {} is not a fill_blanks set", req.set_id));
  };
  let key = score::blanks_key(items);
  let result = score::score_blanks(&req.values, &key);
  info!(target: "quiz", topic = %req.topic, set = %req.set_id, correct = result.correct, total = result.total, "Blanks scored");
  Ok(ExerciseScoreOut::from_result(result, key, None))
}

fn lookup_exercise<'a>(
  state: &'a AppState,
  topic: &str,
  set_id: &str,
) -> Result<&'a crate::domain::Exercise, String> {
  state
    .bank(topic)
    .ok_or_else(|| format!("Unknown topic: {topic}"))?
    .exercise(set_id)
    .ok_or_else(|| format!("Unknown exercise {set_id} in topic {topic}"))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::QuizSettings;
  use crate::seeds::seed_banks;
  use crate::session::QuizMode;
  use std::collections::HashMap;

  fn state() -> AppState {
    AppState::with_banks(seed_banks(), QuizSettings { questions_per_quiz: 10 })
  }

  #[tokio::test]
  async fn mcq_questions_come_with_options() {
    let state = state();
    let started = start_quiz(
      &state,
      StartQuizIn {
        topic: "partitive".into(),
        subtopics: vec![],
        mode: QuizMode::Mcq,
        count: Some(3),
      },
    )
    .await
    .unwrap();

    let q = fetch_question(&state, &started.session_id).await.unwrap();
    assert!(!q.finished);
    let question = q.question.unwrap();
    assert_eq!(question.index, 1);
    assert_eq!(question.total, 3);
    let options = question.options.expect("mcq options");
    assert!(options.len() >= 2 && options.len() <= 4);
  }

  #[tokio::test]
  async fn written_questions_hide_options_and_answers() {
    let state = state();
    let started = start_quiz(
      &state,
      StartQuizIn {
        topic: "imperative".into(),
        subtopics: vec!["positive".into()],
        mode: QuizMode::Written,
        count: None,
      },
    )
    .await
    .unwrap();

    let q = fetch_question(&state, &started.session_id).await.unwrap();
    assert!(q.question.unwrap().options.is_none());

    let out = answer_question(&state, &started.session_id, "täysin väärin")
      .await
      .unwrap();
    assert!(!out.correct);
    assert!(!out.expected.is_empty());
  }

  #[tokio::test]
  async fn finished_session_reports_finished_question() {
    let state = state();
    let started = start_quiz(
      &state,
      StartQuizIn {
        topic: "existential".into(),
        subtopics: vec![],
        mode: QuizMode::Written,
        count: Some(1),
      },
    )
    .await
    .unwrap();
    let out = answer_question(&state, &started.session_id, "jotain").await.unwrap();
    assert!(out.finished);
    let q = fetch_question(&state, &started.session_id).await.unwrap();
    assert!(q.finished);
    assert!(q.question.is_none());

    let results = quiz_results(&state, &started.session_id).await.unwrap();
    assert_eq!(results.summary.total, 1);
    assert_eq!(results.review.len(), 1);
  }

  #[test]
  fn drag_match_scoring_reveals_right_sides() {
    let state = state();
    let out = score_drag_match_set(
      &state,
      &DragMatchIn {
        topic: "imperative".into(),
        set_id: "imp-match".into(),
        placements: HashMap::from([(1, 1), (2, 2)]),
      },
    )
    .unwrap();
    assert_eq!(out.correct, 2);
    assert_eq!(out.total, 4);
    assert_eq!(out.reveal.len(), 4);
  }

  #[test]
  fn identify_scoring_classifies_tokens() {
    let state = state();
    let out = score_identify_set(
      &state,
      &IdentifyIn {
        topic: "imperative".into(),
        set_id: "imp-identify".into(),
        selected: vec!["mene".into(), "älä".into(), "kissa".into()],
      },
    )
    .unwrap();
    assert_eq!(out.correct, 2);
    assert_eq!(out.total, 4);
    let tokens = out.tokens.expect("token classification");
    assert!(tokens
      .iter()
      .any(|t| t.display == "Kissa" && t.mark == crate::score::TokenMark::Wrong));
  }

  #[test]
  fn blanks_scoring_uses_flattened_key() {
    let state = state();
    let out = score_blanks_set(
      &state,
      &BlanksIn {
        topic: "imperative".into(),
        set_id: "imp-write".into(),
        values: vec!["avaa".into(), "ÄLÄ".into(), "men".into()],
      },
    )
    .unwrap();
    assert_eq!(out.total, 3);
    assert_eq!(out.correct, 2);
    assert_eq!(out.per_item, vec![true, true, false]);
  }

  #[test]
  fn exercise_kind_mismatch_is_an_error() {
    let state = state();
    let err = score_blanks_set(
      &state,
      &BlanksIn {
        topic: "imperative".into(),
        set_id: "imp-match".into(),
        values: vec![],
      },
    )
    .unwrap_err();
    assert!(err.contains("not a fill_blanks"));
  }
}
