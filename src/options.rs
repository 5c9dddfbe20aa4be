//! Multiple-choice option generation.
//!
//! Each MCQ render needs the canonical answer plus up to three plausible
//! distractors. Distractors come from sibling questions in the same
//! subtopic first; when the pool runs dry the generator falls back to
//! rule-based Finnish suffix mutations of the base word. If even those are
//! exhausted it returns fewer than four options rather than looping.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::Question;

/// Total options in a full multiple-choice render.
pub const OPTION_COUNT: usize = 4;

/// Partitive-style endings used for mutation-based distractors.
const ENDINGS: [&str; 8] = ["a", "ä", "ta", "tä", "tta", "ttä", "sta", "stä"];

/// Produce a shuffled option list for `question`: the canonical answer plus
/// up to three unique wrong options. Binary identify questions get the
/// fixed yes/no pair; pre-supplied option lists are used as given.
pub fn generate_options<R: Rng>(question: &Question, pool: &[Question], rng: &mut R) -> Vec<String> {
  if question.is_binary() {
    let mut pair = vec!["yes".to_string(), "no".to_string()];
    pair.shuffle(rng);
    return pair;
  }

  if let Some(given) = &question.options {
    let mut opts: Vec<String> = Vec::new();
    for o in given {
      if !opts.contains(o) {
        opts.push(o.clone());
      }
    }
    if !opts.contains(&question.answer) {
      opts.push(question.answer.clone());
    }
    opts.shuffle(rng);
    return opts;
  }

  let mut opts = vec![question.answer.clone()];

  let mut wrongs = pool_answers(question, pool);
  wrongs.shuffle(rng);
  for w in wrongs.into_iter().take(OPTION_COUNT - 1) {
    opts.push(w);
  }

  if opts.len() < OPTION_COUNT {
    let mut variations = suffix_variations(question);
    variations.shuffle(rng);
    for v in variations {
      if opts.len() >= OPTION_COUNT {
        break;
      }
      if v != question.answer && !opts.contains(&v) {
        opts.push(v);
      }
    }
  }

  opts.shuffle(rng);
  opts
}

/// Distinct wrong answers from sibling questions. Same subtopic always;
/// same type tag too when both questions carry one, falling back to
/// subtopic-only when the stricter filter yields nothing.
fn pool_answers(question: &Question, pool: &[Question]) -> Vec<String> {
  let siblings = |same_type: bool| -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for q in pool {
      if q.id == question.id || q.subtopic != question.subtopic {
        continue;
      }
      if same_type && !q.qtype.is_empty() && !question.qtype.is_empty() && q.qtype != question.qtype {
        continue;
      }
      if q.answer.is_empty() || q.answer == question.answer || out.contains(&q.answer) {
        continue;
      }
      out.push(q.answer.clone());
    }
    out
  };

  let strict = siblings(true);
  if strict.is_empty() { siblings(false) } else { strict }
}

/// Rule-based wrong forms derived from the base word (or the answer when
/// the question has no word). Finite by construction.
fn suffix_variations(question: &Question) -> Vec<String> {
  let base = if question.word.is_empty() { &question.answer } else { &question.word };
  let chars: Vec<char> = base.chars().collect();
  if chars.is_empty() {
    return Vec::new();
  }

  let mut out: Vec<String> = Vec::new();

  // "-nen" words decline on the truncated stem (nainen -> naista).
  let stem: String = if base.ends_with("nen") && chars.len() > 3 {
    chars[..chars.len() - 3].iter().collect()
  } else {
    base.clone()
  };
  for ending in ENDINGS {
    out.push(format!("{stem}{ending}"));
  }

  // Swap the final char for a plain vowel.
  if chars.len() > 1 {
    let trunc: String = chars[..chars.len() - 1].iter().collect();
    out.push(format!("{trunc}a"));
    out.push(format!("{trunc}ä"));
    // "-i" nominatives commonly shift stem vowel in inflection.
    if *chars.last().unwrap() == 'i' {
      out.push(format!("{base}n"));
      out.push(format!("{trunc}en"));
      out.push(format!("{trunc}an"));
      out.push(format!("{trunc}in"));
    }
  }

  out.sort();
  out.dedup();
  out
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  fn q(id: u32, qtype: &str, subtopic: &str, word: &str, answer: &str) -> Question {
    Question {
      id,
      qtype: qtype.into(),
      subtopic: subtopic.into(),
      word: word.into(),
      sentence: String::new(),
      question: String::new(),
      english: String::new(),
      context: String::new(),
      rule: String::new(),
      answer: answer.into(),
      options: None,
      explanation: String::new(),
    }
  }

  fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
  }

  #[test]
  fn pool_distractors_fill_four_unique_options() {
    let pool = vec![
      q(1, "partitive", "food", "leipä", "leipää"),
      q(2, "partitive", "food", "maito", "maitoa"),
      q(3, "partitive", "food", "kala", "kalaa"),
      q(4, "partitive", "food", "vesi", "vettä"),
      q(5, "partitive", "drinks", "kahvi", "kahvia"),
    ];
    let opts = generate_options(&pool[0], &pool, &mut rng());
    assert_eq!(opts.len(), OPTION_COUNT);
    assert_eq!(opts.iter().filter(|o| *o == "leipää").count(), 1);
    let mut dedup = opts.clone();
    dedup.sort();
    dedup.dedup();
    assert_eq!(dedup.len(), opts.len(), "duplicate options in {opts:?}");
    // Only same-subtopic answers qualify.
    assert!(!opts.contains(&"kahvia".to_string()));
  }

  #[test]
  fn mutation_fallback_kicks_in_for_thin_pools() {
    let pool = vec![q(1, "partitive", "food", "talo", "taloa")];
    let opts = generate_options(&pool[0], &pool, &mut rng());
    assert_eq!(opts.len(), OPTION_COUNT);
    assert!(opts.contains(&"taloa".to_string()));
    for o in &opts {
      if o != "taloa" {
        assert!(o.starts_with("tal"), "unexpected variation {o:?}");
      }
    }
  }

  #[test]
  fn generation_degrades_instead_of_looping() {
    // Single-char word with the answer occupying one mutation slot:
    // few unique variations exist, and that has to be fine.
    let question = q(1, "partitive", "misc", "a", "aa");
    let opts = generate_options(&question, &[question.clone()], &mut rng());
    assert!(opts.len() <= OPTION_COUNT);
    assert_eq!(opts.iter().filter(|o| *o == "aa").count(), 1);
    let mut dedup = opts.clone();
    dedup.sort();
    dedup.dedup();
    assert_eq!(dedup.len(), opts.len());
  }

  #[test]
  fn binary_identify_gets_yes_no_pair() {
    let question = q(1, "identify", "existence", "", "yes");
    let mut opts = generate_options(&question, &[], &mut rng());
    opts.sort();
    assert_eq!(opts, vec!["no".to_string(), "yes".to_string()]);
  }

  #[test]
  fn presupplied_options_are_used_verbatim() {
    let mut question = q(1, "mcq", "time", "", "kello kaksi");
    question.options = Some(vec![
      "kello kaksi".into(),
      "kello kolme".into(),
      "kello neljä".into(),
      "kello viisi".into(),
    ]);
    let mut opts = generate_options(&question, &[], &mut rng());
    opts.sort();
    assert_eq!(opts.len(), 4);
    assert!(opts.contains(&"kello kaksi".to_string()));
  }

  #[test]
  fn nen_stem_is_truncated_before_endings() {
    let question = q(1, "partitive", "people", "nainen", "naista");
    let vars = suffix_variations(&question);
    assert!(vars.contains(&"naista".to_string()));
    assert!(vars.iter().all(|v| !v.starts_with("nainena")));
  }
}
