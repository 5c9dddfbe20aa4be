//! Batch scorers for the structured exercise sets.
//!
//! Each scorer is a pure function from user state + canonical key to a
//! [`ScoreResult`]. Empty or missing user input counts as incorrect for
//! that item, never as an error.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::domain::{BlankItem, MatchPair};
use crate::evaluate::{evaluate, MatchMode};
use crate::util::clean_token;

/// Outcome of scoring one exercise.
#[derive(Clone, Debug, Serialize)]
pub struct ScoreResult {
  pub correct: usize,
  pub total: usize,
  /// Per-item correctness in key order.
  pub per_item: Vec<bool>,
}

impl ScoreResult {
  fn from_items(per_item: Vec<bool>) -> Self {
    let correct = per_item.iter().filter(|c| **c).count();
    Self { correct, total: per_item.len(), per_item }
  }

  pub fn percent(&self) -> u32 {
    if self.total == 0 {
      return 0;
    }
    ((self.correct as f64 / self.total as f64) * 100.0).round() as u32
  }

  /// Finnish grade message, same tiering as the quiz results screen.
  pub fn message(&self) -> &'static str {
    grade_message(self.percent())
  }
}

pub fn grade_message(percent: u32) -> &'static str {
  if percent == 100 {
    "Täydellinen! 🏆"
  } else if percent >= 80 {
    "Erinomainen! 🌟"
  } else if percent >= 60 {
    "Hyvä työ! 💪"
  } else if percent >= 40 {
    "Harjoittele lisää! 📚"
  } else {
    "Jatka yrittämistä! 🌱"
  }
}

/// Drag-to-match: one correct right-side id per left-side id. Items the
/// user never placed score as incorrect.
pub fn score_drag_match(placed: &HashMap<u32, u32>, pairs: &[MatchPair]) -> ScoreResult {
  let per_item = pairs
    .iter()
    .map(|p| placed.get(&p.id) == Some(&p.id))
    .collect();
  ScoreResult::from_items(per_item)
}

/// How a single token in an identify exercise ends up classified.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenMark {
  /// Selected and a target.
  Correct,
  /// A target the user did not select.
  Missed,
  /// Selected but not a target.
  Wrong,
  /// Neither selected nor a target.
  Plain,
}

/// One displayable token of the exercise text with its comparison key.
#[derive(Clone, Debug, Serialize)]
pub struct TextToken {
  pub display: String,
  pub clean: String,
}

/// Split exercise text into clickable tokens: whitespace-separated words
/// with trailing punctuation stripped from the comparison key.
pub fn tokenize_text(text: &str) -> Vec<TextToken> {
  text
    .split_whitespace()
    .map(|w| TextToken { display: w.to_string(), clean: clean_token(w) })
    .collect()
}

/// Click-to-identify: score = selected targets over total targets.
/// Matching is case-insensitive with trailing punctuation stripped, and
/// `per_item` follows the order of `targets`.
pub fn score_token_identify(selected: &HashSet<String>, targets: &[String]) -> ScoreResult {
  let selected: HashSet<String> = selected.iter().map(|t| clean_token(t)).collect();
  let per_item = targets
    .iter()
    .map(|t| selected.contains(&clean_token(t)))
    .collect();
  ScoreResult::from_items(per_item)
}

/// Classify every token of the exercise text for UI marking.
pub fn classify_tokens(
  text: &str,
  selected: &HashSet<String>,
  targets: &[String],
) -> Vec<(TextToken, TokenMark)> {
  let selected: HashSet<String> = selected.iter().map(|t| clean_token(t)).collect();
  let targets: HashSet<String> = targets.iter().map(|t| clean_token(t)).collect();
  tokenize_text(text)
    .into_iter()
    .map(|tok| {
      let is_target = targets.contains(&tok.clean);
      let was_selected = selected.contains(&tok.clean);
      let mark = match (is_target, was_selected) {
        (true, true) => TokenMark::Correct,
        (true, false) => TokenMark::Missed,
        (false, true) => TokenMark::Wrong,
        (false, false) => TokenMark::Plain,
      };
      (tok, mark)
    })
    .collect()
}

/// Fill-in-the-blanks: each blank compared independently with the
/// evaluator's normalization. Short user vectors leave trailing blanks
/// incorrect.
pub fn score_blanks(user: &[String], key: &[String]) -> ScoreResult {
  let per_item = key
    .iter()
    .enumerate()
    .map(|(i, expected)| {
      user
        .get(i)
        .map(|u| evaluate(u, expected, MatchMode::Exact))
        .unwrap_or(false)
    })
    .collect();
  ScoreResult::from_items(per_item)
}

/// Flatten an exercise's blank rows into the canonical per-blank key.
pub fn blanks_key(items: &[BlankItem]) -> Vec<String> {
  items.iter().flat_map(|it| it.answers.iter().cloned()).collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn pairs() -> Vec<MatchPair> {
    vec![
      MatchPair { id: 1, left: "Mene kotiin!".into(), right: "Go home!".into() },
      MatchPair { id: 2, left: "Älä huuda!".into(), right: "Don't shout!".into() },
      MatchPair { id: 3, left: "Istu alas!".into(), right: "Sit down!".into() },
    ]
  }

  #[test]
  fn drag_match_counts_exact_placements() {
    let placed = HashMap::from([(1, 1), (2, 3), (3, 3)]);
    let r = score_drag_match(&placed, &pairs());
    assert_eq!(r.correct, 2);
    assert_eq!(r.total, 3);
    assert_eq!(r.per_item, vec![true, false, true]);
  }

  #[test]
  fn drag_match_tolerates_unplaced_slots() {
    let r = score_drag_match(&HashMap::new(), &pairs());
    assert_eq!(r.correct, 0);
    assert_eq!(r.total, 3);
  }

  #[test]
  fn identify_scores_selected_targets() {
    let selected: HashSet<String> = ["mene", "älä"].iter().map(|s| s.to_string()).collect();
    let targets = vec!["mene".to_string(), "älä".to_string(), "syö".to_string()];
    let r = score_token_identify(&selected, &targets);
    assert_eq!(r.correct, 2);
    assert_eq!(r.total, 3);
    assert_eq!(r.per_item, vec![true, true, false]);
  }

  #[test]
  fn identify_matching_ignores_case_and_trailing_punctuation() {
    let selected: HashSet<String> = ["Mene!", "SYÖ,"].iter().map(|s| s.to_string()).collect();
    let targets = vec!["mene".to_string(), "syö".to_string()];
    let r = score_token_identify(&selected, &targets);
    assert_eq!(r.correct, 2);
  }

  #[test]
  fn classify_marks_every_token() {
    let text = "Mene kotiin! Älä huuda. Kissa nukkuu.";
    let selected: HashSet<String> = ["mene", "kissa"].iter().map(|s| s.to_string()).collect();
    let targets = vec!["mene".to_string(), "älä".to_string()];
    let marks: Vec<TokenMark> = classify_tokens(text, &selected, &targets)
      .into_iter()
      .map(|(_, m)| m)
      .collect();
    assert_eq!(
      marks,
      vec![
        TokenMark::Correct, // Mene
        TokenMark::Plain,   // kotiin!
        TokenMark::Missed,  // Älä
        TokenMark::Plain,   // huuda.
        TokenMark::Wrong,   // Kissa
        TokenMark::Plain,   // nukkuu.
      ]
    );
  }

  #[test]
  fn blanks_compare_independently() {
    let user = vec!["talo".to_string(), "kadulla".to_string()];
    let key = vec!["talon".to_string(), "kadulla".to_string()];
    let r = score_blanks(&user, &key);
    assert_eq!(r.correct, 1);
    assert_eq!(r.total, 2);
    assert_eq!(r.per_item, vec![false, true]);
  }

  #[test]
  fn blanks_tolerate_missing_and_empty_input() {
    let key = vec!["älä".to_string(), "mene".to_string()];
    let r = score_blanks(&[String::new()], &key);
    assert_eq!(r.correct, 0);
    assert_eq!(r.total, 2);
  }

  #[test]
  fn blanks_key_flattens_multi_blank_rows() {
    let items = vec![
      BlankItem { number: 1, prompt: "___ kotiin!".into(), hint: String::new(), answers: vec!["mene".into()] },
      BlankItem {
        number: 2,
        prompt: "___ ___ ulos!".into(),
        hint: String::new(),
        answers: vec!["älä".into(), "mene".into()],
      },
    ];
    assert_eq!(blanks_key(&items), vec!["mene", "älä", "mene"]);
  }

  #[test]
  fn percent_and_message_tiers() {
    let r = ScoreResult { correct: 3, total: 3, per_item: vec![true; 3] };
    assert_eq!(r.percent(), 100);
    assert_eq!(r.message(), "Täydellinen! 🏆");
    let r = ScoreResult { correct: 0, total: 0, per_item: vec![] };
    assert_eq!(r.percent(), 0);
  }
}
