//! Loading topic banks (JSON, one file per grammar topic) and validating
//! their invariants before they reach the quiz core.
//!
//! Loading is fail-soft: a file that cannot be read or parsed is logged
//! and skipped, and a bank that fails validation is skipped whole. The
//! caller decides what to do when nothing loads (see `AppState::new`).

use std::collections::HashSet;
use std::path::Path;

use tracing::{error, info, warn};

use crate::domain::{ExerciseKind, TopicBank};

/// Read every `*.json` file in `dir` as a topic bank.
pub fn load_banks_from_dir(dir: &Path) -> Vec<TopicBank> {
  let entries = match std::fs::read_dir(dir) {
    Ok(e) => e,
    Err(e) => {
      error!(target: "taito_backend", dir = %dir.display(), error = %e, "Cannot read bank directory");
      return Vec::new();
    }
  };

  let mut banks = Vec::new();
  for entry in entries.flatten() {
    let path = entry.path();
    if path.extension().and_then(|e| e.to_str()) != Some("json") {
      continue;
    }
    match std::fs::read_to_string(&path) {
      Ok(s) => match serde_json::from_str::<TopicBank>(&s) {
        Ok(bank) => {
          let issues = validate_bank(&bank);
          if issues.is_empty() {
            info!(
              target: "taito_backend",
              topic = %bank.topic,
              questions = bank.questions.len(),
              question_sets = bank.question_sets.len(),
              file = %path.display(),
              "Loaded topic bank"
            );
            banks.push(bank);
          } else {
            error!(
              target: "taito_backend",
              topic = %bank.topic,
              file = %path.display(),
              issues = %issues.join("; "),
              "Skipping invalid topic bank"
            );
          }
        }
        Err(e) => {
          error!(target: "taito_backend", file = %path.display(), error = %e, "Failed to parse bank JSON");
        }
      },
      Err(e) => {
        error!(target: "taito_backend", file = %path.display(), error = %e, "Failed to read bank file");
      }
    }
  }
  banks
}

/// Invariants a bank must hold before it participates in scoring.
/// Returns a human-readable issue list; empty means the bank is usable.
pub fn validate_bank(bank: &TopicBank) -> Vec<String> {
  let mut issues = Vec::new();

  if bank.topic.trim().is_empty() {
    issues.push("topic id must not be empty".to_string());
  }
  if bank.questions.is_empty() && bank.question_sets.is_empty() {
    issues.push("bank has neither questions nor question_sets".to_string());
  }

  let mut ids = HashSet::new();
  for q in &bank.questions {
    if !ids.insert(q.id) {
      issues.push(format!("duplicate question id {}", q.id));
    }
    if q.answer.trim().is_empty() {
      issues.push(format!("question {} has an empty answer", q.id));
    }
    if let Some(opts) = &q.options {
      let distinct: HashSet<&String> = opts.iter().collect();
      if distinct.len() != opts.len() {
        issues.push(format!("question {} has duplicate options", q.id));
      }
    }
  }

  let mut set_ids = HashSet::new();
  for set in &bank.question_sets {
    if !set_ids.insert(set.id.clone()) {
      issues.push(format!("duplicate exercise id {:?}", set.id));
    }
    match &set.kind {
      ExerciseKind::DragMatch { items } => {
        let distinct: HashSet<u32> = items.iter().map(|p| p.id).collect();
        if distinct.len() != items.len() {
          issues.push(format!("exercise {:?} has duplicate pair ids", set.id));
        }
        if items.is_empty() {
          issues.push(format!("exercise {:?} has no pairs", set.id));
        }
      }
      ExerciseKind::ClickToIdentify { text, targets, .. } => {
        if targets.is_empty() {
          issues.push(format!("exercise {:?} has no target tokens", set.id));
        }
        let tokens: HashSet<String> = crate::score::tokenize_text(text)
          .into_iter()
          .map(|t| t.clean)
          .collect();
        for t in targets {
          if !tokens.contains(&crate::util::clean_token(t)) {
            warn!(target: "taito_backend", topic = %bank.topic, set = %set.id, token = %t, "Identify target not present in text");
          }
        }
      }
      ExerciseKind::FillBlanks { items } => {
        for it in items {
          let blanks = it.prompt.matches("___").count();
          if it.answers.is_empty() {
            issues.push(format!("exercise {:?} item {} has no answers", set.id, it.number));
          } else if blanks != it.answers.len() {
            issues.push(format!(
              "exercise {:?} item {}: {} blanks but {} answers",
              set.id, it.number, blanks, it.answers.len()
            ));
          }
        }
      }
    }
  }

  issues
}
