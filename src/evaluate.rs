//! Answer evaluation: exact and fuzzy matching of free-text answers.
//!
//! Both sides are normalized (lowercase, trimmed, whitespace collapsed)
//! before comparison. Written mode tolerates small typos through a bounded
//! Levenshtein distance; the tolerance is `max(2, floor(0.15 × len))` edit
//! operations against the canonical answer, and fuzzy matching is disabled
//! entirely for canonical answers shorter than [`FUZZY_MIN_CHARS`] chars
//! (a 1-edit slip on "on" would otherwise accept "in").
//!
//! Canonical answers may encode acceptable alternatives as "X/Y"; the first
//! alternative is also accepted as an exact match.

use crate::util::normalize_answer;

/// Below this canonical length (in chars) the answer must match exactly.
pub const FUZZY_MIN_CHARS: usize = 5;

/// Fraction of the canonical length allowed as edit distance.
const FUZZY_RATIO: f64 = 0.15;

/// Minimum tolerated edit distance once fuzzy matching applies.
const FUZZY_FLOOR: usize = 2;

/// How a submitted answer is compared against the canonical one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
  /// Normalized equality only (MCQ selections, short answers).
  Exact,
  /// Written input: normalized equality or bounded edit distance.
  Fuzzy,
}

/// Decide pass/fail for one response against one canonical answer.
///
/// An empty canonical answer never matches anything, including empty input.
pub fn evaluate(user: &str, canonical: &str, mode: MatchMode) -> bool {
  let user = normalize_answer(user);
  let canonical = normalize_answer(canonical);
  if canonical.is_empty() {
    return false;
  }
  if user == canonical {
    return true;
  }
  // "X/Y" canonical form: accept the first alternative exactly.
  if let Some(first) = canonical.split('/').next() {
    if !first.is_empty() && user == first.trim() {
      return true;
    }
  }
  match mode {
    MatchMode::Exact => false,
    MatchMode::Fuzzy => {
      let len = canonical.chars().count();
      if len < FUZZY_MIN_CHARS {
        return false;
      }
      levenshtein(&user, &canonical) <= fuzzy_tolerance(len)
    }
  }
}

/// Allowed edit distance for a canonical answer of `len` chars.
pub fn fuzzy_tolerance(len: usize) -> usize {
  FUZZY_FLOOR.max((len as f64 * FUZZY_RATIO).floor() as usize)
}

/// Classic dynamic-programming Levenshtein distance over code points.
/// Insertion, deletion, and substitution each cost 1; no transposition.
pub fn levenshtein(a: &str, b: &str) -> usize {
  let a: Vec<char> = a.chars().collect();
  let b: Vec<char> = b.chars().collect();
  if a.is_empty() {
    return b.len();
  }
  if b.is_empty() {
    return a.len();
  }

  // Two-row variant of the full matrix.
  let mut prev: Vec<usize> = (0..=b.len()).collect();
  let mut curr = vec![0usize; b.len() + 1];

  for (i, ca) in a.iter().enumerate() {
    curr[0] = i + 1;
    for (j, cb) in b.iter().enumerate() {
      let cost = if ca == cb { 0 } else { 1 };
      curr[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(curr[j] + 1);
    }
    std::mem::swap(&mut prev, &mut curr);
  }
  prev[b.len()]
}
