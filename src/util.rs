//! Small utility helpers used across modules.

/// Normalize a free-text answer for comparison:
/// lowercase, trim, and collapse internal whitespace runs to single spaces.
pub fn normalize_answer(s: &str) -> String {
  s.split_whitespace()
    .map(|w| w.to_lowercase())
    .collect::<Vec<_>>()
    .join(" ")
}

/// Comparison key for a token inside running text: trailing punctuation
/// stripped, lowercased. The identify exercises match on this form.
pub fn clean_token(token: &str) -> String {
  token
    .trim_end_matches(['.', ',', '!', '?', ';', ':'])
    .to_lowercase()
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with huge request/response payloads.
#[allow(dead_code)]
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max { s.to_string() } else { format!("{}… ({} bytes total)", &s[..max], s.len()) }
}
