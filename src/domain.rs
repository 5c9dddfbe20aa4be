//! Domain models: questions, subtopics, exercise sets, and topic banks.
//!
//! Shapes mirror the per-topic `questions.json` files the quiz pages ship
//! with. Prompt fields vary by topic (some use `word`, some `sentence`,
//! some `question`), so they all default to empty strings on deserialize.

use serde::{Deserialize, Serialize};

/// One assessable unit. Immutable once loaded; owned by its topic bank.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Question {
  pub id: u32,
  /// Free-form tag selecting the rendering/evaluation path
  /// (e.g. "identify", "sentence", "partitive", "write", "mcq").
  #[serde(rename = "type", default)]
  pub qtype: String,
  #[serde(default)]
  pub subtopic: String,

  // Prompt fields; which ones are filled depends on the topic.
  #[serde(default)]
  pub word: String,
  #[serde(default)]
  pub sentence: String,
  #[serde(default)]
  pub question: String,
  #[serde(default)]
  pub english: String,
  #[serde(default)]
  pub context: String,
  #[serde(default)]
  pub rule: String,

  /// Canonical correct answer. May encode alternatives as "X/Y".
  pub answer: String,
  /// Pre-supplied choice list; when present the generator just shuffles it.
  #[serde(default)]
  pub options: Option<Vec<String>>,
  #[serde(default)]
  pub explanation: String,
}

impl Question {
  /// Binary identify questions get a fixed yes/no choice pair instead of
  /// pool-generated distractors.
  pub fn is_binary(&self) -> bool {
    self.qtype == "identify" && self.options.is_none()
  }

  /// Best available prompt text for review/feedback output.
  pub fn prompt(&self) -> &str {
    for s in [&self.question, &self.sentence, &self.word, &self.english] {
      if !s.is_empty() {
        return s;
      }
    }
    ""
  }
}

/// Grouping tag used to filter the question pool before sampling.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Subtopic {
  pub id: String,
  pub name: String,
  #[serde(default)]
  pub icon: String,
}

/// One left/right pairing in a drag-to-match exercise.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchPair {
  pub id: u32,
  /// Fixed card (Finnish phrase).
  pub left: String,
  /// Draggable card (English translation).
  pub right: String,
}

/// One row of a fill-in exercise. `prompt` contains `___` where the blank
/// sits; negative-imperative rows carry two answers (particle + verb).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BlankItem {
  pub number: u32,
  pub prompt: String,
  #[serde(default)]
  pub hint: String,
  pub answers: Vec<String>,
}

/// Structured multi-item exercise, distinct from the single-question flow.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Exercise {
  pub id: String,
  #[serde(default)]
  pub title: String,
  #[serde(default)]
  pub instructions_fi: String,
  #[serde(default)]
  pub instructions_en: String,
  #[serde(flatten)]
  pub kind: ExerciseKind,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExerciseKind {
  DragMatch {
    items: Vec<MatchPair>,
  },
  ClickToIdentify {
    text: String,
    /// Correct tokens, as they appear in the text (punctuation-free form).
    targets: Vec<String>,
    /// Explicit near-miss tokens the page may highlight as traps.
    #[serde(default)]
    negatives: Vec<String>,
  },
  FillBlanks {
    items: Vec<BlankItem>,
  },
}

impl Exercise {
  pub fn kind_name(&self) -> &'static str {
    match self.kind {
      ExerciseKind::DragMatch { .. } => "drag_match",
      ExerciseKind::ClickToIdentify { .. } => "click_to_identify",
      ExerciseKind::FillBlanks { .. } => "fill_blanks",
    }
  }
}

/// Everything one grammar topic ships: its questions, optional exercise
/// sets, and the subtopic list used for filtering.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TopicBank {
  pub topic: String,
  #[serde(default)]
  pub title: String,
  #[serde(default)]
  pub description: String,
  pub questions: Vec<Question>,
  #[serde(default)]
  pub question_sets: Vec<Exercise>,
  #[serde(default)]
  pub subtopics: Vec<Subtopic>,
}

impl TopicBank {
  pub fn exercise(&self, id: &str) -> Option<&Exercise> {
    self.question_sets.iter().find(|s| s.id == id)
  }
}
