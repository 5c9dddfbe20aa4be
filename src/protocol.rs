//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable so the quiz pages and backend can evolve
//! independently.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Exercise, Question, Subtopic, TopicBank};
use crate::score::{ScoreResult, TokenMark};
use crate::session::{AnswerRecord, QuizMode, Summary};

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    ListTopics,
    StartQuiz {
        topic: String,
        #[serde(default)]
        subtopics: Vec<String>,
        mode: QuizMode,
        #[serde(default)]
        count: Option<usize>,
    },
    GetQuestion {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
    SubmitAnswer {
        #[serde(rename = "sessionId")]
        session_id: String,
        answer: String,
    },
    GetResults {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
    ScoreDragMatch {
        topic: String,
        #[serde(rename = "setId")]
        set_id: String,
        placements: HashMap<u32, u32>,
    },
    ScoreIdentify {
        topic: String,
        #[serde(rename = "setId")]
        set_id: String,
        selected: Vec<String>,
    },
    ScoreBlanks {
        topic: String,
        #[serde(rename = "setId")]
        set_id: String,
        values: Vec<String>,
    },
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Topics {
        topics: Vec<TopicOut>,
    },
    QuizStarted {
        #[serde(rename = "sessionId")]
        session_id: String,
        total: usize,
    },
    Question {
        finished: bool,
        question: Option<QuestionOut>,
    },
    AnswerResult {
        correct: bool,
        expected: String,
        explanation: String,
        finished: bool,
    },
    Results {
        summary: Summary,
        review: Vec<AnswerRecord>,
    },
    ExerciseResult(ExerciseScoreOut),
    Error {
        message: String,
    },
}

/// Listing entry for one grammar topic.
#[derive(Debug, Serialize)]
pub struct TopicOut {
    pub topic: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "questionCount")]
    pub question_count: usize,
    pub subtopics: Vec<Subtopic>,
    pub exercises: Vec<ExerciseSummaryOut>,
}

#[derive(Debug, Serialize)]
pub struct ExerciseSummaryOut {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(rename = "instructionsFi")]
    pub instructions_fi: String,
    #[serde(rename = "instructionsEn")]
    pub instructions_en: String,
}

pub fn topic_to_out(bank: &TopicBank) -> TopicOut {
    TopicOut {
        topic: bank.topic.clone(),
        title: bank.title.clone(),
        description: bank.description.clone(),
        question_count: bank.questions.len(),
        subtopics: bank.subtopics.clone(),
        exercises: bank.question_sets.iter().map(exercise_to_summary).collect(),
    }
}

pub fn exercise_to_summary(set: &Exercise) -> ExerciseSummaryOut {
    ExerciseSummaryOut {
        id: set.id.clone(),
        title: set.title.clone(),
        kind: set.kind_name(),
        instructions_fi: set.instructions_fi.clone(),
        instructions_en: set.instructions_en.clone(),
    }
}

/// One question as served to the page. The canonical answer and the
/// explanation stay server-side until the answer is submitted.
#[derive(Debug, Serialize)]
pub struct QuestionOut {
    /// 1-based position within the quiz.
    pub index: usize,
    pub total: usize,
    #[serde(rename = "type")]
    pub qtype: String,
    pub word: String,
    pub sentence: String,
    pub question: String,
    pub english: String,
    pub context: String,
    pub rule: String,
    /// Present in MCQ mode only.
    pub options: Option<Vec<String>>,
}

pub fn question_to_out(q: &Question, index: usize, total: usize, options: Option<Vec<String>>) -> QuestionOut {
    QuestionOut {
        index,
        total,
        qtype: q.qtype.clone(),
        word: q.word.clone(),
        sentence: q.sentence.clone(),
        question: q.question.clone(),
        english: q.english.clone(),
        context: q.context.clone(),
        rule: q.rule.clone(),
        options,
    }
}

/// Scored exercise payload shared by all three exercise kinds.
#[derive(Debug, Serialize)]
pub struct ExerciseScoreOut {
    pub correct: usize,
    pub total: usize,
    #[serde(rename = "perItem")]
    pub per_item: Vec<bool>,
    pub percent: u32,
    pub message: String,
    /// Canonical text per item (right-side card, expected blank, target
    /// token) so the page can reveal answers for missed items.
    pub reveal: Vec<String>,
    /// Identify exercises only: classification of every text token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<Vec<TokenOut>>,
}

impl ExerciseScoreOut {
    pub fn from_result(result: ScoreResult, reveal: Vec<String>, tokens: Option<Vec<TokenOut>>) -> Self {
        let percent = result.percent();
        Self {
            correct: result.correct,
            total: result.total,
            per_item: result.per_item,
            percent,
            message: crate::score::grade_message(percent).to_string(),
            reveal,
            tokens,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TokenOut {
    pub display: String,
    pub mark: TokenMark,
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
pub struct StartQuizIn {
    pub topic: String,
    #[serde(default)]
    pub subtopics: Vec<String>,
    pub mode: QuizMode,
    #[serde(default)]
    pub count: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct QuizStartedOut {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct SessionQuestionOut {
    pub finished: bool,
    pub question: Option<QuestionOut>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerIn {
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct AnswerOut {
    pub correct: bool,
    pub expected: String,
    pub explanation: String,
    pub finished: bool,
}

#[derive(Debug, Serialize)]
pub struct ResultsOut {
    pub summary: Summary,
    pub review: Vec<AnswerRecord>,
}

#[derive(Debug, Deserialize)]
pub struct DragMatchIn {
    pub topic: String,
    #[serde(rename = "setId")]
    pub set_id: String,
    pub placements: HashMap<u32, u32>,
}

#[derive(Debug, Deserialize)]
pub struct IdentifyIn {
    pub topic: String,
    #[serde(rename = "setId")]
    pub set_id: String,
    pub selected: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct BlanksIn {
    pub topic: String,
    #[serde(rename = "setId")]
    pub set_id: String,
    pub values: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorOut {
    pub message: String,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}
