//! Application state: loaded topic banks and the in-memory session store.
//!
//! Banks are immutable after startup. Sessions live only in memory and are
//! keyed by uuid; a retry simply starts a new session, and navigation away
//! abandons the old one.
//!
//! Bank loading ladder: configured `bank_dir` first, built-in seed banks
//! when the directory yields nothing.

use std::{collections::HashMap, path::Path, sync::Arc};

use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use crate::bank::load_banks_from_dir;
use crate::config::{load_config_from_env, QuizSettings};
use crate::domain::TopicBank;
use crate::seeds::seed_banks;
use crate::session::{AnswerRecord, QuizMode, QuizSession, Summary};

#[derive(Clone)]
pub struct AppState {
    pub banks: Arc<HashMap<String, TopicBank>>,
    pub sessions: Arc<RwLock<HashMap<String, QuizSession>>>,
    pub settings: QuizSettings,
}

impl AppState {
    /// Build state from env: load config, load banks (or seeds), log inventory.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let cfg = load_config_from_env();

        let mut loaded = cfg
            .bank_dir
            .as_deref()
            .map(|dir| load_banks_from_dir(Path::new(dir)))
            .unwrap_or_default();

        if loaded.is_empty() {
            if cfg.bank_dir.is_some() {
                warn!(target: "taito_backend", "No usable banks in bank_dir; falling back to built-in seeds");
            }
            loaded = seed_banks();
        }

        let mut banks = HashMap::new();
        for bank in loaded {
            info!(
                target: "quiz",
                topic = %bank.topic,
                questions = bank.questions.len(),
                question_sets = bank.question_sets.len(),
                subtopics = bank.subtopics.len(),
                "Startup topic inventory"
            );
            if banks.insert(bank.topic.clone(), bank).is_some() {
                warn!(target: "taito_backend", "Duplicate topic id; later bank wins");
            }
        }

        Self {
            banks: Arc::new(banks),
            sessions: Arc::new(RwLock::new(HashMap::new())),
            settings: cfg.quiz,
        }
    }

    /// Build state directly from banks (tests, embedding).
    pub fn with_banks(banks: Vec<TopicBank>, settings: QuizSettings) -> Self {
        let banks = banks.into_iter().map(|b| (b.topic.clone(), b)).collect();
        Self {
            banks: Arc::new(banks),
            sessions: Arc::new(RwLock::new(HashMap::new())),
            settings,
        }
    }

    pub fn bank(&self, topic: &str) -> Option<&TopicBank> {
        self.banks.get(topic)
    }

    /// Topic banks in stable (alphabetical) order for listing.
    pub fn topics(&self) -> Vec<&TopicBank> {
        let mut out: Vec<&TopicBank> = self.banks.values().collect();
        out.sort_by(|a, b| a.topic.cmp(&b.topic));
        out
    }

    /// Start a quiz session and store it. Errs with a client-facing message
    /// when the topic is unknown or the filtered pool is empty.
    #[instrument(level = "info", skip(self), fields(%topic, ?subtopics))]
    pub async fn start_session(
        &self,
        topic: &str,
        subtopics: &[String],
        mode: QuizMode,
        count: Option<usize>,
    ) -> Result<(String, usize), String> {
        let bank = self
            .bank(topic)
            .ok_or_else(|| format!("Unknown topic: {topic}"))?;
        let per_quiz = count.unwrap_or(self.settings.questions_per_quiz);
        // ThreadRng is !Send; keep it out of scope before the lock await.
        let session = {
            let mut rng = rand::thread_rng();
            QuizSession::start(bank, subtopics, mode, per_quiz, &mut rng)
        }
        .ok_or_else(|| "No questions match the selected subtopics".to_string())?;

        let id = session.id.clone();
        let total = session.questions.len();
        info!(target: "quiz", session = %id, %topic, total, ?mode, "Quiz session started");
        self.sessions.write().await.insert(id.clone(), session);
        Ok((id, total))
    }

    /// Snapshot of a session by id.
    pub async fn session(&self, id: &str) -> Option<QuizSession> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Evaluate an answer against the session's current question, record
    /// it, and advance. Also returns the question's explanation for the
    /// feedback panel. `None` for unknown session ids.
    #[instrument(level = "info", skip(self, answer), fields(session = %id, answer_len = answer.len()))]
    pub async fn submit_answer(&self, id: &str, answer: &str) -> Option<(AnswerRecord, String, bool)> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(id)?;
        let explanation = session.current()?.explanation.clone();
        let record = session.submit(answer)?;
        let finished = session.is_finished();
        info!(
            target: "quiz",
            session = %id,
            question = record.question_id,
            correct = record.correct,
            finished,
            "Answer evaluated"
        );
        Some((record, explanation, finished))
    }

    /// Results summary plus per-question review records.
    pub async fn results(&self, id: &str) -> Option<(Summary, Vec<AnswerRecord>)> {
        let sessions = self.sessions.read().await;
        let session = sessions.get(id)?;
        Some((session.summary(), session.answers.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QuizSettings;

    fn state() -> AppState {
        AppState::with_banks(seed_banks(), QuizSettings { questions_per_quiz: 10 })
    }

    #[tokio::test]
    async fn session_lifecycle_over_state() {
        let state = state();
        let (id, total) = state
            .start_session("partitive", &[], QuizMode::Written, None)
            .await
            .expect("session");
        assert!(total > 0);

        // Drive the whole quiz through the state API.
        for _ in 0..total {
            let current = state.session(&id).await.unwrap();
            let answer = current.current().unwrap().answer.clone();
            let (record, _, _) = state.submit_answer(&id, &answer).await.unwrap();
            assert!(record.correct);
        }
        let (summary, review) = state.results(&id).await.unwrap();
        assert_eq!(summary.correct, total);
        assert_eq!(review.len(), total);

        // Finished sessions reject further answers.
        assert!(state.submit_answer(&id, "extra").await.is_none());
    }

    #[tokio::test]
    async fn unknown_ids_fail_closed() {
        let state = state();
        assert!(state
            .start_session("nosuch", &[], QuizMode::Mcq, None)
            .await
            .is_err());
        assert!(state.session("nope").await.is_none());
        assert!(state.submit_answer("nope", "x").await.is_none());
        assert!(state.results("nope").await.is_none());
    }
}
