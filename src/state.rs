//! Application state: the validated quiz, service config, and the one
//! in-memory quiz session.
//!
//! All session mutation goes through `transition`, which swaps in the state
//! value computed from the previous one while holding the write lock.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use crate::config::{load_quiz, QuizConfig};
use crate::error::LoadError;
use crate::quiz::Quiz;
use crate::session::QuizState;

#[derive(Clone)]
pub struct AppState {
    pub quiz: Quiz,
    pub config: QuizConfig,
    session: Arc<RwLock<QuizState>>,
}

impl AppState {
    /// Build state from config: load and validate the document, start a fresh session.
    #[instrument(level = "info", skip_all)]
    pub fn new(config: QuizConfig) -> Result<Self, LoadError> {
        let quiz = load_quiz(&config)?;
        info!(
            target: "quizdeck_backend",
            title = %quiz.meta().title,
            sections = quiz.sections().len(),
            questions = quiz.len(),
            tiers = quiz.tiers().len(),
            auto_graded_section = %quiz.auto_graded_section(),
            "Quiz ready"
        );
        Ok(Self::with_quiz(quiz, config))
    }

    pub fn with_quiz(quiz: Quiz, config: QuizConfig) -> Self {
        Self { quiz, config, session: Arc::new(RwLock::new(QuizState::default())) }
    }

    /// Copy of the current session state.
    pub async fn snapshot(&self) -> QuizState {
        self.session.read().await.clone()
    }

    /// Replace the session with `f(current)` and return the new value.
    pub async fn transition<F>(&self, op: &'static str, f: F) -> QuizState
    where
        F: FnOnce(&QuizState) -> QuizState,
    {
        self.transition_with(op, |s| (f(s), ())).await.0
    }

    /// Like `transition`, but `f` also returns a decision computed from the
    /// same guarded value. Check and update happen under one write lock.
    #[instrument(level = "debug", skip(self, f))]
    pub async fn transition_with<F, R>(&self, op: &'static str, f: F) -> (QuizState, R)
    where
        F: FnOnce(&QuizState) -> (QuizState, R),
    {
        let mut guard = self.session.write().await;
        let (next, decision) = f(&*guard);
        if next != *guard {
            debug!(target: "quiz", op, phase = ?next.phase(), index = next.current_question_index, "Session updated");
        } else {
            debug!(target: "quiz", op, "Session unchanged");
        }
        *guard = next.clone();
        (next, decision)
    }
}
