//! Error types: document validation, startup loading, and API-level rejections.

use thiserror::Error;

/// A quiz document that cannot back a session.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
  #[error("scoring tier list is empty")]
  EmptyTiers,
  #[error("scoring tiers must be ordered by descending min: '{label}' (min {min}) follows min {previous}")]
  TiersNotDescending { label: String, min: f64, previous: f64 },
  #[error("duplicate question id: {id}")]
  DuplicateQuestionId { id: String },
  #[error("mcq '{id}': correct answer '{correct_answer}' matches {matches} option keys, expected exactly one")]
  InvalidCorrectAnswer { id: String, correct_answer: String, matches: usize },
}

/// Fatal startup failure while loading the quiz document.
#[derive(Debug, Error)]
pub enum LoadError {
  #[error("failed to read quiz document {path}: {source}")]
  Io { path: String, #[source] source: std::io::Error },
  #[error("failed to parse quiz document {path}: {source}")]
  Parse { path: String, #[source] source: serde_json::Error },
  #[error("invalid quiz document: {0}")]
  Invalid(#[from] ValidationError),
}

/// Requests the API refuses. Core transitions themselves never fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionError {
  #[error("unknown questionId: {0}")]
  UnknownQuestion(String),
  #[error("question {0} is auto-graded and cannot be self-graded")]
  NotSelfGraded(String),
  #[error("results are only available after the quiz is submitted")]
  NotSubmitted,
}
