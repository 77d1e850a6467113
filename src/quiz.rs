//! Validated quiz: the document plus its flattened question sequence.

use std::sync::Arc;

use crate::domain::{QuizData, QuizMeta, ScoringTier, Section};
use crate::error::ValidationError;
use crate::flatten::{flatten, FlattenedQuestion};
use crate::review::{self, Progress, ReviewItem};
use crate::scoring::{self, ScoreReport};
use crate::session::{self, QuizState};

/// Only constructed from a document that passed validation. The flattened
/// sequence is built once per document and shared.
#[derive(Clone, Debug)]
pub struct Quiz {
  data: Arc<QuizData>,
  questions: Arc<[FlattenedQuestion]>,
  auto_graded_section: String,
}

impl Quiz {
  pub fn new(data: QuizData, auto_graded_section: impl Into<String>) -> Result<Self, ValidationError> {
    data.validate()?;
    let questions: Arc<[FlattenedQuestion]> = flatten(&data).into();
    Ok(Self { data: Arc::new(data), questions, auto_graded_section: auto_graded_section.into() })
  }

  pub fn meta(&self) -> &QuizMeta { &self.data.meta }
  pub fn sections(&self) -> &[Section] { &self.data.sections }
  pub fn tiers(&self) -> &[ScoringTier] { &self.data.scoring.tiers }
  pub fn questions(&self) -> &[FlattenedQuestion] { &self.questions }
  pub fn auto_graded_section(&self) -> &str { &self.auto_graded_section }
  pub fn len(&self) -> usize { self.questions.len() }

  pub fn find(&self, question_id: &str) -> Option<&FlattenedQuestion> {
    self.questions.iter().find(|q| q.question.id() == question_id)
  }

  pub fn current(&self, state: &QuizState) -> Option<&FlattenedQuestion> {
    self.questions.get(state.current_question_index)
  }

  pub fn unanswered_count(&self, state: &QuizState) -> usize {
    session::unanswered_count(&self.questions, &state.answers)
  }

  pub fn score(&self, state: &QuizState) -> ScoreReport {
    scoring::score(&self.questions, &state.answers, &state.self_grades, self.tiers(), &self.auto_graded_section)
  }

  pub fn progress(&self, state: &QuizState) -> Progress {
    review::progress(&self.questions, state)
  }

  pub fn review(&self, state: &QuizState) -> Vec<ReviewItem> {
    review::review(&self.questions, state, &self.auto_graded_section)
  }
}
