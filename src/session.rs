//! Quiz session state machine.
//!
//! `QuizState` is a value: every transition borrows the current state and
//! returns the next one. The owner swaps the whole value in, so a transition
//! is never observed half-applied.
//!
//! Phases: NotStarted -> InProgress -> Submitted, and `reset` from anywhere
//! back to NotStarted.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::SelfGrade;
use crate::flatten::FlattenedQuestion;

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
  NotStarted,
  InProgress,
  Submitted,
}

#[derive(Clone, Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuizState {
  pub current_question_index: usize,
  /// Question id -> answer. For MCQs the value is an option key.
  pub answers: BTreeMap<String, String>,
  pub self_grades: BTreeMap<String, SelfGrade>,
  pub submitted: bool,
  pub started: bool,
}

/// An answer counts once it has non-whitespace content.
pub fn is_answered(value: Option<&str>) -> bool {
  value.map_or(false, |v| !v.trim().is_empty())
}

/// Questions with no answer or a blank one. Computed on every call.
pub fn unanswered_count(questions: &[FlattenedQuestion], answers: &BTreeMap<String, String>) -> usize {
  questions
    .iter()
    .filter(|q| !is_answered(answers.get(q.question.id()).map(String::as_str)))
    .count()
}

impl QuizState {
  pub fn phase(&self) -> Phase {
    match (self.started, self.submitted) {
      (false, _) => Phase::NotStarted,
      (true, false) => Phase::InProgress,
      (true, true) => Phase::Submitted,
    }
  }

  /// Enters the quiz. Answers already given are kept.
  pub fn start(&self) -> Self {
    Self { started: true, ..self.clone() }
  }

  /// Last write wins; an empty value is stored and reads as unanswered.
  pub fn with_answer(&self, question_id: &str, value: &str) -> Self {
    let mut next = self.clone();
    next.answers.insert(question_id.to_string(), value.to_string());
    next
  }

  pub fn with_self_grade(&self, question_id: &str, grade: SelfGrade) -> Self {
    let mut next = self.clone();
    next.self_grades.insert(question_id.to_string(), grade);
    next
  }

  /// Moves to `index` when it is inside `[0, len)`; anything else leaves the
  /// state unchanged.
  pub fn navigate(&self, index: i64, len: usize) -> Self {
    match usize::try_from(index) {
      Ok(i) if i < len => Self { current_question_index: i, ..self.clone() },
      _ => self.clone(),
    }
  }

  pub fn next(&self, len: usize) -> Self {
    self.navigate(self.current_question_index as i64 + 1, len)
  }

  pub fn previous(&self, len: usize) -> Self {
    self.navigate(self.current_question_index as i64 - 1, len)
  }

  /// No precondition: confirming over unanswered questions is the caller's job.
  pub fn submit(&self) -> Self {
    Self { submitted: true, ..self.clone() }
  }

  pub fn reset(&self) -> Self {
    Self::default()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::flatten::flatten;
  use crate::seeds::sample_quiz;

  #[test]
  fn fresh_state_is_not_started() {
    let s = QuizState::default();
    assert_eq!(s.phase(), Phase::NotStarted);
    assert_eq!(s.current_question_index, 0);
  }

  #[test]
  fn lifecycle_phases() {
    let s = QuizState::default().start();
    assert_eq!(s.phase(), Phase::InProgress);
    let s = s.submit();
    assert_eq!(s.phase(), Phase::Submitted);
    let s = s.reset();
    assert_eq!(s, QuizState::default());
    assert_eq!(s.phase(), Phase::NotStarted);
  }

  #[test]
  fn start_keeps_answers() {
    let s = QuizState::default().with_answer("a1", "b").start();
    assert_eq!(s.answers.get("a1").map(String::as_str), Some("b"));
  }

  #[test]
  fn transitions_do_not_touch_the_source_value() {
    let before = QuizState::default().start();
    let _after = before.with_answer("a1", "c").submit();
    assert!(before.answers.is_empty());
    assert!(!before.submitted);
  }

  #[test]
  fn answers_are_last_write_wins_and_idempotent() {
    let s = QuizState::default().start();
    let once = s.with_answer("a1", "b");
    let twice = once.with_answer("a1", "b");
    assert_eq!(once, twice);
    let changed = twice.with_answer("a1", "c");
    assert_eq!(changed.answers["a1"], "c");
  }

  #[test]
  fn self_grade_last_write_wins() {
    let s = QuizState::default()
      .with_self_grade("b1", SelfGrade::Correct)
      .with_self_grade("b1", SelfGrade::Partial);
    assert_eq!(s.self_grades["b1"], SelfGrade::Partial);
  }

  #[test]
  fn out_of_range_navigation_is_ignored() {
    let s = QuizState::default().start().navigate(2, 4);
    assert_eq!(s.current_question_index, 2);
    for bad in [-1, -100, 4, 99] {
      assert_eq!(s.navigate(bad, 4), s);
    }
    assert_eq!(QuizState::default().navigate(0, 0), QuizState::default());
  }

  #[test]
  fn next_and_previous_stop_at_the_ends() {
    let s = QuizState::default().start();
    assert_eq!(s.previous(3).current_question_index, 0);
    let last = s.next(3).next(3);
    assert_eq!(last.current_question_index, 2);
    assert_eq!(last.next(3).current_question_index, 2);
    assert_eq!(last.previous(3).current_question_index, 1);
  }

  #[test]
  fn submit_is_unconditional() {
    let questions = flatten(&sample_quiz());
    let s = QuizState::default().start();
    assert_eq!(unanswered_count(&questions, &s.answers), questions.len());
    assert!(s.submit().submitted);
  }

  #[test]
  fn blank_answers_count_as_unanswered() {
    let questions = flatten(&sample_quiz());
    let s = QuizState::default()
      .with_answer("a1", "")
      .with_answer("a2", "   \n\t")
      .with_answer("c1", " boxing ")
      .with_answer("a3", "b");
    assert_eq!(unanswered_count(&questions, &s.answers), questions.len() - 2);
  }

  #[test]
  fn answers_for_unknown_ids_do_not_reduce_unanswered() {
    let questions = flatten(&sample_quiz());
    let s = QuizState::default().with_answer("nope", "x");
    assert_eq!(unanswered_count(&questions, &s.answers), questions.len());
  }
}
