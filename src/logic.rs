//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! Each write runs one state transition and answers with the resulting
//! session snapshot. Requests naming unknown questions are refused before any
//! transition runs.

use tracing::{info, instrument, warn};

use crate::domain::SelfGrade;
use crate::error::ActionError;
use crate::protocol::{question_out, quiz_out, session_out, QuestionOut, QuizOut, ResultsOut, SessionOut, SubmitOut};
use crate::session::QuizState;
use crate::state::AppState;
use crate::util::trunc_for_log;

pub fn get_quiz(state: &AppState) -> QuizOut {
  quiz_out(&state.quiz)
}

pub fn get_questions(state: &AppState) -> Vec<QuestionOut> {
  state.quiz.questions().iter().map(question_out).collect()
}

pub async fn get_session(state: &AppState) -> SessionOut {
  session_out(&state.quiz, state.snapshot().await)
}

#[instrument(level = "info", skip(state))]
pub async fn do_start(state: &AppState) -> SessionOut {
  let next = state.transition("start", QuizState::start).await;
  info!(target: "quiz", questions = state.quiz.len(), "Quiz started");
  session_out(&state.quiz, next)
}

#[instrument(level = "info", skip(state, question_id, value), fields(%question_id, value_len = value.len()))]
pub async fn do_answer(state: &AppState, question_id: &str, value: &str) -> Result<SessionOut, ActionError> {
  if state.quiz.find(question_id).is_none() {
    warn!(target: "quiz", %question_id, "Answer for unknown question ignored");
    return Err(ActionError::UnknownQuestion(question_id.to_string()));
  }
  let next = state.transition("answer", |s| s.with_answer(question_id, value)).await;
  info!(target: "quiz", %question_id, value = %trunc_for_log(value, 40), "Answer recorded");
  Ok(session_out(&state.quiz, next))
}

#[instrument(level = "info", skip(state, question_id), fields(%question_id))]
pub async fn do_self_grade(state: &AppState, question_id: &str, grade: SelfGrade) -> Result<SessionOut, ActionError> {
  let Some(item) = state.quiz.find(question_id) else {
    warn!(target: "quiz", %question_id, "Self-grade for unknown question ignored");
    return Err(ActionError::UnknownQuestion(question_id.to_string()));
  };
  if !item.question.is_self_graded() {
    warn!(target: "quiz", %question_id, "Self-grade for auto-graded question refused");
    return Err(ActionError::NotSelfGraded(question_id.to_string()));
  }
  let next = state.transition("self_grade", |s| s.with_self_grade(question_id, grade)).await;
  info!(target: "quiz", %question_id, ?grade, "Self-grade recorded");
  Ok(session_out(&state.quiz, next))
}

#[instrument(level = "info", skip(state))]
pub async fn do_navigate(state: &AppState, index: i64) -> SessionOut {
  let len = state.quiz.len();
  let next = state.transition("navigate", |s| s.navigate(index, len)).await;
  session_out(&state.quiz, next)
}

pub async fn do_next(state: &AppState) -> SessionOut {
  let len = state.quiz.len();
  session_out(&state.quiz, state.transition("next", |s| s.next(len)).await)
}

pub async fn do_previous(state: &AppState) -> SessionOut {
  let len = state.quiz.len();
  session_out(&state.quiz, state.transition("previous", |s| s.previous(len)).await)
}

/// Unanswered questions block submission until the client confirms.
#[instrument(level = "info", skip(state))]
pub async fn do_submit(state: &AppState, confirm: bool) -> SubmitOut {
  let quiz = &state.quiz;
  let (next, unanswered_count) = state
    .transition_with("submit", |s| {
      let unanswered = quiz.unanswered_count(s);
      if unanswered > 0 && !confirm {
        (s.clone(), unanswered)
      } else {
        (s.submit(), unanswered)
      }
    })
    .await;
  if unanswered_count > 0 && !confirm {
    info!(target: "quiz", unanswered_count, "Submit needs confirmation");
    return SubmitOut::NeedsConfirmation { unanswered_count };
  }
  info!(target: "quiz", unanswered_count, "Quiz submitted");
  SubmitOut::Submitted { session: session_out(quiz, next) }
}

#[instrument(level = "info", skip(state))]
pub async fn get_results(state: &AppState) -> Result<ResultsOut, ActionError> {
  let snapshot = state.snapshot().await;
  if !snapshot.submitted {
    return Err(ActionError::NotSubmitted);
  }
  let score = state.quiz.score(&snapshot);
  info!(
    target: "quiz",
    percentage = %format!("{:.1}", score.percentage),
    tier = %score.tier_label,
    pending = score.self_graded_pending,
    "Results computed"
  );
  Ok(ResultsOut { review: state.quiz.review(&snapshot), score })
}

#[instrument(level = "info", skip(state))]
pub async fn do_reset(state: &AppState) -> SessionOut {
  let next = state.transition("reset", QuizState::reset).await;
  info!(target: "quiz", "Quiz reset");
  session_out(&state.quiz, next)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::QuizConfig;
  use crate::session::Phase;

  fn app() -> AppState {
    AppState::new(QuizConfig::default()).expect("sample quiz")
  }

  #[tokio::test]
  async fn unknown_questions_are_refused() {
    let state = app();
    assert_eq!(
      do_answer(&state, "zz", "x").await.err(),
      Some(ActionError::UnknownQuestion("zz".into()))
    );
    assert!(state.snapshot().await.answers.is_empty());
  }

  #[tokio::test]
  async fn mcq_cannot_be_self_graded() {
    let state = app();
    assert_eq!(
      do_self_grade(&state, "a1", SelfGrade::Correct).await.err(),
      Some(ActionError::NotSelfGraded("a1".into()))
    );
    assert!(state.snapshot().await.self_grades.is_empty());
  }

  #[tokio::test]
  async fn submit_asks_for_confirmation_when_unanswered() {
    let state = app();
    do_start(&state).await;
    do_answer(&state, "a1", "b").await.expect("answer");

    match do_submit(&state, false).await {
      SubmitOut::NeedsConfirmation { unanswered_count } => assert_eq!(unanswered_count, 7),
      other => panic!("unexpected {other:?}"),
    }
    assert_eq!(state.snapshot().await.phase(), Phase::InProgress);

    match do_submit(&state, true).await {
      SubmitOut::Submitted { session } => assert_eq!(session.phase, Phase::Submitted),
      other => panic!("unexpected {other:?}"),
    }
  }

  #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
  async fn unconfirmed_submit_never_races_past_a_blank_answer() {
    let state = std::sync::Arc::new(app());
    let ids: Vec<String> = state.quiz.questions().iter().map(|q| q.question.id().to_string()).collect();

    for _ in 0..200 {
      do_reset(&state).await;
      do_start(&state).await;
      for id in &ids {
        do_answer(&state, id, "x").await.expect("answer");
      }

      let blanker = {
        let state = state.clone();
        tokio::spawn(async move { do_answer(&state, "a1", "").await.expect("answer") })
      };
      let submitter = {
        let state = state.clone();
        tokio::spawn(async move { do_submit(&state, false).await })
      };

      let out = submitter.await.expect("submit task");
      blanker.await.expect("answer task");
      match out {
        SubmitOut::Submitted { session } => assert_eq!(session.unanswered_count, 0),
        SubmitOut::NeedsConfirmation { unanswered_count } => {
          assert_eq!(unanswered_count, 1);
          assert!(!state.snapshot().await.submitted);
        }
      }
    }
  }

  #[tokio::test]
  async fn results_require_submission() {
    let state = app();
    do_start(&state).await;
    assert_eq!(get_results(&state).await.err(), Some(ActionError::NotSubmitted));
  }

  #[tokio::test]
  async fn full_session_flow() {
    let state = app();
    let s = do_start(&state).await;
    assert_eq!(s.current.as_ref().map(|q| q.id.as_str()), Some("a1"));

    for (id, value) in [("a1", "b"), ("a2", "a"), ("a3", "b"), ("a4", "b"), ("b1", "types"), ("b2", "yes"), ("c1", "wrap"), ("c2", "odd")] {
      do_answer(&state, id, value).await.expect("answer");
    }
    let s = do_next(&state).await;
    assert_eq!(s.progress.position, 2);
    let s = do_navigate(&state, 42).await;
    assert_eq!(s.progress.position, 2);
    let s = do_previous(&state).await;
    assert!(s.progress.is_first);

    assert!(matches!(do_submit(&state, false).await, SubmitOut::Submitted { .. }));
    for (id, grade) in [("b1", SelfGrade::Correct), ("b2", SelfGrade::Correct), ("c1", SelfGrade::Partial), ("c2", SelfGrade::Incorrect)] {
      do_self_grade(&state, id, grade).await.expect("grade");
    }

    let results = get_results(&state).await.expect("results");
    // 3 of 4 MCQs, 2.5 of 4 self-graded: 5.5 / 8
    assert_eq!(results.score.mcq_correct, 3);
    assert_eq!(results.score.self_graded_equivalent, 2.5);
    assert_eq!(results.score.percentage, 68.75);
    assert_eq!(results.score.tier_label, "Developing");
    assert_eq!(results.review.len(), 8);

    let s = do_reset(&state).await;
    assert_eq!(s.phase, Phase::NotStarted);
    assert_eq!(s.state, QuizState::default());
    assert_eq!(s.unanswered_count, 8);
  }

  #[test]
  fn public_questions_hide_answer_keys() {
    let state = app();
    let json = serde_json::to_string(&get_questions(&state)).expect("serialize");
    assert!(!json.contains("correctAnswer"));
    assert!(!json.contains("modelAnswer"));
    assert_eq!(get_quiz(&state).question_count, 8);
  }
}
