//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs parameters and basic result info.

use std::sync::Arc;
use axum::{extract::State, http::StatusCode, response::{IntoResponse, Response}, Json};
use tracing::{info, instrument};

use crate::error::ActionError;
use crate::logic::*;
use crate::protocol::*;
use crate::state::AppState;

impl IntoResponse for ActionError {
  fn into_response(self) -> Response {
    let status = match self {
      ActionError::UnknownQuestion(_) => StatusCode::NOT_FOUND,
      ActionError::NotSelfGraded(_) => StatusCode::UNPROCESSABLE_ENTITY,
      ActionError::NotSubmitted => StatusCode::CONFLICT,
    };
    (status, Json(ErrorOut { error: self.to_string() })).into_response()
  }
}

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state))]
pub async fn http_get_quiz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(get_quiz(&state))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_questions(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(get_questions(&state))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_state(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(get_session(&state).await)
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_start(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(do_start(&state).await)
}

#[instrument(level = "info", skip(state, body), fields(%body.question_id, value_len = body.value.len()))]
pub async fn http_post_answer(
  State(state): State<Arc<AppState>>,
  Json(body): Json<AnswerIn>,
) -> Result<Json<SessionOut>, ActionError> {
  let session = do_answer(&state, &body.question_id, &body.value).await?;
  info!(target: "quiz", id = %body.question_id, unanswered = session.unanswered_count, "HTTP answer recorded");
  Ok(Json(session))
}

#[instrument(level = "info", skip(state, body), fields(%body.question_id, grade = ?body.grade))]
pub async fn http_post_self_grade(
  State(state): State<Arc<AppState>>,
  Json(body): Json<SelfGradeIn>,
) -> Result<Json<SessionOut>, ActionError> {
  Ok(Json(do_self_grade(&state, &body.question_id, body.grade).await?))
}

#[instrument(level = "info", skip(state, body), fields(index = body.index))]
pub async fn http_post_navigate(
  State(state): State<Arc<AppState>>,
  Json(body): Json<NavigateIn>,
) -> impl IntoResponse {
  Json(do_navigate(&state, body.index).await)
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_next(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(do_next(&state).await)
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_previous(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(do_previous(&state).await)
}

/// Body is optional; an empty request means "submit without confirming".
#[instrument(level = "info", skip(state, body))]
pub async fn http_post_submit(
  State(state): State<Arc<AppState>>,
  body: Option<Json<SubmitIn>>,
) -> impl IntoResponse {
  let confirm = body.map(|Json(b)| b.confirm).unwrap_or_default();
  let out = do_submit(&state, confirm).await;
  info!(target: "quiz", %confirm, submitted = matches!(out, SubmitOut::Submitted { .. }), "HTTP submit handled");
  Json(out)
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_results(State(state): State<Arc<AppState>>) -> Result<Json<ResultsOut>, ActionError> {
  Ok(Json(get_results(&state).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_reset(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(do_reset(&state).await)
}
