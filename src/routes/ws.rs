//! WebSocket upgrade + message loop. Each client message is parsed as JSON and
//! forwarded to core logic. We reply with a single JSON message per request.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{info, error, instrument, debug};

use crate::error::ActionError;
use crate::protocol::{ClientWsMessage, ServerWsMessage, SessionOut, SubmitOut};
use crate::logic::*;
use crate::state::AppState;
use crate::util::trunc_for_log;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "quizdeck_backend", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "quizdeck_backend", "WebSocket connected");
  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        let out = handle_text(&txt, &state).await;
        if let Err(e) = socket.send(Message::Text(out)).await {
          error!(target: "quizdeck_backend", error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "quizdeck_backend", "WebSocket disconnected");
}

/// Parse, dispatch, serialize response. Answer text is logged truncated only.
async fn handle_text(txt: &str, state: &AppState) -> String {
  let reply_msg = match serde_json::from_str::<ClientWsMessage>(txt) {
    Ok(incoming) => {
      match &incoming {
        ClientWsMessage::Answer { question_id, value } => debug!(
          target: "quizdeck_backend",
          kind = incoming.kind(),
          %question_id,
          value_len = value.len(),
          value = %trunc_for_log(value, 40),
          "WS received"
        ),
        other => debug!(target: "quizdeck_backend", kind = other.kind(), "WS received"),
      }
      handle_client_ws(incoming, state).await
    }
    Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
  };

  serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
    serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
  })
}

fn session_or_error(res: Result<SessionOut, ActionError>) -> ServerWsMessage {
  match res {
    Ok(session) => ServerWsMessage::Session { session },
    Err(e) => ServerWsMessage::Error { message: e.to_string() },
  }
}

#[instrument(level = "info", skip(msg, state), fields(kind = msg.kind()))]
async fn handle_client_ws(msg: ClientWsMessage, state: &AppState) -> ServerWsMessage {
  match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,
    ClientWsMessage::GetQuiz => ServerWsMessage::Quiz { quiz: get_quiz(state) },
    ClientWsMessage::GetQuestions => ServerWsMessage::Questions { questions: get_questions(state) },
    ClientWsMessage::GetState => ServerWsMessage::Session { session: get_session(state).await },
    ClientWsMessage::Start => ServerWsMessage::Session { session: do_start(state).await },

    ClientWsMessage::Answer { question_id, value } => session_or_error(do_answer(state, &question_id, &value).await),

    ClientWsMessage::SelfGrade { question_id, grade } => session_or_error(do_self_grade(state, &question_id, grade).await),

    ClientWsMessage::Navigate { index } => ServerWsMessage::Session { session: do_navigate(state, index).await },
    ClientWsMessage::Next => ServerWsMessage::Session { session: do_next(state).await },
    ClientWsMessage::Previous => ServerWsMessage::Session { session: do_previous(state).await },

    ClientWsMessage::Submit { confirm } => match do_submit(state, confirm).await {
      SubmitOut::Submitted { session } => {
        tracing::info!(target: "quiz", "WS submit accepted");
        ServerWsMessage::Session { session }
      }
      SubmitOut::NeedsConfirmation { unanswered_count } => ServerWsMessage::NeedsConfirmation { unanswered_count },
    },

    ClientWsMessage::GetResults => match get_results(state).await {
      Ok(results) => ServerWsMessage::Results { results },
      Err(e) => ServerWsMessage::Error { message: e.to_string() },
    },

    ClientWsMessage::Reset => ServerWsMessage::Session { session: do_reset(state).await },
  }
}
