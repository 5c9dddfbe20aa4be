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
use tracing::{debug, error, info, instrument};

use crate::logic::*;
use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "taito_backend", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "taito_backend", "WebSocket connected");
  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        // Parse, dispatch, serialize response.
        let reply_msg = match serde_json::from_str::<ClientWsMessage>(&txt) {
          Ok(incoming) => {
            debug!(target: "taito_backend", "WS received: {:?}", &incoming);
            handle_client_ws(incoming, &state).await
          }
          Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
        };

        let out = serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
          serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
        });

        if let Err(e) = socket.send(Message::Text(out)).await {
          error!(target: "taito_backend", error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "taito_backend", "WebSocket disconnected");
}

#[instrument(level = "info", skip(state))]
async fn handle_client_ws(msg: ClientWsMessage, state: &AppState) -> ServerWsMessage {
  match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,

    ClientWsMessage::ListTopics => ServerWsMessage::Topics { topics: list_topics(state) },

    ClientWsMessage::StartQuiz { topic, subtopics, mode, count } => {
      match start_quiz(state, crate::protocol::StartQuizIn { topic, subtopics, mode, count }).await {
        Ok(started) => ServerWsMessage::QuizStarted {
          session_id: started.session_id,
          total: started.total,
        },
        Err(message) => ServerWsMessage::Error { message },
      }
    }

    ClientWsMessage::GetQuestion { session_id } => match fetch_question(state, &session_id).await {
      Ok(q) => ServerWsMessage::Question { finished: q.finished, question: q.question },
      Err(message) => ServerWsMessage::Error { message },
    },

    ClientWsMessage::SubmitAnswer { session_id, answer } => {
      match answer_question(state, &session_id, &answer).await {
        Ok(out) => {
          tracing::info!(target: "quiz", session = %session_id, correct = out.correct, "WS submit_answer evaluated");
          ServerWsMessage::AnswerResult {
            correct: out.correct,
            expected: out.expected,
            explanation: out.explanation,
            finished: out.finished,
          }
        }
        Err(message) => ServerWsMessage::Error { message },
      }
    }

    ClientWsMessage::GetResults { session_id } => match quiz_results(state, &session_id).await {
      Ok(r) => ServerWsMessage::Results { summary: r.summary, review: r.review },
      Err(message) => ServerWsMessage::Error { message },
    },

    ClientWsMessage::ScoreDragMatch { topic, set_id, placements } => {
      let req = crate::protocol::DragMatchIn { topic, set_id, placements };
      match score_drag_match_set(state, &req) {
        Ok(out) => ServerWsMessage::ExerciseResult(out),
        Err(message) => ServerWsMessage::Error { message },
      }
    }

    ClientWsMessage::ScoreIdentify { topic, set_id, selected } => {
      let req = crate::protocol::IdentifyIn { topic, set_id, selected };
      match score_identify_set(state, &req) {
        Ok(out) => ServerWsMessage::ExerciseResult(out),
        Err(message) => ServerWsMessage::Error { message },
      }
    }

    ClientWsMessage::ScoreBlanks { topic, set_id, values } => {
      let req = crate::protocol::BlanksIn { topic, set_id, values };
      match score_blanks_set(state, &req) {
        Ok(out) => ServerWsMessage::ExerciseResult(out),
        Err(message) => ServerWsMessage::Error { message },
      }
    }
  }
}
