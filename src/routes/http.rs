//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Errors come back as 404/422 JSON bodies; evaluation itself never fails.

use std::sync::Arc;

use axum::{
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
  Json,
};
use tracing::instrument;

use crate::logic::*;
use crate::protocol::*;
use crate::state::AppState;

fn not_found(message: String) -> (StatusCode, Json<ErrorOut>) {
  (StatusCode::NOT_FOUND, Json(ErrorOut { message }))
}

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
  Json(HealthOut { ok: true })
}

#[instrument(level = "info", skip(state))]
pub async fn http_list_topics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(list_topics(&state))
}

#[instrument(level = "info", skip(state, body), fields(topic = %body.topic))]
pub async fn http_start_quiz(
  State(state): State<Arc<AppState>>,
  Json(body): Json<StartQuizIn>,
) -> Result<Json<QuizStartedOut>, (StatusCode, Json<ErrorOut>)> {
  start_quiz(&state, body)
    .await
    .map(Json)
    .map_err(|message| (StatusCode::UNPROCESSABLE_ENTITY, Json(ErrorOut { message })))
}

#[instrument(level = "info", skip(state), fields(session = %id))]
pub async fn http_get_question(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<SessionQuestionOut>, (StatusCode, Json<ErrorOut>)> {
  fetch_question(&state, &id).await.map(Json).map_err(not_found)
}

#[instrument(level = "info", skip(state, body), fields(session = %id, answer_len = body.answer.len()))]
pub async fn http_post_answer(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
  Json(body): Json<AnswerIn>,
) -> Result<Json<AnswerOut>, (StatusCode, Json<ErrorOut>)> {
  answer_question(&state, &id, &body.answer)
    .await
    .map(Json)
    .map_err(not_found)
}

#[instrument(level = "info", skip(state), fields(session = %id))]
pub async fn http_get_results(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<ResultsOut>, (StatusCode, Json<ErrorOut>)> {
  quiz_results(&state, &id).await.map(Json).map_err(not_found)
}

#[instrument(level = "info", skip(state, body), fields(topic = %body.topic, set = %body.set_id))]
pub async fn http_score_drag_match(
  State(state): State<Arc<AppState>>,
  Json(body): Json<DragMatchIn>,
) -> Result<Json<ExerciseScoreOut>, (StatusCode, Json<ErrorOut>)> {
  score_drag_match_set(&state, &body).map(Json).map_err(not_found)
}

#[instrument(level = "info", skip(state, body), fields(topic = %body.topic, set = %body.set_id))]
pub async fn http_score_identify(
  State(state): State<Arc<AppState>>,
  Json(body): Json<IdentifyIn>,
) -> Result<Json<ExerciseScoreOut>, (StatusCode, Json<ErrorOut>)> {
  score_identify_set(&state, &body).map(Json).map_err(not_found)
}

#[instrument(level = "info", skip(state, body), fields(topic = %body.topic, set = %body.set_id))]
pub async fn http_score_blanks(
  State(state): State<Arc<AppState>>,
  Json(body): Json<BlanksIn>,
) -> Result<Json<ExerciseScoreOut>, (StatusCode, Json<ErrorOut>)> {
  score_blanks_set(&state, &body).map(Json).map_err(not_found)
}
