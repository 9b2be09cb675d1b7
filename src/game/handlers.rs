use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{info, instrument};

use super::types::{RenamePlayerRequest, SessionResponse, SetScoreRequest, SetScoreResponse};
use crate::history::StoredGame;
use crate::scoring::Hand;
use crate::shared::{AppError, AppState};

/// HTTP handler for starting a new game session
///
/// POST /sessions
#[instrument(name = "create_session", skip(state))]
pub async fn create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionResponse>) {
    let session = state.game_service.create_session().await;
    (StatusCode::CREATED, Json(SessionResponse::from(&session)))
}

/// GET /sessions/:id
#[instrument(name = "get_session", skip(state))]
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state.game_service.get_session(&session_id).await?;
    Ok(Json(SessionResponse::from(&session)))
}

/// DELETE /sessions/:id
#[instrument(name = "discard_session", skip(state))]
pub async fn discard_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.game_service.discard_session(&session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /sessions/:id/players
#[instrument(name = "add_player", skip(state))]
pub async fn add_player(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state.game_service.add_player(&session_id).await?;
    Ok(Json(SessionResponse::from(&session)))
}

/// DELETE /sessions/:id/players
///
/// Removes the last player. Leaves the session untouched at two players.
#[instrument(name = "remove_player", skip(state))]
pub async fn remove_player(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state.game_service.remove_player(&session_id).await?;
    Ok(Json(SessionResponse::from(&session)))
}

/// PUT /sessions/:id/players/:index
#[instrument(name = "rename_player", skip(state))]
pub async fn rename_player(
    State(state): State<AppState>,
    Path((session_id, index)): Path<(String, usize)>,
    Json(request): Json<RenamePlayerRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state
        .game_service
        .rename_player(&session_id, index, request.name)
        .await?;
    Ok(Json(SessionResponse::from(&session)))
}

/// PUT /sessions/:id/scores
#[instrument(name = "set_score", skip(state))]
pub async fn set_score(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(request): Json<SetScoreRequest>,
) -> Result<Json<SetScoreResponse>, AppError> {
    let hand = Hand::new(request.hand)?;
    let (stored, session) = state
        .game_service
        .set_score(&session_id, hand, request.player_index, &request.value)
        .await?;
    Ok(Json(SetScoreResponse {
        stored,
        session: SessionResponse::from(&session),
    }))
}

/// POST /sessions/:id/reset
#[instrument(name = "reset_session", skip(state))]
pub async fn reset_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state.game_service.reset(&session_id).await?;
    Ok(Json(SessionResponse::from(&session)))
}

/// POST /sessions/:id/submit
///
/// Returns the stored game record
#[instrument(name = "submit_session", skip(state))]
pub async fn submit_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<(StatusCode, Json<StoredGame>), AppError> {
    let stored = state.game_service.submit(&session_id).await?;
    info!(game_id = %stored.id, "Game submitted");
    Ok((StatusCode::CREATED, Json(stored)))
}
