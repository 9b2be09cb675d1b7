use axum::{extract::State, Json};
use tracing::{info, instrument};

use super::{leaderboard::Leaderboard, models::PlayerStats};
use crate::history::StoredGame;
use crate::shared::{AppError, AppState};

/// HTTP handler for the game history
///
/// GET /games
/// Returns every recorded game, newest first
#[instrument(name = "list_games", skip(state))]
pub async fn list_games(State(state): State<AppState>) -> Result<Json<Vec<StoredGame>>, AppError> {
    let games = state.stats_service.list_games().await?;
    info!(game_count = games.len(), "Games listed");
    Ok(Json(games))
}

/// GET /players
#[instrument(name = "list_players", skip(state))]
pub async fn list_players(
    State(state): State<AppState>,
) -> Result<Json<Vec<PlayerStats>>, AppError> {
    let players = state.stats_service.list_players().await?;
    Ok(Json(players))
}

/// GET /leaderboard
#[instrument(name = "get_leaderboard", skip(state))]
pub async fn get_leaderboard(State(state): State<AppState>) -> Result<Json<Leaderboard>, AppError> {
    let board = state.stats_service.leaderboard().await?;
    Ok(Json(board))
}
