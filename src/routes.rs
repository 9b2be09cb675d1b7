use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::game;
use crate::shared::AppState;
use crate::stats;

/// Builds the HTTP API around the given state
pub fn router(state: AppState, cors_allow_any: bool) -> Router {
    let router = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/sessions", post(game::create_session))
        .route(
            "/sessions/:id",
            get(game::get_session).delete(game::discard_session),
        )
        .route(
            "/sessions/:id/players",
            post(game::add_player).delete(game::remove_player),
        )
        .route("/sessions/:id/players/:index", put(game::rename_player))
        .route("/sessions/:id/scores", put(game::set_score))
        .route("/sessions/:id/reset", post(game::reset_session))
        .route("/sessions/:id/submit", post(game::submit_session))
        .route("/games", get(stats::list_games))
        .route("/players", get(stats::list_players))
        .route("/leaderboard", get(stats::get_leaderboard))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if cors_allow_any {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}
