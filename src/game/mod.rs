// Public API
pub use cleanup_task::{start_cleanup_task, CleanupConfig};
pub use errors::GameError;
pub use handlers::{
    add_player, create_session, discard_session, get_session, remove_player, rename_player,
    reset_session, set_score, submit_session,
};
pub use models::{GameSession, Player, SessionPhase, MIN_PLAYERS};
pub use repository::SessionRepository;
pub use service::GameService;
pub use types::{RenamePlayerRequest, SessionResponse, SetScoreRequest, SetScoreResponse};

// Internal modules
mod cleanup_task;
mod errors;
mod handlers;
mod models;
mod repository;
mod service;
mod types;
