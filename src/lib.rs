// Library crate for the Thirteen score tracker
// This file exposes the public API for integration tests

pub mod config;
pub mod game;
pub mod history;
pub mod routes;
pub mod scoring;
pub mod shared;
pub mod stats;

// Re-export commonly used types for easier access in tests
pub use config::Config;
pub use game::{GameService, GameSession, Player, SessionPhase};
pub use history::{GameRecord, RecordedPlayer, StoredGame};
pub use scoring::{parse_score, Hand, ScoreMatrix};
pub use shared::{AppError, AppState, PersistenceError};
pub use stats::{Leaderboard, PlayerStats, StatsService};
