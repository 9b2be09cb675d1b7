pub mod aggregator;
pub mod handlers;
pub mod leaderboard;
pub mod service;

mod errors;
pub mod models;
pub mod repository;

pub use errors::StatsError;
pub use handlers::{get_leaderboard, list_games, list_players};
pub use leaderboard::{ConsistentPlayer, Leaderboard, ScoreHolder, LEADERBOARD_SIZE};
pub use models::PlayerStats;
pub use repository::{
    InMemoryPlayerStatsRepository, PlayerStatsRepository, PostgresPlayerStatsRepository,
};
pub use service::StatsService;
