// Public API
pub use models::{GameRecord, RecordedPlayer, StoredGame};
pub use repository::{GameRepository, InMemoryGameRepository, PostgresGameRepository};

// Internal modules
mod models;
mod repository;
