use thiserror::Error;

use crate::shared::PersistenceError;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// The game was stored, but some players' stats could not be updated
    #[error("Game {game_id} stored, but stats update failed for {failed_players:?}: {source}")]
    PartialUpdate {
        game_id: String,
        failed_players: Vec<String>,
        #[source]
        source: PersistenceError,
    },

    #[error("Validation error: {0}")]
    Validation(String),
}
