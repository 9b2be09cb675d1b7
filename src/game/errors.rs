use thiserror::Error;

use crate::scoring::ScoringError;
use crate::stats::StatsError;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("Game session not found: {0}")]
    SessionNotFound(String),

    #[error("Game session {0} has already been submitted")]
    AlreadySubmitted(String),

    #[error(transparent)]
    Scoring(#[from] ScoringError),

    #[error(transparent)]
    Stats(#[from] StatsError),
}
