use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    #[error("Hand {0} is outside the 3..=13 range")]
    InvalidHand(u8),

    #[error("Player index {index} is out of range for {player_count} players")]
    InvalidPlayer { index: usize, player_count: usize },

    #[error("Score matrix is missing hand {0}")]
    MissingHand(u8),

    #[error("Unknown hand key: {0}")]
    UnknownHandKey(String),

    #[error("Hand {hand} has {found} scores, expected {expected}")]
    RaggedRow {
        hand: u8,
        expected: usize,
        found: usize,
    },
}
