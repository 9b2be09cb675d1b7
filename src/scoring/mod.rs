// Public API
pub use errors::ScoringError;
pub use hand::{Hand, HAND_COUNT, MAX_HAND, MIN_HAND};
pub use matrix::{parse_score, ScoreMatrix};

// Internal modules
mod errors;
mod hand;
mod matrix;
mod totals;
