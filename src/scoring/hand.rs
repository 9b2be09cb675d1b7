use serde::{Deserialize, Serialize};
use std::fmt;

use super::ScoringError;

pub const MIN_HAND: u8 = 3;
pub const MAX_HAND: u8 = 13;
pub const HAND_COUNT: usize = (MAX_HAND - MIN_HAND + 1) as usize;

/// One round of Thirteen, identified by the number of cards dealt (3 through 13)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Hand(u8);

impl Hand {
    pub fn new(cards: u8) -> Result<Self, ScoringError> {
        if (MIN_HAND..=MAX_HAND).contains(&cards) {
            Ok(Self(cards))
        } else {
            Err(ScoringError::InvalidHand(cards))
        }
    }

    /// All hands in play order
    pub fn all() -> impl Iterator<Item = Hand> {
        (MIN_HAND..=MAX_HAND).map(Hand)
    }

    pub fn cards(self) -> u8 {
        self.0
    }

    /// Row position of this hand inside a score matrix
    pub(crate) fn offset(self) -> usize {
        (self.0 - MIN_HAND) as usize
    }
}

impl TryFrom<u8> for Hand {
    type Error = ScoringError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Hand::new(value)
    }
}

impl From<Hand> for u8 {
    fn from(hand: Hand) -> Self {
        hand.0
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
