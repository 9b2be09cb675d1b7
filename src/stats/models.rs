use serde::{Deserialize, Serialize};

use crate::history::RecordedPlayer;

/// Cumulative record for one player, keyed by display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub name: String,
    pub wins: u32,
    pub games_played: u32,
    pub highest_score: u32,
    /// `None` until the player has a recorded game. A real score of 0 is
    /// kept as `Some(0)` and never mistaken for "unset".
    pub lowest_score: Option<u32>,
}

impl PlayerStats {
    /// Stats for a name seen for the first time
    pub fn from_result(entry: &RecordedPlayer) -> Self {
        Self {
            name: entry.name.clone(),
            wins: u32::from(entry.is_winner),
            games_played: 1,
            highest_score: entry.score,
            lowest_score: Some(entry.score),
        }
    }

    /// Folds one more game into existing stats
    pub fn apply(&mut self, entry: &RecordedPlayer) {
        self.wins += u32::from(entry.is_winner);
        self.games_played += 1;
        self.highest_score = self.highest_score.max(entry.score);
        self.lowest_score = Some(match self.lowest_score {
            None => entry.score,
            Some(lowest) => lowest.min(entry.score),
        });
    }

    /// Spread between best and worst game, if any game was played
    pub fn score_range(&self) -> Option<u32> {
        if self.games_played == 0 {
            return None;
        }
        self.lowest_score
            .map(|lowest| self.highest_score.saturating_sub(lowest))
    }
}
