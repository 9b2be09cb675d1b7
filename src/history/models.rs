use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::game::Player;
use crate::scoring::ScoreMatrix;

/// One player's line in a finished game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedPlayer {
    pub name: String,
    pub index: usize,
    pub is_winner: bool,
    pub score: u32,
}

/// Immutable snapshot of a finished game, ready to persist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub date: DateTime<Utc>,
    pub players: Vec<RecordedPlayer>,
    pub scores: ScoreMatrix,
}

impl GameRecord {
    /// Snapshots a finished game. The matrix is copied so later edits to a
    /// live session never leak into the record.
    pub fn build(
        players: &[Player],
        matrix: &ScoreMatrix,
        winner_index: usize,
        now: DateTime<Utc>,
    ) -> Self {
        let players = players
            .iter()
            .map(|player| RecordedPlayer {
                name: player.name.clone(),
                index: player.index,
                is_winner: player.index == winner_index,
                score: matrix.total(player.index),
            })
            .collect();

        Self {
            date: now,
            players,
            scores: matrix.clone(),
        }
    }

    pub fn winner(&self) -> Option<&RecordedPlayer> {
        self.players.iter().find(|p| p.is_winner)
    }
}

/// A game record as held by a repository, with its assigned identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredGame {
    pub id: String,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub record: GameRecord,
}
