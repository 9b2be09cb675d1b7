use serde::{Deserialize, Serialize};

use super::models::{GameSession, Player, SessionPhase};
use chrono::{DateTime, Utc};

use crate::scoring::ScoreMatrix;

/// Request payload for renaming a player
#[derive(Debug, Deserialize)]
pub struct RenamePlayerRequest {
    pub name: String,
}

/// Request payload for entering a score.
/// `hand` is checked by the handler; `value` is the raw text typed by the
/// user and is parsed leniently.
#[derive(Debug, Deserialize)]
pub struct SetScoreRequest {
    pub hand: u8,
    pub player_index: usize,
    pub value: String,
}

/// View of a game session with its derived totals
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub id: String,
    pub phase: SessionPhase,
    pub started: bool,
    pub players: Vec<Player>,
    pub scores: ScoreMatrix,
    pub totals: Vec<u32>,
    pub leader: usize,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

impl From<&GameSession> for SessionResponse {
    fn from(session: &GameSession) -> Self {
        Self {
            id: session.id.clone(),
            phase: session.phase(),
            started: session.is_started(),
            players: session.players().to_vec(),
            scores: session.scores().clone(),
            totals: session.totals(),
            leader: session.leader(),
            created_at: session.created_at,
            last_activity: session.last_activity(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SetScoreResponse {
    pub stored: u32,
    pub session: SessionResponse,
}
