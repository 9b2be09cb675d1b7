use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use strum_macros::{Display, EnumString};
use uuid::Uuid;

use super::GameError;
use crate::history::GameRecord;
use crate::scoring::{Hand, ScoreMatrix, ScoringError};

/// Fewest players a game can have
pub const MIN_PLAYERS: usize = 2;

/// Roster entry for a game in progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub index: usize,
}

impl Player {
    pub fn new(name: String, index: usize) -> Self {
        Self { name, index }
    }

    /// "Player 1", "Player 2", ... for a 0-based index
    pub fn with_default_name(index: usize) -> Self {
        Self::new(format!("Player {}", index + 1), index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionPhase {
    Setup,
    InProgress,
    Submitted,
}

/// One game being scored. Owns its roster and score matrix until submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    pub id: String,
    players: Vec<Player>,
    scores: ScoreMatrix,
    phase: SessionPhase,
    pub created_at: DateTime<Utc>,
    last_activity: DateTime<Utc>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    pub fn new() -> Self {
        let players = (0..MIN_PLAYERS).map(Player::with_default_name).collect();
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            players,
            scores: ScoreMatrix::new(MIN_PLAYERS),
            phase: SessionPhase::Setup,
            created_at: now,
            last_activity: now,
        }
    }

    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_activity
    }

    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        self.last_activity = self.last_activity.max(now);
    }

    /// Whether the session should leave the live set at `now`: submitted
    /// sessions always, open ones once untouched for `idle_timeout`
    pub fn is_stale(&self, now: DateTime<Utc>, idle_timeout: Duration) -> bool {
        if self.phase == SessionPhase::Submitted {
            return true;
        }
        (now - self.last_activity)
            .to_std()
            .map(|idle| idle >= idle_timeout)
            .unwrap_or(false)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn scores(&self) -> &ScoreMatrix {
        &self.scores
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// True once any score has been entered since the last reset
    pub fn is_started(&self) -> bool {
        self.phase != SessionPhase::Setup
    }

    pub fn add_player(&mut self) -> Result<(), GameError> {
        self.ensure_open()?;
        self.players
            .push(Player::with_default_name(self.players.len()));
        self.scores = ScoreMatrix::new(self.players.len());
        Ok(())
    }

    /// Drops the last player. Returns `false`, changing nothing, when the
    /// roster is already at the minimum.
    pub fn remove_player(&mut self) -> Result<bool, GameError> {
        self.ensure_open()?;
        if self.players.len() <= MIN_PLAYERS {
            return Ok(false);
        }
        self.players.pop();
        self.scores = ScoreMatrix::new(self.players.len());
        Ok(true)
    }

    pub fn rename_player(&mut self, index: usize, name: String) -> Result<(), GameError> {
        self.ensure_open()?;
        let player_count = self.players.len();
        let player = self
            .players
            .get_mut(index)
            .ok_or(ScoringError::InvalidPlayer {
                index,
                player_count,
            })?;
        player.name = name;
        Ok(())
    }

    /// Stores a raw score entry and returns the value kept after clamping
    pub fn set_score(&mut self, hand: Hand, index: usize, raw: &str) -> Result<u32, GameError> {
        self.ensure_open()?;
        let value = self.scores.set_score(hand, index, raw)?;
        self.phase = SessionPhase::InProgress;
        Ok(value)
    }

    pub fn reset(&mut self) -> Result<(), GameError> {
        self.ensure_open()?;
        self.scores = ScoreMatrix::new(self.players.len());
        self.phase = SessionPhase::Setup;
        Ok(())
    }

    pub fn totals(&self) -> Vec<u32> {
        self.scores.totals()
    }

    /// Index of the player currently holding the lowest total
    pub fn leader(&self) -> usize {
        // The roster never drops below MIN_PLAYERS, so a winner always exists
        self.scores.winner().unwrap_or_default()
    }

    /// Builds the record this session would submit at `now`
    pub fn to_record(&self, now: DateTime<Utc>) -> Result<GameRecord, GameError> {
        self.ensure_open()?;
        Ok(GameRecord::build(
            &self.players,
            &self.scores,
            self.leader(),
            now,
        ))
    }

    pub(crate) fn mark_submitted(&mut self) {
        self.phase = SessionPhase::Submitted;
    }

    fn ensure_open(&self) -> Result<(), GameError> {
        if self.phase == SessionPhase::Submitted {
            return Err(GameError::AlreadySubmitted(self.id.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(cards: u8) -> Hand {
        Hand::new(cards).unwrap()
    }

    #[test]
    fn new_session_has_two_default_players() {
        let session = GameSession::new();

        assert_eq!(
            session.players(),
            &[
                Player::new("Player 1".into(), 0),
                Player::new("Player 2".into(), 1)
            ]
        );
        assert_eq!(session.scores(), &ScoreMatrix::new(2));
        assert_eq!(session.phase(), SessionPhase::Setup);
        assert!(!session.is_started());
    }

    #[test]
    fn entering_a_score_starts_the_game() {
        let mut session = GameSession::new();

        let stored = session.set_score(hand(3), 0, "4").unwrap();

        assert_eq!(stored, 4);
        assert_eq!(session.phase(), SessionPhase::InProgress);
        assert!(session.is_started());
    }

    #[test]
    fn changing_player_count_resets_scores() {
        let mut session = GameSession::new();
        session.set_score(hand(7), 1, "9").unwrap();

        session.add_player().unwrap();

        assert_eq!(session.players().len(), 3);
        assert_eq!(session.players()[2].name, "Player 3");
        assert_eq!(session.scores(), &ScoreMatrix::new(3));

        session.set_score(hand(8), 2, "5").unwrap();
        assert!(session.remove_player().unwrap());
        assert_eq!(session.scores(), &ScoreMatrix::new(2));
    }

    #[test]
    fn cannot_drop_below_two_players() {
        let mut session = GameSession::new();
        session.set_score(hand(3), 0, "2").unwrap();

        assert!(!session.remove_player().unwrap());

        assert_eq!(session.players().len(), 2);
        assert_eq!(session.scores().get(hand(3), 0), Some(2));
    }

    #[test]
    fn rename_keeps_position() {
        let mut session = GameSession::new();

        session.rename_player(1, "Bob".into()).unwrap();

        assert_eq!(session.players()[1], Player::new("Bob".into(), 1));
        assert!(matches!(
            session.rename_player(5, "Nobody".into()),
            Err(GameError::Scoring(ScoringError::InvalidPlayer { index: 5, .. }))
        ));
    }

    #[test]
    fn reset_returns_to_setup() {
        let mut session = GameSession::new();
        session.set_score(hand(10), 0, "11").unwrap();

        session.reset().unwrap();

        assert_eq!(session.phase(), SessionPhase::Setup);
        assert_eq!(session.scores(), &ScoreMatrix::new(2));
    }

    #[test]
    fn submitted_session_rejects_changes() {
        let mut session = GameSession::new();
        session.mark_submitted();

        assert!(matches!(
            session.set_score(hand(3), 0, "1"),
            Err(GameError::AlreadySubmitted(_))
        ));
        assert!(matches!(session.reset(), Err(GameError::AlreadySubmitted(_))));
        assert!(matches!(
            session.add_player(),
            Err(GameError::AlreadySubmitted(_))
        ));
        assert!(session.to_record(Utc::now()).is_err());
    }

    #[test]
    fn record_reflects_current_leader() {
        let mut session = GameSession::new();
        session.rename_player(0, "A".into()).unwrap();
        session.rename_player(1, "B".into()).unwrap();
        session.set_score(hand(5), 0, "5").unwrap();
        session.set_score(hand(5), 1, "3").unwrap();

        let record = session.to_record(Utc::now()).unwrap();

        assert_eq!(session.leader(), 1);
        assert_eq!(record.winner().map(|p| p.name.as_str()), Some("B"));
        assert_eq!(record.players[0].score, 5);
        assert_eq!(record.players[1].score, 3);
    }

    #[test]
    fn staleness_follows_last_activity() {
        let mut session = GameSession::new();
        let idle = Duration::from_secs(60);
        let later = session.created_at + chrono::Duration::seconds(90);

        assert!(!session.is_stale(session.created_at, idle));
        assert!(session.is_stale(later, idle));

        session.touch(later);
        assert_eq!(session.last_activity(), later);
        assert!(!session.is_stale(later, idle));

        // A clock behind the last touch never counts as idle
        assert!(!session.is_stale(session.created_at, Duration::ZERO));
    }

    #[test]
    fn submitted_session_is_stale_immediately() {
        let mut session = GameSession::new();
        session.mark_submitted();

        assert!(session.is_stale(session.created_at, Duration::from_secs(3600)));
    }

    #[test]
    fn phase_display_matches_wire_name() {
        assert_eq!(SessionPhase::InProgress.to_string(), "IN_PROGRESS");
        assert_eq!(
            "SUBMITTED".parse::<SessionPhase>().unwrap(),
            SessionPhase::Submitted
        );
    }
}
