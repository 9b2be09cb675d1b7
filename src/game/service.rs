use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use super::{
    models::GameSession,
    repository::{SessionRepository, SharedSession},
    GameError,
};
use crate::history::StoredGame;
use crate::scoring::Hand;
use crate::stats::{StatsError, StatsService};

/// Drives game sessions from setup through submission
pub struct GameService {
    sessions: SessionRepository,
    stats_service: Arc<StatsService>,
}

impl GameService {
    pub fn new(stats_service: Arc<StatsService>) -> Self {
        Self {
            sessions: SessionRepository::new(),
            stats_service,
        }
    }

    /// Starts a fresh two-player session
    #[instrument(skip(self))]
    pub async fn create_session(&self) -> GameSession {
        let session = GameSession::new();
        info!(session_id = %session.id, "Game session created");
        self.sessions.insert(session.clone()).await;
        session
    }

    pub async fn get_session(&self, session_id: &str) -> Result<GameSession, GameError> {
        let shared = self.session(session_id).await?;
        let mut session = shared.lock().await;
        session.touch(Utc::now());
        Ok(session.clone())
    }

    #[instrument(skip(self))]
    pub async fn discard_session(&self, session_id: &str) -> Result<(), GameError> {
        self.sessions
            .remove(session_id)
            .await
            .ok_or_else(|| GameError::SessionNotFound(session_id.to_string()))?;
        info!(session_id, "Game session discarded");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn add_player(&self, session_id: &str) -> Result<GameSession, GameError> {
        self.update(session_id, |session| {
            session.add_player()?;
            debug!(player_count = session.players().len(), "Player added, scores reset");
            Ok(())
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn remove_player(&self, session_id: &str) -> Result<GameSession, GameError> {
        self.update(session_id, |session| {
            if session.remove_player()? {
                debug!(player_count = session.players().len(), "Player removed, scores reset");
            } else {
                debug!("Player count already at minimum, nothing removed");
            }
            Ok(())
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn rename_player(
        &self,
        session_id: &str,
        index: usize,
        name: String,
    ) -> Result<GameSession, GameError> {
        self.update(session_id, |session| session.rename_player(index, name))
            .await
    }

    /// Stores a raw score entry, returning the clamped value and the updated session
    #[instrument(skip(self))]
    pub async fn set_score(
        &self,
        session_id: &str,
        hand: Hand,
        player_index: usize,
        raw: &str,
    ) -> Result<(u32, GameSession), GameError> {
        let shared = self.session(session_id).await?;
        let mut session = shared.lock().await;
        let stored = session.set_score(hand, player_index, raw)?;
        session.touch(Utc::now());
        debug!(stored, phase = %session.phase(), "Score entered");
        Ok((stored, session.clone()))
    }

    #[instrument(skip(self))]
    pub async fn reset(&self, session_id: &str) -> Result<GameSession, GameError> {
        self.update(session_id, |session| {
            session.reset()?;
            info!("Game session reset");
            Ok(())
        })
        .await
    }

    /// Records the finished game and folds it into player stats.
    ///
    /// The session lock is held until persistence finishes, so one session
    /// is never recorded twice. A session stays open when the game itself
    /// could not be stored; once the game is stored the session is closed
    /// even if some player stats failed to update.
    #[instrument(skip(self))]
    pub async fn submit(&self, session_id: &str) -> Result<StoredGame, GameError> {
        let shared = self.session(session_id).await?;
        let mut session = shared.lock().await;
        let record = session.to_record(Utc::now())?;

        match self.stats_service.record_game(record).await {
            Ok(stored) => {
                session.mark_submitted();
                info!(game_id = %stored.id, "Game session submitted");
                Ok(stored)
            }
            Err(err @ StatsError::PartialUpdate { .. }) => {
                session.mark_submitted();
                warn!(error = %err, "Game stored but player stats are incomplete");
                Err(err.into())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Removes submitted sessions and sessions idle for at least
    /// `idle_timeout`, returning how many were dropped
    #[instrument(skip(self))]
    pub async fn evict_stale_sessions(&self, idle_timeout: Duration) -> usize {
        let evicted = self.sessions.evict_stale(Utc::now(), idle_timeout).await;
        for session_id in &evicted {
            debug!(session_id = %session_id, "Session evicted");
        }
        evicted.len()
    }

    pub async fn live_session_count(&self) -> usize {
        self.sessions.len().await
    }

    async fn session(&self, session_id: &str) -> Result<SharedSession, GameError> {
        self.sessions
            .get(session_id)
            .await
            .ok_or_else(|| GameError::SessionNotFound(session_id.to_string()))
    }

    async fn update<F>(&self, session_id: &str, apply: F) -> Result<GameSession, GameError>
    where
        F: FnOnce(&mut GameSession) -> Result<(), GameError>,
    {
        let shared = self.session(session_id).await?;
        let mut session = shared.lock().await;
        apply(&mut session)?;
        session.touch(Utc::now());
        Ok(session.clone())
    }
}
