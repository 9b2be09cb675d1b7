use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, instrument};

use super::{
    leaderboard::Leaderboard, models::PlayerStats, repository::PlayerStatsRepository, StatsError,
};
use crate::history::{GameRecord, GameRepository, StoredGame};

/// Records finished games and serves aggregated player statistics
pub struct StatsService {
    games: Arc<dyn GameRepository>,
    players: Arc<dyn PlayerStatsRepository>,
    /// Leaderboard built from the current history, cleared whenever a game is recorded
    leaderboard: RwLock<Option<Leaderboard>>,
}

impl StatsService {
    pub fn new(games: Arc<dyn GameRepository>, players: Arc<dyn PlayerStatsRepository>) -> Self {
        Self {
            games,
            players,
            leaderboard: RwLock::new(None),
        }
    }

    /// Stores a finished game, then folds each player's result into their stats.
    ///
    /// Nothing is folded when the game cannot be stored. If some players'
    /// stats fail to update the remaining players are still attempted and
    /// `StatsError::PartialUpdate` is returned.
    #[instrument(skip(self, record), fields(players = record.players.len()))]
    pub async fn record_game(&self, record: GameRecord) -> Result<StoredGame, StatsError> {
        validate(&record)?;

        let stored = self.games.insert_game(&record).await.map_err(|err| {
            error!(?err, "Failed to store game");
            err
        })?;

        let mut failed_players = Vec::new();
        let mut first_error = None;
        for entry in &stored.record.players {
            match self.players.upsert_player_stats(entry).await {
                Ok(stats) => debug!(
                    player = %stats.name,
                    wins = stats.wins,
                    games_played = stats.games_played,
                    "Player stats updated"
                ),
                Err(err) => {
                    error!(?err, player = %entry.name, "Failed to update player stats");
                    failed_players.push(entry.name.clone());
                    first_error.get_or_insert(err);
                }
            }
        }

        self.invalidate_leaderboard().await;

        if let Some(source) = first_error {
            return Err(StatsError::PartialUpdate {
                game_id: stored.id,
                failed_players,
                source,
            });
        }

        info!(game_id = %stored.id, "Game recorded");
        Ok(stored)
    }

    /// Game history, newest first
    pub async fn list_games(&self) -> Result<Vec<StoredGame>, StatsError> {
        Ok(self.games.list_games().await?)
    }

    /// Player stats, most wins first
    pub async fn list_players(&self) -> Result<Vec<PlayerStats>, StatsError> {
        Ok(self.players.list_players().await?)
    }

    /// Current leaderboard. Built at most once per recorded game.
    #[instrument(skip(self))]
    pub async fn leaderboard(&self) -> Result<Leaderboard, StatsError> {
        if let Some(cached) = self.leaderboard.read().await.as_ref() {
            return Ok(cached.clone());
        }

        // Holding the write lock while building means a concurrent
        // record_game clears this result only after it is stored
        let mut cache = self.leaderboard.write().await;
        if let Some(cached) = cache.as_ref() {
            return Ok(cached.clone());
        }

        let players = self.players.list_players().await?;
        let games = self.games.list_games().await?;
        let records: Vec<GameRecord> = games.into_iter().map(|game| game.record).collect();
        let board = Leaderboard::build(&players, &records);
        debug!(
            total_games = board.total_games,
            ranked = board.top_players.len(),
            "Leaderboard rebuilt"
        );

        *cache = Some(board.clone());
        Ok(board)
    }

    async fn invalidate_leaderboard(&self) {
        self.leaderboard.write().await.take();
    }
}

fn validate(record: &GameRecord) -> Result<(), StatsError> {
    if record.players.is_empty() {
        return Err(StatsError::Validation(
            "A game record needs at least one player".to_string(),
        ));
    }

    let winners = record.players.iter().filter(|p| p.is_winner).count();
    if winners != 1 {
        return Err(StatsError::Validation(format!(
            "A game record needs exactly one winner, found {}",
            winners
        )));
    }

    Ok(())
}
