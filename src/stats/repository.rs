use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::models::PlayerStats;
use crate::history::RecordedPlayer;
use crate::shared::PersistenceError;

#[async_trait]
pub trait PlayerStatsRepository: Send + Sync {
    /// All players, most wins first
    async fn list_players(&self) -> Result<Vec<PlayerStats>, PersistenceError>;
    async fn get_player(&self, name: &str) -> Result<Option<PlayerStats>, PersistenceError>;

    /// Folds one game result into the named player's stats, creating them
    /// on first sight. The read-modify-write is atomic per player name, so
    /// concurrent submissions never lose an update.
    async fn upsert_player_stats(
        &self,
        entry: &RecordedPlayer,
    ) -> Result<PlayerStats, PersistenceError>;
}

/// Orders players by wins descending, then by name so equal-win rows are stable
fn rank(players: &mut [PlayerStats]) {
    players.sort_by(|a, b| b.wins.cmp(&a.wins).then_with(|| a.name.cmp(&b.name)));
}

#[derive(Debug, Default)]
pub struct InMemoryPlayerStatsRepository {
    players: Mutex<HashMap<String, PlayerStats>>,
}

impl InMemoryPlayerStatsRepository {
    pub fn new() -> Self {
        Self {
            players: Mutex::new(HashMap::new()),
        }
    }

    /// Creates a repository with pre-populated stats
    #[cfg(test)]
    pub fn with_players(players: Vec<PlayerStats>) -> Self {
        let players = players
            .into_iter()
            .map(|stats| (stats.name.clone(), stats))
            .collect();
        Self {
            players: Mutex::new(players),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, PlayerStats>> {
        self.players
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl PlayerStatsRepository for InMemoryPlayerStatsRepository {
    #[instrument(skip(self))]
    async fn list_players(&self) -> Result<Vec<PlayerStats>, PersistenceError> {
        let mut players: Vec<PlayerStats> = self.lock().values().cloned().collect();
        rank(&mut players);
        Ok(players)
    }

    #[instrument(skip(self))]
    async fn get_player(&self, name: &str) -> Result<Option<PlayerStats>, PersistenceError> {
        Ok(self.lock().get(name).cloned())
    }

    #[instrument(skip(self, entry), fields(player = %entry.name))]
    async fn upsert_player_stats(
        &self,
        entry: &RecordedPlayer,
    ) -> Result<PlayerStats, PersistenceError> {
        let mut players = self.lock();
        let stats = match players.get_mut(&entry.name) {
            Some(existing) => {
                existing.apply(entry);
                existing.clone()
            }
            None => {
                let created = PlayerStats::from_result(entry);
                players.insert(entry.name.clone(), created.clone());
                created
            }
        };

        debug!(
            wins = stats.wins,
            games_played = stats.games_played,
            "Player stats updated in memory"
        );
        Ok(stats)
    }
}

/// PostgreSQL implementation of player stats
pub struct PostgresPlayerStatsRepository {
    pool: PgPool,
}

impl PostgresPlayerStatsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the players table if it does not exist yet
    #[instrument(skip(self))]
    pub async fn ensure_schema(&self) -> Result<(), PersistenceError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS players (
                name TEXT PRIMARY KEY,
                wins BIGINT NOT NULL DEFAULT 0,
                games_played BIGINT NOT NULL DEFAULT 0,
                highest_score BIGINT NOT NULL DEFAULT 0,
                lowest_score BIGINT
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to create players table");
            PersistenceError::from(e)
        })?;
        Ok(())
    }

    fn decode_row(row: &PgRow) -> Result<PlayerStats, PersistenceError> {
        let name: String = row.try_get("name")?;
        let count = |column: &str| -> Result<u32, PersistenceError> {
            let value: i64 = row.try_get(column)?;
            u32::try_from(value).map_err(|_| PersistenceError::Corrupt {
                id: name.clone(),
                reason: format!("{} out of range: {}", column, value),
            })
        };

        let wins = count("wins")?;
        let games_played = count("games_played")?;
        let highest_score = count("highest_score")?;
        let lowest_score = match row.try_get::<Option<i64>, _>("lowest_score")? {
            Some(value) => Some(u32::try_from(value).map_err(|_| PersistenceError::Corrupt {
                id: name.clone(),
                reason: format!("lowest_score out of range: {}", value),
            })?),
            None => None,
        };

        Ok(PlayerStats {
            name,
            wins,
            games_played,
            highest_score,
            lowest_score,
        })
    }
}

#[async_trait]
impl PlayerStatsRepository for PostgresPlayerStatsRepository {
    #[instrument(skip(self))]
    async fn list_players(&self) -> Result<Vec<PlayerStats>, PersistenceError> {
        debug!("Fetching players from database");

        let rows = sqlx::query(
            "SELECT name, wins, games_played, highest_score, lowest_score \
             FROM players ORDER BY wins DESC, name ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to fetch players from database");
            PersistenceError::from(e)
        })?;

        rows.iter().map(Self::decode_row).collect()
    }

    #[instrument(skip(self))]
    async fn get_player(&self, name: &str) -> Result<Option<PlayerStats>, PersistenceError> {
        let row = sqlx::query(
            "SELECT name, wins, games_played, highest_score, lowest_score \
             FROM players WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, player = %name, "Failed to fetch player from database");
            PersistenceError::from(e)
        })?;

        row.as_ref().map(Self::decode_row).transpose()
    }

    #[instrument(skip(self, entry), fields(player = %entry.name))]
    async fn upsert_player_stats(
        &self,
        entry: &RecordedPlayer,
    ) -> Result<PlayerStats, PersistenceError> {
        // Single statement, so the row lock covers the whole read-modify-write
        let row = sqlx::query(
            "INSERT INTO players (name, wins, games_played, highest_score, lowest_score) \
             VALUES ($1, $2, 1, $3, $3) \
             ON CONFLICT (name) DO UPDATE SET \
                 wins = players.wins + EXCLUDED.wins, \
                 games_played = players.games_played + 1, \
                 highest_score = GREATEST(players.highest_score, EXCLUDED.highest_score), \
                 lowest_score = CASE \
                     WHEN players.lowest_score IS NULL THEN EXCLUDED.lowest_score \
                     ELSE LEAST(players.lowest_score, EXCLUDED.lowest_score) \
                 END \
             RETURNING name, wins, games_played, highest_score, lowest_score",
        )
        .bind(&entry.name)
        .bind(i64::from(u32::from(entry.is_winner)))
        .bind(i64::from(entry.score))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to upsert player stats");
            PersistenceError::from(e)
        })?;

        Self::decode_row(&row)
    }
}
