use async_trait::async_trait;
use chrono::Utc;
use sqlx::{postgres::PgRow, types::Json, PgPool, Row};
use std::sync::Mutex;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use super::models::{GameRecord, RecordedPlayer, StoredGame};
use crate::scoring::ScoreMatrix;
use crate::shared::PersistenceError;

/// Trait for game history storage
#[async_trait]
pub trait GameRepository: Send + Sync {
    /// All recorded games, newest first
    async fn list_games(&self) -> Result<Vec<StoredGame>, PersistenceError>;
    async fn insert_game(&self, record: &GameRecord) -> Result<StoredGame, PersistenceError>;
}

/// In-memory implementation of GameRepository for development and testing
///
/// Data is stored in memory and will be lost when the application restarts.
pub struct InMemoryGameRepository {
    // Kept newest first
    games: Mutex<Vec<StoredGame>>,
}

impl Default for InMemoryGameRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryGameRepository {
    pub fn new() -> Self {
        Self {
            games: Mutex::new(Vec::new()),
        }
    }

    pub fn game_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<StoredGame>> {
        // Poisoning leaves the Vec intact
        self.games
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl GameRepository for InMemoryGameRepository {
    #[instrument(skip(self))]
    async fn list_games(&self) -> Result<Vec<StoredGame>, PersistenceError> {
        let games = self.lock().clone();
        debug!(game_count = games.len(), "Games listed from memory");
        Ok(games)
    }

    #[instrument(skip(self, record))]
    async fn insert_game(&self, record: &GameRecord) -> Result<StoredGame, PersistenceError> {
        let stored = StoredGame {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            record: record.clone(),
        };

        self.lock().insert(0, stored.clone());

        debug!(game_id = %stored.id, players = record.players.len(), "Game stored in memory");
        Ok(stored)
    }
}

/// PostgreSQL implementation of game history
pub struct PostgresGameRepository {
    pool: PgPool,
}

impl PostgresGameRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the games table if it does not exist yet
    #[instrument(skip(self))]
    pub async fn ensure_schema(&self) -> Result<(), PersistenceError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS games (
                id TEXT PRIMARY KEY,
                date TIMESTAMPTZ NOT NULL,
                players JSONB NOT NULL,
                scores JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to create games table");
            PersistenceError::from(e)
        })?;
        Ok(())
    }

    fn decode_row(row: &PgRow) -> Result<StoredGame, PersistenceError> {
        let id: String = row.try_get("id")?;
        let corrupt = |e: sqlx::Error| PersistenceError::Corrupt {
            id: id.clone(),
            reason: e.to_string(),
        };

        let Json(players): Json<Vec<RecordedPlayer>> = row.try_get("players").map_err(corrupt)?;
        let Json(scores): Json<ScoreMatrix> = row.try_get("scores").map_err(corrupt)?;

        Ok(StoredGame {
            created_at: row.try_get("created_at")?,
            record: GameRecord {
                date: row.try_get("date")?,
                players,
                scores,
            },
            id,
        })
    }
}

#[async_trait]
impl GameRepository for PostgresGameRepository {
    #[instrument(skip(self))]
    async fn list_games(&self) -> Result<Vec<StoredGame>, PersistenceError> {
        debug!("Fetching games from database");

        let rows = sqlx::query(
            "SELECT id, date, players, scores, created_at FROM games ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to fetch games from database");
            PersistenceError::from(e)
        })?;

        rows.iter().map(Self::decode_row).collect()
    }

    #[instrument(skip(self, record))]
    async fn insert_game(&self, record: &GameRecord) -> Result<StoredGame, PersistenceError> {
        let id = Uuid::new_v4().to_string();
        debug!(game_id = %id, "Inserting game into database");

        let row = sqlx::query(
            "INSERT INTO games (id, date, players, scores) VALUES ($1, $2, $3, $4) \
             RETURNING id, date, players, scores, created_at",
        )
        .bind(&id)
        .bind(record.date)
        .bind(Json(&record.players))
        .bind(Json(&record.scores))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, game_id = %id, "Failed to insert game into database");
            PersistenceError::from(e)
        })?;

        Self::decode_row(&row)
    }
}
