//! Workout history storage.
//!
//! Only the latest completion timestamp feeds the turn pipeline; the full
//! log is kept for the progress view.

use chrono::{DateTime, TimeZone, Utc};
use dashmap::DashMap;
use tokio_rusqlite::Connection;

use crate::engine::config::StorageConfig;
use crate::engine::errors::CoachResult;
use crate::engine::ids::UserId;
use crate::storage::profile_store::StoreFuture;

/// Workout history store trait.
pub trait WorkoutLog: Send + Sync {
    /// Append a completed workout at the given time.
    ///
    /// # Errors
    /// Returns an error if storage access fails.
    fn record_workout(&self, user_id: UserId, at: DateTime<Utc>) -> StoreFuture<'_, CoachResult<()>>;

    /// Timestamp of the most recent logged workout, if any.
    ///
    /// # Errors
    /// Returns an error if storage access fails.
    fn last_workout(&self, user_id: UserId) -> StoreFuture<'_, CoachResult<Option<DateTime<Utc>>>>;
}

/// `SQLite` implementation of the workout log.
pub struct SqliteWorkoutLog {
    conn: Connection,
}

impl SqliteWorkoutLog {
    /// Initialize the workout log.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened.
    pub async fn new(config: &StorageConfig) -> CoachResult<Self> {
        let conn = Connection::open(&config.sqlite_path).await?;

        conn.call(|conn| {
            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS workout_log (
                    user_id TEXT NOT NULL,
                    completed_at INTEGER NOT NULL
                );
                CREATE INDEX IF NOT EXISTS workout_log_user
                    ON workout_log (user_id, completed_at)",
            )?;
            Ok(())
        })
        .await?;

        Ok(Self { conn })
    }
}

impl WorkoutLog for SqliteWorkoutLog {
    fn record_workout(
        &self,
        user_id: UserId,
        at: DateTime<Utc>,
    ) -> StoreFuture<'_, CoachResult<()>> {
        Box::pin(async move {
            let user_id_str = user_id.to_string();
            let completed_at = at.timestamp_millis();

            self.conn
                .call(move |conn| {
                    conn.execute(
                        "INSERT INTO workout_log (user_id, completed_at) VALUES (?1, ?2)",
                        rusqlite::params![user_id_str, completed_at],
                    )?;
                    Ok(())
                })
                .await?;

            Ok(())
        })
    }

    fn last_workout(
        &self,
        user_id: UserId,
    ) -> StoreFuture<'_, CoachResult<Option<DateTime<Utc>>>> {
        Box::pin(async move {
            let user_id_str = user_id.to_string();

            let millis: Option<i64> = self
                .conn
                .call(move |conn| {
                    let latest: Option<i64> = conn.query_row(
                        "SELECT MAX(completed_at) FROM workout_log WHERE user_id = ?1",
                        rusqlite::params![user_id_str],
                        |row| row.get(0),
                    )?;
                    Ok(latest)
                })
                .await?;

            Ok(millis.and_then(|m| Utc.timestamp_millis_opt(m).single()))
        })
    }
}

/// In-memory workout log for tests and single-process setups.
#[derive(Default)]
pub struct MemoryWorkoutLog {
    entries: DashMap<UserId, Vec<DateTime<Utc>>>,
}

impl MemoryWorkoutLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl WorkoutLog for MemoryWorkoutLog {
    fn record_workout(
        &self,
        user_id: UserId,
        at: DateTime<Utc>,
    ) -> StoreFuture<'_, CoachResult<()>> {
        Box::pin(async move {
            self.entries.entry(user_id).or_default().push(at);
            Ok(())
        })
    }

    fn last_workout(
        &self,
        user_id: UserId,
    ) -> StoreFuture<'_, CoachResult<Option<DateTime<Utc>>>> {
        Box::pin(async move {
            Ok(self
                .entries
                .get(&user_id)
                .and_then(|e| e.iter().max().copied()))
        })
    }
}
