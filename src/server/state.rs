//! Application state shared across all request handlers.

use std::sync::Arc;

use crate::engine::{CoachConfig, CoachEngine, CoachResult};
use crate::storage::{ProfileStore, SqliteProfileStore, SqliteWorkoutLog, WorkoutLog};

/// Shared application state.
pub struct AppState {
    /// Coaching engine driving every chat turn.
    pub engine: CoachEngine,
    /// Profile store, shared with the engine.
    pub profiles: Arc<dyn ProfileStore>,
}

impl AppState {
    /// Create application state backed by the configured `SQLite` database.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or the
    /// configuration is invalid.
    pub async fn new(config: CoachConfig) -> CoachResult<Arc<Self>> {
        let profiles: Arc<dyn ProfileStore> =
            Arc::new(SqliteProfileStore::new(&config.storage).await?);
        let workouts: Arc<dyn WorkoutLog> =
            Arc::new(SqliteWorkoutLog::new(&config.storage).await?);
        Self::from_parts(config, profiles, workouts)
    }

    /// Create application state from explicit collaborators (in-memory
    /// stores in tests).
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid.
    pub fn from_parts(
        config: CoachConfig,
        profiles: Arc<dyn ProfileStore>,
        workouts: Arc<dyn WorkoutLog>,
    ) -> CoachResult<Arc<Self>> {
        let engine = CoachEngine::new(config, Arc::clone(&profiles), workouts)?;
        Ok(Arc::new(Self { engine, profiles }))
    }
}
