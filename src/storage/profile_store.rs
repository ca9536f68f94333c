//! User profile storage.

use std::future::Future;
use std::pin::Pin;

use dashmap::DashMap;
use tokio_rusqlite::Connection;

use crate::engine::config::StorageConfig;
use crate::engine::errors::CoachResult;
use crate::engine::ids::UserId;
use crate::engine::profile::UserProfile;

/// Boxed future type for store operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// User profile store trait.
pub trait ProfileStore: Send + Sync {
    /// Get a user profile by ID.
    ///
    /// # Errors
    /// Returns an error if storage access fails.
    fn get_profile(&self, user_id: UserId) -> StoreFuture<'_, CoachResult<Option<UserProfile>>>;

    /// Save or update a user profile.
    ///
    /// # Errors
    /// Returns an error if storage access fails.
    fn save_profile(&self, profile: &UserProfile) -> StoreFuture<'_, CoachResult<()>>;

    /// Delete a user profile.
    ///
    /// # Errors
    /// Returns an error if storage access fails.
    fn delete_profile(&self, user_id: UserId) -> StoreFuture<'_, CoachResult<()>>;

    /// Check if a user profile exists.
    ///
    /// # Errors
    /// Returns an error if storage access fails.
    fn exists(&self, user_id: UserId) -> StoreFuture<'_, CoachResult<bool>>;
}

/// `SQLite` implementation of the profile store.
pub struct SqliteProfileStore {
    conn: Connection,
    table: String,
}

impl SqliteProfileStore {
    /// Initialize the profile store.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened.
    pub async fn new(config: &StorageConfig) -> CoachResult<Self> {
        let conn = Connection::open(&config.sqlite_path).await?;
        let table = config.profile_table.clone();
        let table_name = table.clone();

        conn.call(move |conn| {
            conn.execute_batch(&format!(
                "CREATE TABLE IF NOT EXISTS {table_name} (
                    user_id TEXT PRIMARY KEY,
                    profile_json TEXT NOT NULL,
                    created_at INTEGER NOT NULL,
                    updated_at INTEGER NOT NULL
                )"
            ))?;
            Ok(())
        })
        .await?;

        Ok(Self { conn, table })
    }
}

impl ProfileStore for SqliteProfileStore {
    fn get_profile(&self, user_id: UserId) -> StoreFuture<'_, CoachResult<Option<UserProfile>>> {
        Box::pin(async move {
            let table = self.table.clone();
            let user_id_str = user_id.to_string();

            let result = self
                .conn
                .call(move |conn| {
                    let mut stmt = conn.prepare(&format!(
                        "SELECT profile_json FROM {table} WHERE user_id = ?1"
                    ))?;
                    let result: Option<String> = stmt
                        .query_row(rusqlite::params![user_id_str], |row| row.get(0))
                        .ok();
                    Ok(result)
                })
                .await?;

            match result {
                Some(json) => {
                    let profile: UserProfile = serde_json::from_str(&json)?;
                    Ok(Some(profile))
                }
                None => Ok(None),
            }
        })
    }

    fn save_profile(&self, profile: &UserProfile) -> StoreFuture<'_, CoachResult<()>> {
        let profile = profile.clone();
        Box::pin(async move {
            let table = self.table.clone();
            let user_id_str = profile.user_id.to_string();
            let profile_json = serde_json::to_string(&profile)?;
            let created_at = profile.created_at.timestamp_millis();
            let updated_at = profile.updated_at.timestamp_millis();

            self.conn
                .call(move |conn| {
                    conn.execute(
                        &format!(
                            "INSERT OR REPLACE INTO {table} (user_id, profile_json, created_at, updated_at)
                             VALUES (?1, ?2, ?3, ?4)"
                        ),
                        rusqlite::params![user_id_str, profile_json, created_at, updated_at],
                    )?;
                    Ok(())
                })
                .await?;

            Ok(())
        })
    }

    fn delete_profile(&self, user_id: UserId) -> StoreFuture<'_, CoachResult<()>> {
        Box::pin(async move {
            let table = self.table.clone();
            let user_id_str = user_id.to_string();

            self.conn
                .call(move |conn| {
                    conn.execute(
                        &format!("DELETE FROM {table} WHERE user_id = ?1"),
                        rusqlite::params![user_id_str],
                    )?;
                    Ok(())
                })
                .await?;

            Ok(())
        })
    }

    fn exists(&self, user_id: UserId) -> StoreFuture<'_, CoachResult<bool>> {
        Box::pin(async move {
            let table = self.table.clone();
            let user_id_str = user_id.to_string();

            let exists = self
                .conn
                .call(move |conn| {
                    let count: i64 = conn.query_row(
                        &format!("SELECT COUNT(*) FROM {table} WHERE user_id = ?1"),
                        rusqlite::params![user_id_str],
                        |row| row.get(0),
                    )?;
                    Ok(count > 0)
                })
                .await?;

            Ok(exists)
        })
    }
}

/// In-memory profile store for tests and single-process setups.
#[derive(Default)]
pub struct MemoryProfileStore {
    profiles: DashMap<UserId, UserProfile>,
}

impl MemoryProfileStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProfileStore for MemoryProfileStore {
    fn get_profile(&self, user_id: UserId) -> StoreFuture<'_, CoachResult<Option<UserProfile>>> {
        Box::pin(async move { Ok(self.profiles.get(&user_id).map(|e| e.clone())) })
    }

    fn save_profile(&self, profile: &UserProfile) -> StoreFuture<'_, CoachResult<()>> {
        let profile = profile.clone();
        Box::pin(async move {
            self.profiles.insert(profile.user_id, profile);
            Ok(())
        })
    }

    fn delete_profile(&self, user_id: UserId) -> StoreFuture<'_, CoachResult<()>> {
        Box::pin(async move {
            self.profiles.remove(&user_id);
            Ok(())
        })
    }

    fn exists(&self, user_id: UserId) -> StoreFuture<'_, CoachResult<bool>> {
        Box::pin(async move { Ok(self.profiles.contains_key(&user_id)) })
    }
}
