//! In-process keyed store for behavioral state.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::engine::errors::CoachResult;
use crate::engine::ids::UserId;
use crate::engine::state::UserBehaviorState;

/// Keyed behavioral-state store.
///
/// Each user's state sits behind its own async mutex so a turn holds
/// exclusive access for its full duration. Turns for different users never
/// contend.
#[derive(Default)]
pub struct BehaviorStateStore {
    states: DashMap<UserId, Arc<Mutex<UserBehaviorState>>>,
}

impl BehaviorStateStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the handle for a user, creating default state on first sight.
    ///
    /// The map guard is released before returning, so callers may hold the
    /// per-user lock across await points.
    #[must_use]
    pub fn handle(&self, user_id: UserId) -> Arc<Mutex<UserBehaviorState>> {
        self.states
            .entry(user_id)
            .or_insert_with(|| Arc::new(Mutex::new(UserBehaviorState::default())))
            .clone()
    }

    /// Serialize a user's state for external persistence.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub async fn snapshot(&self, user_id: UserId) -> CoachResult<Option<String>> {
        let Some(handle) = self.states.get(&user_id).map(|e| e.clone()) else {
            return Ok(None);
        };
        let state = handle.lock().await;
        Ok(Some(serde_json::to_string(&*state)?))
    }

    /// Restore a user's state from a snapshot, replacing any current state.
    ///
    /// # Errors
    /// Returns an error if the snapshot does not deserialize.
    pub async fn restore(&self, user_id: UserId, snapshot: &str) -> CoachResult<()> {
        let restored: UserBehaviorState = serde_json::from_str(snapshot)?;
        let handle = self.handle(user_id);
        let mut state = handle.lock().await;
        *state = restored;
        Ok(())
    }

    /// Number of users with tracked state.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// True when no user has state yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn handle_creates_default_state_once() {
        let store = BehaviorStateStore::new();
        let user = UserId::new();

        {
            let handle = store.handle(user);
            let mut state = handle.lock().await;
            state.skipped_days = 3;
        }

        let handle = store.handle(user);
        let state = handle.lock().await;
        assert_eq!(state.skipped_days, 3);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn snapshot_and_restore_round_trip() {
        let store = BehaviorStateStore::new();
        let user = UserId::new();

        {
            let handle = store.handle(user);
            let mut state = handle.lock().await;
            state.workout_count_this_week = 2;
        }

        let snapshot = store.snapshot(user).await.unwrap().unwrap();

        let other = BehaviorStateStore::new();
        other.restore(user, &snapshot).await.unwrap();
        let handle = other.handle(user);
        let state = handle.lock().await;
        assert_eq!(state.workout_count_this_week, 2);
    }

    #[tokio::test]
    async fn snapshot_of_unknown_user_is_none() {
        let store = BehaviorStateStore::new();
        assert!(store.snapshot(UserId::new()).await.unwrap().is_none());
    }
}
