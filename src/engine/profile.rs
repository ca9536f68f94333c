//! User profile used as the stable input to metric and context building.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::ids::UserId;

/// Stored user profile.
///
/// All measurements are optional; the metric calculator treats absent or
/// zero values as unknown and skips the derived figures.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserProfile {
    /// Owning user.
    pub user_id: UserId,
    /// Preferred display name.
    pub name: Option<String>,
    /// Account username, used when no display name is set.
    pub username: Option<String>,
    /// Age in years.
    pub age: Option<u32>,
    /// Height in centimeters.
    pub height_cm: Option<f64>,
    /// Current weight in kilograms.
    pub weight_kg: Option<f64>,
    /// Target weight in kilograms.
    pub target_weight_kg: Option<f64>,
    /// Free-text goal ("weight loss", "muscle building", ...).
    pub goal: Option<String>,
    /// Free-text activity level ("sedentary", "very active", ...).
    pub activity_level: Option<String>,
    /// Free-text gender.
    pub gender: Option<String>,
    /// Free-text health notes.
    pub health_notes: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Create an empty profile for a user.
    #[must_use]
    pub fn new(user_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            name: None,
            username: None,
            age: None,
            height_cm: None,
            weight_kg: None,
            target_weight_kg: None,
            goal: None,
            activity_level: None,
            gender: None,
            health_notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Name used when addressing the user: display name, then username.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| self.username.as_deref().filter(|s| !s.trim().is_empty()))
            .unwrap_or("")
    }

    /// Lowercased goal, empty when unset.
    #[must_use]
    pub fn goal_lowered(&self) -> String {
        self.goal.as_deref().unwrap_or_default().to_lowercase()
    }

    /// Lowercased activity level, empty when unset.
    #[must_use]
    pub fn activity_lowered(&self) -> String {
        self.activity_level
            .as_deref()
            .unwrap_or_default()
            .to_lowercase()
    }
}
