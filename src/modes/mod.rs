//! Coaching mode resolvers.
//!
//! Each mode owns its detection keywords, extraction patterns, state merge
//! rules, and context builder. Modes only read the message and the behavior
//! state; the engine decides assembly order.

pub mod accessibility;
pub mod deaf;
pub mod diastasis;
pub mod disability;
pub mod inactivity;
pub mod media;
pub mod nutrition;
pub mod postpartum;
pub mod pregnancy;
pub mod workout;

use std::fmt::Display;

/// Render an optional figure for prompt text: the value, or "N/A".
pub(crate) fn or_na<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| v.to_string())
}
