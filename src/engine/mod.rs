//! Core engine: identifiers, errors, configuration, behavioral state,
//! metric/progress math, the non-repeating selector, and turn orchestration.

pub mod config;
pub mod core;
pub mod errors;
pub mod ids;
pub mod metrics;
pub mod profile;
pub mod selector;
pub mod state;
pub mod store;

pub use config::CoachConfig;
pub use self::core::{ClientFlags, CoachEngine, PreparedTurn, TurnFlags, TurnReply};
pub use errors::{CoachError, CoachResult};
pub use ids::{TurnId, UserId};
pub use profile::UserProfile;
pub use state::{HearingImpairment, UserBehaviorState, VisualImpairment};
