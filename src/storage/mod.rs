//! Persistence collaborators for profiles and workout history.

mod profile_store;
mod workout_store;

pub use profile_store::{MemoryProfileStore, ProfileStore, SqliteProfileStore, StoreFuture};
pub use workout_store::{MemoryWorkoutLog, SqliteWorkoutLog, WorkoutLog};
