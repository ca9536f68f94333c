//! Static coaching content: video pools, exercise lists, equipment guides,
//! safety alerts, message pools, and the system persona.

pub mod alerts;
pub mod equipment;
pub mod exercises;
pub mod images;
pub mod messages;
pub mod persona;
pub mod videos;

pub use alerts::SafetyAlert;
pub use equipment::Equipment;
pub use images::ExerciseImage;
pub use videos::{AdaptiveCategory, Video};
