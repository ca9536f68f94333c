//! Pure signal detectors over the lowercased user message.

pub mod emotion;
pub mod language;
pub mod preferences;
pub mod signals;

pub use emotion::{Emotion, detect_emotion};
pub use language::{Language, detect_language};
pub use preferences::PreferenceExtractor;
