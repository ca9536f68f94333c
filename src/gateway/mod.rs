//! Completion backend gateway and accessibility post-formatting.

mod completion;
mod voice;

pub use completion::CompletionGateway;
pub use voice::VoiceFilter;
