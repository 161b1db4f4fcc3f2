//! TUI widgets for the chat

pub mod replies;
pub mod transcript;

pub use replies::RepliesWidget;
pub use transcript::TranscriptWidget;
