//! Scripted chat engine for the "first LAN" conversation.
//!
//! This crate provides:
//! - The static dialogue script (Bob Metcalfe designing the first LAN)
//! - A session state machine with an append-only transcript
//! - An inline markup renderer for `**bold**` and line breaks
//! - A test harness for scripted walkthroughs
//!
//! # Quick Start
//!
//! ```
//! use lanchat_core::ChatSession;
//!
//! let mut session = ChatSession::builtin();
//! session.start();
//! assert_eq!(session.messages().len(), 1);
//!
//! // Selecting a reply echoes it immediately; the narrator's answer is
//! // applied after the typing delay via the returned token.
//! if let Some(pending) = session.select(0) {
//!     session.deliver(pending);
//! }
//! assert_eq!(session.messages().len(), 3);
//! ```

pub mod markup;
pub mod script;
pub mod session;
pub mod testing;

// Primary public API
pub use markup::Fragment;
pub use script::{DialogueNode, Reply, Script, ScriptError};
pub use session::{ChatSession, Message, PendingDelivery, Sender, SessionConfig};
pub use testing::ChatHarness;
