//! Testing utilities for scripted conversations.
//!
//! `ChatHarness` wraps a session and collapses the select/deliver pair
//! so walkthrough tests read as a sequence of choices. The typing delay
//! is a UI concern; tests redeem pending deliveries immediately.

use crate::script::Script;
use crate::session::{ChatSession, Message, PendingDelivery, Sender, SessionConfig};

/// Harness for driving a conversation in tests.
pub struct ChatHarness {
    pub session: ChatSession,
}

impl ChatHarness {
    /// Harness over the built-in script, already started.
    pub fn new() -> Self {
        Self::with_script(Script::builtin())
    }

    /// Harness over a custom script, already started.
    pub fn with_script(script: Script) -> Self {
        let mut session = ChatSession::new(script, SessionConfig::default());
        session.start();
        Self { session }
    }

    /// Choose a reply but leave the narrator's answer pending, as the
    /// UI would during the typing delay.
    pub fn choose(&mut self, index: usize) -> Option<PendingDelivery> {
        self.session.select(index)
    }

    /// Redeem a pending delivery.
    pub fn deliver(&mut self, pending: PendingDelivery) {
        self.session.deliver(pending);
    }

    /// Choose a reply and immediately apply the narrator's answer.
    pub fn choose_and_deliver(&mut self, index: usize) {
        if let Some(pending) = self.session.select(index) {
            self.session.deliver(pending);
        }
    }

    pub fn message_count(&self) -> usize {
        self.session.messages().len()
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.session.messages().last()
    }

    /// Texts of the replies currently on offer.
    pub fn reply_texts(&self) -> Vec<&'static str> {
        self.session.replies().iter().map(|r| r.text).collect()
    }
}

impl Default for ChatHarness {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Assertion helpers
// ============================================================================

/// Assert the transcript has exactly `expected` messages.
#[track_caller]
pub fn assert_message_count(harness: &ChatHarness, expected: usize) {
    let actual = harness.message_count();
    assert_eq!(
        actual, expected,
        "Expected {expected} transcript messages, got {actual}"
    );
}

/// Assert the newest message came from `sender` and contains `needle`.
#[track_caller]
pub fn assert_last_message(harness: &ChatHarness, sender: Sender, needle: &str) {
    let last = harness
        .last_message()
        .unwrap_or_else(|| panic!("Expected a transcript message containing {needle:?}"));
    assert_eq!(last.sender, sender, "Unexpected sender for {:?}", last.text);
    assert!(
        last.text.contains(needle),
        "Expected last message to contain {needle:?}, got {:?}",
        last.text
    );
}

/// Assert exactly `expected` replies are on offer.
#[track_caller]
pub fn assert_reply_count(harness: &ChatHarness, expected: usize) {
    let actual = harness.session.replies().len();
    assert_eq!(
        actual, expected,
        "Expected {expected} offered replies, got {actual}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn harness_starts_at_the_greeting() {
        let harness = ChatHarness::new();
        assert_message_count(&harness, 1);
        assert_last_message(&harness, Sender::Narrator, "Local Area Network");
        assert_reply_count(&harness, 1);
    }

    #[test]
    fn choose_and_deliver_advances_one_node() {
        let mut harness = ChatHarness::new();
        harness.choose_and_deliver(0);

        assert_message_count(&harness, 3);
        assert_last_message(&harness, Sender::Narrator, "copy everything to a disk");
    }

    #[test]
    fn choose_without_deliver_keeps_replies() {
        let mut harness = ChatHarness::new();
        let before = harness.reply_texts();
        let pending = harness.choose(0).expect("pending");

        assert_message_count(&harness, 2);
        assert_eq!(harness.reply_texts(), before);

        harness.deliver(pending);
        assert_ne!(harness.reply_texts(), before);
    }
}
