//! ChatSession - the session state machine for a scripted conversation.
//!
//! A session owns the append-only transcript and the replies currently
//! on offer. Selecting a reply echoes it immediately; the narrator's
//! answer is handed back as a [`PendingDelivery`] token so the caller
//! can apply it after the typing delay. Tokens carry the session epoch,
//! so a reset during the delay silently invalidates them instead of
//! letting a stale callback touch the new session.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::script::{Reply, Script};

/// Who authored a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Narrator,
}

/// One entry in the transcript. Never mutated once appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Position in the transcript.
    pub id: usize,
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Local>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Message {
    /// Local hour:minute label for display next to the message.
    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}

/// Configuration for a chat session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Display name of the narrator.
    pub narrator_name: String,

    /// Short line shown under the narrator's name.
    pub narrator_tagline: String,

    /// Pause between the user's echoed reply and the narrator's answer,
    /// simulating typing. Pacing only; no real I/O happens here.
    pub typing_delay_ms: u64,

    /// Node the conversation starts from.
    pub start_node: u32,
}

impl SessionConfig {
    pub fn new() -> Self {
        Self {
            narrator_name: "Bob Metcalfe".to_string(),
            narrator_tagline: "Creator of Ethernet".to_string(),
            typing_delay_ms: 500,
            start_node: Script::START_ID,
        }
    }

    pub fn with_narrator(mut self, name: impl Into<String>) -> Self {
        self.narrator_name = name.into();
        self
    }

    pub fn with_tagline(mut self, tagline: impl Into<String>) -> Self {
        self.narrator_tagline = tagline.into();
        self
    }

    pub fn with_typing_delay_ms(mut self, ms: u64) -> Self {
        self.typing_delay_ms = ms;
        self
    }

    pub fn with_start_node(mut self, id: u32) -> Self {
        self.start_node = id;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A narrator reply scheduled but not yet applied.
///
/// Minted by [`ChatSession::select`] and redeemed by
/// [`ChatSession::deliver`]. The embedded epoch ties the token to the
/// session generation it was minted under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingDelivery {
    node_id: u32,
    epoch: u64,
}

impl PendingDelivery {
    /// Id of the node this delivery will reveal.
    pub fn node_id(&self) -> u32 {
        self.node_id
    }
}

/// State of one scripted conversation.
pub struct ChatSession {
    script: Script,
    config: SessionConfig,
    started: bool,
    messages: Vec<Message>,
    replies: Vec<Reply>,
    /// Bumped on reset; stale [`PendingDelivery`] tokens compare unequal.
    epoch: u64,
}

impl ChatSession {
    pub fn new(script: Script, config: SessionConfig) -> Self {
        Self {
            script,
            config,
            started: false,
            messages: Vec::new(),
            replies: Vec::new(),
            epoch: 0,
        }
    }

    /// A session over the built-in LAN conversation with default config.
    pub fn builtin() -> Self {
        Self::new(Script::builtin(), SessionConfig::default())
    }

    /// Begin the conversation: seed the transcript with the start node's
    /// body and offer its replies.
    ///
    /// A missing start node leaves the transcript blank, matching the
    /// fail-silent lookup contract. Calling `start` twice is a no-op.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;

        if let Some(node) = self.script.get(self.config.start_node) {
            self.push_message(
                Sender::Narrator,
                node.body.to_string(),
                node.image.map(str::to_string),
            );
            self.replies = node.replies.to_vec();
        }
    }

    /// Select one of the currently offered replies by index.
    ///
    /// The reply text is echoed to the transcript as a user message
    /// immediately. When the reply leads somewhere, the returned token
    /// should be passed to [`deliver`](Self::deliver) after the typing
    /// delay. An out-of-range index is a silent no-op.
    pub fn select(&mut self, index: usize) -> Option<PendingDelivery> {
        let reply = *self.replies.get(index)?;
        self.push_message(Sender::User, reply.text.to_string(), None);

        reply.next_id.map(|node_id| PendingDelivery {
            node_id,
            epoch: self.epoch,
        })
    }

    /// Apply a scheduled narrator reply: append its message and swap the
    /// offered replies for the target node's.
    ///
    /// No-ops when the token is stale (the session was reset after it
    /// was minted) or when the target node does not exist.
    pub fn deliver(&mut self, pending: PendingDelivery) {
        if pending.epoch != self.epoch {
            return;
        }
        let Some(node) = self.script.get(pending.node_id) else {
            return;
        };

        self.push_message(
            Sender::Narrator,
            node.body.to_string(),
            node.image.map(str::to_string),
        );
        self.replies = node.replies.to_vec();
    }

    /// Destroy the transcript and return to the not-started state.
    /// Invalidates every outstanding [`PendingDelivery`].
    pub fn reset(&mut self) {
        self.started = false;
        self.messages.clear();
        self.replies.clear();
        self.epoch += 1;
    }

    pub fn started(&self) -> bool {
        self.started
    }

    /// The transcript so far, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Replies currently on offer.
    pub fn replies(&self) -> &[Reply] {
        &self.replies
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn script(&self) -> Script {
        self.script
    }

    /// Serialize the transcript as pretty JSON, for one-way export.
    pub fn transcript_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.messages)
    }

    fn push_message(&mut self, sender: Sender, text: String, image: Option<String>) {
        let id = self.messages.len();
        self.messages.push(Message {
            id,
            sender,
            text,
            timestamp: Local::now(),
            image,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::{DialogueNode, Script};

    fn started_session() -> ChatSession {
        let mut session = ChatSession::builtin();
        session.start();
        session
    }

    #[test]
    fn start_seeds_exactly_one_narrator_message() {
        let session = started_session();
        let start = Script::builtin().get(0).expect("start node");

        assert!(session.started());
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].sender, Sender::Narrator);
        assert_eq!(session.messages()[0].text, start.body);
        assert_eq!(session.replies(), start.replies);
    }

    #[test]
    fn start_twice_does_not_duplicate_the_greeting() {
        let mut session = started_session();
        session.start();
        assert_eq!(session.messages().len(), 1);
    }

    #[test]
    fn select_echoes_the_reply_immediately() {
        let mut session = started_session();
        let reply_text = session.replies()[0].text;
        let offered_before = session.replies().to_vec();

        let pending = session.select(0).expect("reply 0 leads to node 2");

        // Exactly one user message appended, replies untouched until delivery.
        assert_eq!(session.messages().len(), 2);
        let echoed = &session.messages()[1];
        assert_eq!(echoed.sender, Sender::User);
        assert_eq!(echoed.text, reply_text);
        assert!(echoed.image.is_none());
        assert_eq!(session.replies(), offered_before.as_slice());
        assert_eq!(pending.node_id(), 2);
    }

    #[test]
    fn deliver_appends_narrator_message_and_swaps_replies() {
        let mut session = started_session();
        let pending = session.select(0).expect("pending delivery");
        session.deliver(pending);

        let target = Script::builtin().get(2).expect("node 2");
        assert_eq!(session.messages().len(), 3);
        let answer = &session.messages()[2];
        assert_eq!(answer.sender, Sender::Narrator);
        assert_eq!(answer.text, target.body);
        assert_eq!(answer.image.as_deref(), target.image);
        assert_eq!(session.replies(), target.replies);
    }

    #[test]
    fn message_ids_are_transcript_positions() {
        let mut session = started_session();
        let pending = session.select(0).expect("pending");
        session.deliver(pending);

        for (i, message) in session.messages().iter().enumerate() {
            assert_eq!(message.id, i);
        }
    }

    #[test]
    fn out_of_range_select_is_a_silent_no_op() {
        let mut session = started_session();
        assert!(session.select(99).is_none());
        assert_eq!(session.messages().len(), 1);
    }

    #[test]
    fn reply_without_next_leaves_replies_unchanged() {
        static DEAD_END: &[DialogueNode] = &[DialogueNode {
            id: 0,
            body: "that's all",
            image: None,
            replies: &[crate::script::Reply {
                id: 1,
                text: "goodbye",
                next_id: None,
            }],
        }];

        let mut session = ChatSession::new(Script::new(DEAD_END), SessionConfig::default());
        session.start();

        assert!(session.select(0).is_none());
        // The user's line still lands, but the offered replies stay put.
        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.replies().len(), 1);
    }

    #[test]
    fn delivery_to_a_missing_node_is_swallowed() {
        static DANGLING: &[DialogueNode] = &[DialogueNode {
            id: 0,
            body: "hello",
            image: None,
            replies: &[crate::script::Reply {
                id: 1,
                text: "go nowhere",
                next_id: Some(42),
            }],
        }];

        let mut session = ChatSession::new(Script::new(DANGLING), SessionConfig::default());
        session.start();
        let pending = session.select(0).expect("pending");
        session.deliver(pending);

        // The transition simply does not occur.
        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.replies().len(), 1);
    }

    #[test]
    fn missing_start_node_leaves_the_session_blank() {
        let config = SessionConfig::default().with_start_node(9999);
        let mut session = ChatSession::new(Script::builtin(), config);
        session.start();

        assert!(session.started());
        assert!(session.messages().is_empty());
        assert!(session.replies().is_empty());
    }

    #[test]
    fn reset_invalidates_outstanding_deliveries() {
        let mut session = started_session();
        let stale = session.select(0).expect("pending minted before reset");

        session.reset();
        session.start();
        let fresh_len = session.messages().len();

        // The stale token must not touch the new conversation.
        session.deliver(stale);
        assert_eq!(session.messages().len(), fresh_len);
        assert_eq!(session.replies(), Script::builtin().get(0).unwrap().replies);
    }

    #[test]
    fn start_over_reply_reproduces_the_opening() {
        let mut session = started_session();
        let opening = session.messages()[0].text.clone();
        let opening_replies = session.replies().to_vec();

        // Walk the whole script to the final node.
        loop {
            let Some(pending) = session.select(0) else {
                panic!("builtin script never dead-ends");
            };
            session.deliver(pending);
            if pending.node_id() == 64 {
                break;
            }
        }

        assert_eq!(session.replies()[0].text, "Start over");
        let pending = session.select(0).expect("loop reply");
        session.deliver(pending);

        let last = session.messages().last().expect("looped message");
        assert_eq!(last.sender, Sender::Narrator);
        assert_eq!(last.text, opening);
        assert_eq!(session.replies(), opening_replies.as_slice());
    }

    #[test]
    fn transcript_export_round_trips() {
        let mut session = started_session();
        let pending = session.select(0).expect("pending");
        session.deliver(pending);

        let json = session.transcript_json().expect("serialize transcript");
        let parsed: Vec<Message> = serde_json::from_str(&json).expect("parse transcript");
        assert_eq!(parsed.len(), session.messages().len());
        assert_eq!(parsed[1].sender, Sender::User);
    }
}
