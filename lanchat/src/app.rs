//! Main application state and logic

use std::time::{Duration, Instant};

use lanchat_core::{ChatSession, PendingDelivery};

use crate::ui::theme::ChatTheme;
use crate::ui::Overlay;

/// A narrator reply waiting out the typing delay.
struct PendingReply {
    delivery: PendingDelivery,
    due: Instant,
}

/// Main application state
pub struct App {
    pub session: ChatSession,

    // UI state
    pub theme: ChatTheme,
    overlay: Option<Overlay>,

    // Transcript display
    pub transcript_scroll: usize,
    pub scroll_locked_to_bottom: bool, // True = auto-scroll on new content

    // Reply picker
    pub selected_reply: usize,

    // Typing-delay delivery
    pending: Option<PendingReply>,

    // Status
    status_message: Option<String>,
    pub should_quit: bool,

    // Animation
    pub animation_frame: u8,
}

impl App {
    pub fn new(session: ChatSession) -> Self {
        Self {
            session,
            theme: ChatTheme::default(),
            overlay: None,
            transcript_scroll: 0,
            scroll_locked_to_bottom: true,
            selected_reply: 0,
            pending: None,
            status_message: None,
            should_quit: false,
            animation_frame: 0,
        }
    }

    /// Whether the conversation has begun (past the start screen).
    pub fn started(&self) -> bool {
        self.session.started()
    }

    /// Leave the start screen and seed the conversation.
    pub fn start_chat(&mut self) {
        self.session.start();
        self.selected_reply = 0;
        self.scroll_to_bottom();
    }

    /// Whether a narrator reply is waiting out the typing delay.
    pub fn is_typing(&self) -> bool {
        self.pending.is_some()
    }

    /// Choose the currently highlighted reply.
    ///
    /// The user's line lands in the transcript immediately; the
    /// narrator's answer is scheduled for after the typing delay.
    /// Ignored while a previous answer is still pending.
    pub fn choose_selected(&mut self) {
        if self.pending.is_some() {
            return;
        }

        let delay = Duration::from_millis(self.session.config().typing_delay_ms);
        if let Some(delivery) = self.session.select(self.selected_reply) {
            self.pending = Some(PendingReply {
                delivery,
                due: Instant::now() + delay,
            });
        }
        self.clear_status();
        if self.scroll_locked_to_bottom {
            self.scroll_to_bottom();
        }
    }

    /// Choose a reply by its 1-based on-screen number.
    pub fn choose_numbered(&mut self, number: usize) {
        if number == 0 || number > self.session.replies().len() {
            self.set_status(format!("No reply at position {number}"));
            return;
        }
        self.selected_reply = number - 1;
        self.choose_selected();
    }

    /// Apply the pending narrator reply once its deadline passes.
    /// Called every loop iteration so key mashing cannot stall delivery.
    pub fn poll_pending(&mut self) {
        let due = self
            .pending
            .as_ref()
            .map(|p| Instant::now() >= p.due)
            .unwrap_or(false);
        if !due {
            return;
        }

        if let Some(pending) = self.pending.take() {
            self.session.deliver(pending.delivery);
            self.selected_reply = 0;
            if self.scroll_locked_to_bottom {
                self.scroll_to_bottom();
            }
        }
    }

    /// Reset the conversation and return to the start screen.
    ///
    /// Any pending delivery is dropped here; even if one leaked, the
    /// session epoch guard would reject it.
    pub fn restart(&mut self) {
        self.pending = None;
        self.session.reset();
        self.selected_reply = 0;
        self.transcript_scroll = 0;
        self.scroll_locked_to_bottom = true;
        self.set_status("Conversation reset");
    }

    /// Move the reply highlight up, wrapping.
    pub fn select_prev_reply(&mut self) {
        let count = self.session.replies().len();
        if count == 0 {
            return;
        }
        self.selected_reply = (self.selected_reply + count - 1) % count;
    }

    /// Move the reply highlight down, wrapping.
    pub fn select_next_reply(&mut self) {
        let count = self.session.replies().len();
        if count == 0 {
            return;
        }
        self.selected_reply = (self.selected_reply + 1) % count;
    }

    /// Scroll transcript to bottom and lock to bottom
    pub fn scroll_to_bottom(&mut self) {
        // Set to max value - the widget will cap it to actual max_scroll
        self.transcript_scroll = usize::MAX / 2;
        self.scroll_locked_to_bottom = true;
    }

    /// Estimate max scroll based on transcript content
    /// Uses conservative estimate assuming ~60 char effective width
    fn estimate_max_scroll(&self) -> usize {
        const ESTIMATED_WIDTH: usize = 60;
        const ESTIMATED_VISIBLE_HEIGHT: usize = 20;

        let estimated_lines: usize = self
            .session
            .messages()
            .iter()
            .map(|message| {
                let body: usize = message
                    .text
                    .lines()
                    .map(|line| (line.len() / ESTIMATED_WIDTH).max(1))
                    .sum();
                // sender/time header + optional image line + trailing blank
                body + 2 + usize::from(message.image.is_some())
            })
            .sum();

        estimated_lines.saturating_sub(ESTIMATED_VISIBLE_HEIGHT)
    }

    /// Scroll transcript up (unlocks from bottom)
    pub fn scroll_up(&mut self, lines: usize) {
        // If scroll is at a huge "bottom" value, reset to estimated max first
        let max_scroll = self.estimate_max_scroll();
        if self.transcript_scroll > max_scroll {
            self.transcript_scroll = max_scroll;
        }
        self.transcript_scroll = self.transcript_scroll.saturating_sub(lines);
        self.scroll_locked_to_bottom = false;
    }

    /// Scroll transcript down
    pub fn scroll_down(&mut self, lines: usize) {
        self.transcript_scroll = self.transcript_scroll.saturating_add(lines);
        let max_scroll = self.estimate_max_scroll();
        self.transcript_scroll = self.transcript_scroll.min(max_scroll + 100);
        // User must press G to re-lock to bottom
    }

    /// Tick for animations (typing indicator dots)
    pub fn tick(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
    }

    /// Toggle help overlay
    pub fn toggle_help(&mut self) {
        if matches!(self.overlay, Some(Overlay::Help)) {
            self.overlay = None;
        } else {
            self.overlay = Some(Overlay::Help);
        }
    }

    pub fn close_overlay(&mut self) {
        self.overlay = None;
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    /// Set status message (always overwrites)
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lanchat_core::Sender;

    fn started_app() -> App {
        let mut app = App::new(ChatSession::builtin());
        app.start_chat();
        app
    }

    #[test]
    fn choosing_echoes_and_schedules_delivery() {
        let mut app = started_app();
        app.choose_selected();

        assert_eq!(app.session.messages().len(), 2);
        assert_eq!(app.session.messages()[1].sender, Sender::User);
        assert!(app.is_typing());
    }

    #[test]
    fn delivery_waits_for_the_deadline() {
        let mut app = started_app();
        app.choose_selected();

        // Deadline is in the future; polling must not deliver yet.
        if let Some(pending) = app.pending.as_mut() {
            pending.due = Instant::now() + Duration::from_secs(60);
        }
        app.poll_pending();
        assert_eq!(app.session.messages().len(), 2);
        assert!(app.is_typing());

        // Move the deadline into the past and poll again.
        if let Some(pending) = app.pending.as_mut() {
            pending.due = Instant::now();
        }
        app.poll_pending();
        assert_eq!(app.session.messages().len(), 3);
        assert!(!app.is_typing());
    }

    #[test]
    fn choosing_is_ignored_while_typing() {
        let mut app = started_app();
        app.choose_selected();
        app.choose_selected();

        // Only the first selection echoed.
        assert_eq!(app.session.messages().len(), 2);
    }

    #[test]
    fn restart_during_the_delay_drops_the_delivery() {
        let mut app = started_app();
        app.choose_selected();
        app.restart();

        assert!(!app.is_typing());
        assert!(!app.started());
        assert!(app.session.messages().is_empty());

        // Starting again yields a clean opening with no stray narrator reply.
        app.start_chat();
        app.poll_pending();
        assert_eq!(app.session.messages().len(), 1);
    }

    #[test]
    fn numbered_choice_out_of_range_sets_status() {
        let mut app = started_app();
        app.choose_numbered(5);

        assert_eq!(app.session.messages().len(), 1);
        assert_eq!(app.status_message(), Some("No reply at position 5"));
    }
}
