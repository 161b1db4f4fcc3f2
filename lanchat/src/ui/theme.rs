//! Color theme and styling for the chat TUI

use ratatui::style::{Color, Modifier, Style};

/// Chat UI color theme
#[derive(Debug, Clone)]
pub struct ChatTheme {
    // Base colors
    pub foreground: Color,
    pub border: Color,
    pub border_focused: Color,

    // Text colors
    pub user_text: Color,
    pub narrator_text: Color,
    pub system_text: Color,
    pub timestamp: Color,
    pub diagram: Color,

    // Reply picker
    pub reply_text: Color,
    pub reply_selected: Color,
}

impl Default for ChatTheme {
    fn default() -> Self {
        Self {
            foreground: Color::White,
            border: Color::DarkGray,
            border_focused: Color::Cyan,

            user_text: Color::Cyan,
            narrator_text: Color::White,
            system_text: Color::DarkGray,
            timestamp: Color::DarkGray,
            diagram: Color::Magenta,

            reply_text: Color::Gray,
            reply_selected: Color::LightGreen,
        }
    }
}

impl ChatTheme {
    /// Style for the user's echoed replies
    pub fn user_style(&self) -> Style {
        Style::default()
            .fg(self.user_text)
            .add_modifier(Modifier::ITALIC)
    }

    /// Style for narrator messages
    pub fn narrator_style(&self) -> Style {
        Style::default().fg(self.narrator_text)
    }

    /// Style for `**bold**` spans inside a message
    pub fn emphasis_style(&self, base: Style) -> Style {
        base.add_modifier(Modifier::BOLD)
    }

    /// Style for system hints
    pub fn system_style(&self) -> Style {
        Style::default()
            .fg(self.system_text)
            .add_modifier(Modifier::DIM)
    }

    /// Style for message timestamps
    pub fn timestamp_style(&self) -> Style {
        Style::default()
            .fg(self.timestamp)
            .add_modifier(Modifier::DIM)
    }

    /// Style for `[diagram: ...]` placeholders
    pub fn diagram_style(&self) -> Style {
        Style::default()
            .fg(self.diagram)
            .add_modifier(Modifier::DIM)
    }

    /// Style for the typing indicator
    pub fn typing_style(&self) -> Style {
        Style::default()
            .fg(self.narrator_text)
            .add_modifier(Modifier::DIM)
    }

    /// Style for one entry in the reply picker
    pub fn reply_style(&self, selected: bool) -> Style {
        if selected {
            Style::default()
                .fg(self.reply_selected)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.reply_text)
        }
    }

    /// Get border style
    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused {
            self.border_focused
        } else {
            self.border
        })
    }
}
