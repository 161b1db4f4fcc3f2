//! Quick-reply picker widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use lanchat_core::Reply;

use crate::ui::theme::ChatTheme;

/// Widget listing the currently offered replies
pub struct RepliesWidget<'a> {
    replies: &'a [Reply],
    theme: &'a ChatTheme,
    selected: usize,
    /// True while the narrator's answer is pending; the picker greys
    /// out and selection keys are ignored upstream.
    disabled: bool,
}

impl<'a> RepliesWidget<'a> {
    pub fn new(replies: &'a [Reply], theme: &'a ChatTheme) -> Self {
        Self {
            replies,
            theme,
            selected: 0,
            disabled: false,
        }
    }

    pub fn selected(mut self, selected: usize) -> Self {
        self.selected = selected;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

impl Widget for RepliesWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.disabled {
            " Your reply (waiting...) "
        } else {
            " Your reply [↑/↓ + Enter] "
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(!self.disabled));

        let inner = block.inner(area);
        block.render(area, buf);

        if self.replies.is_empty() {
            let line = Line::from(Span::styled(
                "No replies available.",
                self.theme.system_style(),
            ));
            Paragraph::new(line).render(inner, buf);
            return;
        }

        let lines: Vec<Line> = self
            .replies
            .iter()
            .enumerate()
            .map(|(i, reply)| {
                let is_selected = !self.disabled && i == self.selected;
                let marker = if is_selected { "▸" } else { " " };
                let style = if self.disabled {
                    self.theme.system_style()
                } else {
                    self.theme.reply_style(is_selected)
                };
                Line::from(Span::styled(
                    format!("{marker} {}. {}", i + 1, reply.text),
                    style,
                ))
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}
