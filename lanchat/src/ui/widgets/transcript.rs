//! Transcript display widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::scrollbar,
    text::{Line, Span},
    widgets::{
        Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
        StatefulWidget, Widget, Wrap,
    },
};

use lanchat_core::markup::{self, Fragment};
use lanchat_core::{Message, Sender};

use crate::ui::theme::ChatTheme;

/// Widget for displaying the conversation transcript
pub struct TranscriptWidget<'a> {
    messages: &'a [Message],
    narrator_name: &'a str,
    theme: &'a ChatTheme,
    scroll: usize,
    /// Animation frame for the typing indicator, when one should show.
    typing_frame: Option<u8>,
}

impl<'a> TranscriptWidget<'a> {
    pub fn new(messages: &'a [Message], narrator_name: &'a str, theme: &'a ChatTheme) -> Self {
        Self {
            messages,
            narrator_name,
            theme,
            scroll: 0,
            typing_frame: None,
        }
    }

    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn typing(mut self, frame: Option<u8>) -> Self {
        self.typing_frame = frame;
        self
    }

    /// Turn one message into its display lines: a sender/time header,
    /// the body rendered from markup fragments, and an optional
    /// diagram placeholder.
    fn message_lines(&self, message: &Message) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        let (label, base_style, prefix) = match message.sender {
            Sender::User => ("You", self.theme.user_style(), "> "),
            Sender::Narrator => (self.narrator_name, self.theme.narrator_style(), ""),
        };

        lines.push(Line::from(Span::styled(
            format!("{} · {}", label, message.time_label()),
            self.theme.timestamp_style(),
        )));

        let mut spans: Vec<Span<'static>> = vec![Span::styled(prefix.to_string(), base_style)];
        for fragment in markup::parse(&message.text) {
            match fragment {
                Fragment::Text(text) => spans.push(Span::styled(text, base_style)),
                Fragment::Bold(text) => {
                    spans.push(Span::styled(text, self.theme.emphasis_style(base_style)))
                }
                Fragment::Break => {
                    lines.push(Line::from(std::mem::take(&mut spans)));
                    spans.push(Span::styled(prefix.to_string(), base_style));
                }
            }
        }
        lines.push(Line::from(spans));

        if let Some(image) = &message.image {
            lines.push(Line::from(Span::styled(
                format!("[diagram: {image}]"),
                self.theme.diagram_style(),
            )));
        }

        // Blank line between messages
        lines.push(Line::from(""));
        lines
    }

    fn typing_line(&self, frame: u8) -> Line<'static> {
        let dots = match (frame / 3) % 3 {
            0 => ".",
            1 => "..",
            _ => "...",
        };
        Line::from(Span::styled(
            format!("{} is typing{dots}", self.narrator_name),
            self.theme.typing_style(),
        ))
    }
}

impl Widget for TranscriptWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Transcript [j/k scroll] ")
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(true));

        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines: Vec<Line> = Vec::new();
        for message in self.messages {
            lines.extend(self.message_lines(message));
        }

        if let Some(frame) = self.typing_frame {
            lines.push(self.typing_line(frame));
        }

        // Calculate scroll position
        let visible_height = inner.height as usize;
        let total_lines = lines.len();
        let max_scroll = total_lines.saturating_sub(visible_height);
        let scroll = self.scroll.min(max_scroll);

        let paragraph = Paragraph::new(lines)
            .scroll((scroll as u16, 0))
            .wrap(Wrap { trim: false });

        paragraph.render(inner, buf);

        // Render scrollbar if content exceeds visible area
        if total_lines > visible_height {
            let scrollbar_area = Rect {
                x: inner.x + inner.width.saturating_sub(1),
                y: inner.y,
                width: 1,
                height: inner.height,
            };

            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .symbols(scrollbar::VERTICAL)
                .thumb_style(Style::default().fg(Color::DarkGray))
                .track_style(Style::default().fg(Color::Black))
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓"));

            let mut scrollbar_state = ScrollbarState::new(max_scroll).position(scroll);
            scrollbar.render(scrollbar_area, buf, &mut scrollbar_state);

            // Hint at the bottom when more content is below
            if scroll < max_scroll {
                let remaining = max_scroll - scroll;
                let hint = format!(" ↓{remaining} more ");
                let hint_y = inner.y + inner.height.saturating_sub(1);
                let hint_style = Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::DIM);
                for (i, ch) in hint.chars().enumerate() {
                    let x = inner.x + (i as u16);
                    if x < inner.x + inner.width.saturating_sub(2) {
                        buf[(x, hint_y)].set_char(ch).set_style(hint_style);
                    }
                }
            }
        }
    }
}
