//! Render orchestration for the chat TUI

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::ui::layout::{centered_rect_fixed, AppLayout};
use crate::ui::widgets::{RepliesWidget, TranscriptWidget};

/// Overlay types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Help,
}

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if app.started() {
        render_chat(frame, app, area);
    } else {
        render_start_screen(frame, app, area);
    }

    // Render overlay if present
    if let Some(overlay) = app.overlay() {
        match overlay {
            Overlay::Help => render_help_overlay(frame, app, area),
        }
    }
}

/// Render the running conversation
fn render_chat(frame: &mut Frame, app: &App, area: Rect) {
    let layout = AppLayout::calculate(area, app.session.replies().len());

    render_title_bar(frame, app, layout.title_area);

    let typing = app.is_typing().then_some(app.animation_frame);
    let transcript = TranscriptWidget::new(
        app.session.messages(),
        &app.session.config().narrator_name,
        &app.theme,
    )
    .scroll(app.transcript_scroll)
    .typing(typing);
    frame.render_widget(transcript, layout.transcript_area);

    let replies = RepliesWidget::new(app.session.replies(), &app.theme)
        .selected(app.selected_reply)
        .disabled(app.is_typing());
    frame.render_widget(replies, layout.replies_area);

    render_status_bar(frame, app, layout.status_bar);
}

/// Render the title bar
fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let config = app.session.config();
    let title = format!(" {} — {} ", config.narrator_name, config.narrator_tagline);

    let line = Line::from(Span::styled(
        title,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let line = match app.status_message() {
        Some(message) => Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Yellow),
        )),
        None => Line::from(Span::styled(
            " ↑/↓ pick a reply · Enter send · j/k scroll · r restart · ? help · q quit",
            app.theme.system_style(),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the start screen card
fn render_start_screen(frame: &mut Frame, app: &App, area: Rect) {
    let popup_area = centered_rect_fixed(64, 16, area);
    frame.render_widget(Clear, popup_area);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Step back in time to the early 1970s and chat with one of",
            app.theme.narrator_style(),
        )),
        Line::from(Span::styled(
            "the pioneers who created the first local area networks.",
            app.theme.narrator_style(),
        )),
        Line::from(Span::styled(
            "Learn how they solved the fundamental challenges of",
            app.theme.narrator_style(),
        )),
        Line::from(Span::styled(
            "connecting computers together.",
            app.theme.narrator_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Ask questions about how data is transmitted, how computers",
            app.theme.narrator_style(),
        )),
        Line::from(Span::styled(
            "identify each other, and how they avoid conflicts when",
            app.theme.narrator_style(),
        )),
        Line::from(Span::styled(
            "sharing the same wire.",
            app.theme.narrator_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to start the chat, q to quit.",
            Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        )),
    ];

    let block = Block::default()
        .title(" Chat with the Creator of the First LAN ")
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true));

    let paragraph = Paragraph::new(text).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, popup_area);
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let popup_area = centered_rect_fixed(46, 16, area);
    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(Span::styled(
            " First LAN Chat - Help ",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Replies:",
            Style::default().add_modifier(Modifier::UNDERLINED),
        )),
        Line::from("  ↑/↓ or Tab     Highlight a reply"),
        Line::from("  Enter          Send the highlighted reply"),
        Line::from("  1-9            Send reply by number"),
        Line::from(""),
        Line::from(Span::styled(
            "Transcript:",
            Style::default().add_modifier(Modifier::UNDERLINED),
        )),
        Line::from("  j/k            Scroll down/up"),
        Line::from("  g/G            Jump to top/bottom"),
        Line::from("  PgUp/PgDn      Scroll by page"),
        Line::from("  Mouse wheel    Scroll"),
        Line::from(""),
        Line::from("  r restart · q quit"),
        Line::from(Span::styled(
            "Press Esc or q to close",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, popup_area);
}
