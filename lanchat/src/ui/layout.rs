//! Layout calculations for the chat TUI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Calculate the main layout areas
pub struct AppLayout {
    pub title_area: Rect,
    pub transcript_area: Rect,
    pub replies_area: Rect,
    pub status_bar: Rect,
}

impl AppLayout {
    /// Calculate layout based on terminal size.
    ///
    /// The reply picker grows with the number of offered replies, up to
    /// a third of the screen.
    pub fn calculate(area: Rect, reply_count: usize) -> Self {
        let picker_rows = (reply_count.max(1) as u16 + 2).min(area.height / 3);

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),           // Title bar
                Constraint::Min(5),              // Transcript
                Constraint::Length(picker_rows), // Reply picker
                Constraint::Length(1),           // Status bar
            ])
            .split(area);

        Self {
            title_area: main_chunks[0],
            transcript_area: main_chunks[1],
            replies_area: main_chunks[2],
            status_bar: main_chunks[3],
        }
    }
}

/// A centered rect of fixed size, clamped to the available area
pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_fills_the_area() {
        let area = Rect::new(0, 0, 80, 24);
        let layout = AppLayout::calculate(area, 1);

        let total = layout.title_area.height
            + layout.transcript_area.height
            + layout.replies_area.height
            + layout.status_bar.height;
        assert_eq!(total, area.height);
        assert_eq!(layout.replies_area.height, 3);
    }

    #[test]
    fn picker_is_capped_on_tiny_terminals() {
        let area = Rect::new(0, 0, 40, 12);
        let layout = AppLayout::calculate(area, 9);
        assert!(layout.replies_area.height <= area.height / 3);
        assert!(layout.transcript_area.height >= 5);
    }

    #[test]
    fn centered_rect_is_clamped() {
        let area = Rect::new(0, 0, 20, 10);
        let rect = centered_rect_fixed(60, 16, area);
        assert_eq!(rect.width, 20);
        assert_eq!(rect.height, 10);
    }
}
