//! # StatusBar Component
//!
//! Bottom line with the display mode, replay status and key hints.
//!
//! Purely presentational: every prop comes from the event loop, which owns
//! the replay status and the display mode.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;

use crate::DisplayMode;
use crate::tui::component::Component;

const KEY_HINTS: &str = "enter: steps  esc: back  q: quit";

pub struct StatusBar<'a> {
    pub mode: DisplayMode,
    pub status_message: &'a str,
}

impl StatusBar<'_> {
    fn text(&self) -> String {
        let mode = match self.mode {
            DisplayMode::Portrait => "portrait",
            DisplayMode::Landscape => "landscape",
        };
        if self.status_message.is_empty() {
            format!("navhud ({mode}) | {KEY_HINTS}")
        } else {
            format!("navhud ({mode}) | {} | {KEY_HINTS}", self.status_message)
        }
    }
}

impl Component for StatusBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(
            Span::styled(self.text(), Style::default().add_modifier(Modifier::DIM)),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_status_bar_with_message() {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();

        let mut status_bar = StatusBar {
            mode: DisplayMode::Landscape,
            status_message: "Replay finished",
        };
        terminal.draw(|f| status_bar.render(f, f.area())).unwrap();

        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("navhud (landscape)"));
        assert!(text.contains("Replay finished"));
    }

    #[test]
    fn test_status_bar_without_message() {
        let status_bar = StatusBar {
            mode: DisplayMode::Portrait,
            status_message: "",
        };
        assert_eq!(status_bar.text(), format!("navhud (portrait) | {KEY_HINTS}"));
    }
}
