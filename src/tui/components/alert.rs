use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

/// Full-width single-line notice.
pub struct Alert<'a> {
    pub message: &'a str,
    pub style: Style,
}

impl<'a> Alert<'a> {
    pub fn reroute() -> Self {
        Self {
            message: "Rerouting…",
            style: Style::default().fg(Color::Black).bg(Color::Yellow).add_modifier(Modifier::BOLD),
        }
    }

    pub fn problem_report() -> Self {
        Self {
            message: "Route changed. Report a problem?",
            style: Style::default().fg(Color::Black).bg(Color::Cyan),
        }
    }
}

impl Component for Alert<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new(self.message)
            .alignment(Alignment::Center)
            .style(self.style);
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_reroute_alert_is_styled() {
        let backend = TestBackend::new(30, 1);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|f| Alert::reroute().render(f, f.area()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text = buffer.content().iter().map(|c| c.symbol()).collect::<String>();
        assert!(text.contains("Rerouting"));
        assert_eq!(buffer[(0, 0)].bg, Color::Yellow);
    }
}
