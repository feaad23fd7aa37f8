use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::model::ThenStepInfo;
use crate::tui::component::Component;
use crate::tui::components::maneuver::maneuver_glyph;

/// "Then ↱ Oak Ave" strip under the banner.
pub struct ThenStep<'a> {
    pub info: &'a ThenStepInfo,
}

impl Component for ThenStep<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let glyph = maneuver_glyph(
            &self.info.maneuver_type,
            &self.info.maneuver_modifier,
            self.info.roundabout_angle,
        );
        let line = Line::from(vec![
            Span::styled("Then ", Style::default().fg(Color::Gray)),
            Span::styled(glyph, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(" "),
            Span::raw(self.info.text.clone()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::then_step_info;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_then_step_renders_glyph_and_text() {
        let backend = TestBackend::new(40, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        let info = then_step_info("Oak Ave");

        terminal
            .draw(|f| ThenStep { info: &info }.render(f, f.area()))
            .unwrap();

        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.starts_with("Then ← Oak Ave"));
    }
}
