//! # TurnLanes Component
//!
//! One glyph per lane, centered. Lanes usable for the upcoming maneuver are
//! highlighted; the rest are dimmed.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::core::model::LaneIndicator;
use crate::tui::component::Component;
use crate::tui::components::maneuver::direction_glyph;

const LANE_SEPARATOR: &str = " │ ";

pub struct TurnLanes<'a> {
    pub lanes: &'a [LaneIndicator],
    pub modifier: &'a str,
}

/// Draws the lane toward the maneuver's direction when it allows it,
/// otherwise its first listed direction.
fn lane_glyph(lane: &LaneIndicator, modifier: &str) -> &'static str {
    if lane.directions.contains(modifier) {
        return direction_glyph(modifier);
    }
    lane.directions
        .iter()
        .next()
        .map(|d| direction_glyph(d))
        .unwrap_or(" ")
}

impl TurnLanes<'_> {
    fn spans(&self) -> Vec<Span<'static>> {
        let active = Style::default().fg(Color::Green).add_modifier(Modifier::BOLD);
        let inactive = Style::default().fg(Color::DarkGray);

        let mut spans = Vec::new();
        for (i, lane) in self.lanes.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(LANE_SEPARATOR, inactive));
            }
            let style = if lane.matches(self.modifier) { active } else { inactive };
            spans.push(Span::styled(lane_glyph(lane, self.modifier), style));
        }
        spans
    }
}

impl Component for TurnLanes<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let spans = self.spans();
        let width: usize = spans.iter().map(|s| s.content.width()).sum();
        let pad = usize::from(area.width).saturating_sub(width) / 2;

        let mut line = vec![Span::raw(" ".repeat(pad))];
        line.extend(spans);
        frame.render_widget(Paragraph::new(Line::from(line)), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_lane_glyph_prefers_maneuver_direction() {
        let lane = LaneIndicator::new(["left", "straight"], true);
        assert_eq!(lane_glyph(&lane, "left"), "←");
        // BTreeSet order: "left" < "straight"
        assert_eq!(lane_glyph(&lane, "right"), "←");
        assert_eq!(lane_glyph(&LaneIndicator::new(["straight"], false), "left"), "↑");
    }

    #[test]
    fn test_lanes_render_centered() {
        let backend = TestBackend::new(21, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        let lanes = vec![
            LaneIndicator::new(["left"], true),
            LaneIndicator::new(["straight"], false),
        ];

        terminal
            .draw(|f| {
                TurnLanes {
                    lanes: &lanes,
                    modifier: "left",
                }
                .render(f, f.area());
            })
            .unwrap();

        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        // "← │ ↑" is 5 wide, so 8 columns of padding
        assert_eq!(text.find('←'), Some(8));
        assert!(text.contains("← │ ↑"));
    }
}
