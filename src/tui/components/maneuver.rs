//! # Maneuver Panel
//!
//! The big arrow and the distance to the maneuver. Glyphs are plain text,
//! so the same lookup serves lanes, the then-step row and the step list.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::core::model::ManeuverIcon;
use crate::tui::component::Component;

/// Arrow for a maneuver direction. Unknown directions fall back to straight.
pub fn direction_glyph(modifier: &str) -> &'static str {
    match modifier {
        "uturn" => "↶",
        "sharp right" => "↘",
        "right" => "→",
        "slight right" => "↗",
        "sharp left" => "↙",
        "left" => "←",
        "slight left" => "↖",
        _ => "↑",
    }
}

/// Glyph for a whole maneuver, including roundabout exit angle when known.
pub fn maneuver_glyph(maneuver_type: &str, modifier: &str, roundabout_angle: Option<f32>) -> String {
    match maneuver_type {
        "arrive" => "◎".to_string(),
        "roundabout" | "rotary" | "roundabout turn" => match roundabout_angle {
            Some(angle) => format!("↻ {:.0}°", angle),
            None => "↻".to_string(),
        },
        _ => direction_glyph(modifier).to_string(),
    }
}

pub fn icon_glyph(icon: &ManeuverIcon) -> String {
    maneuver_glyph(&icon.maneuver_type, &icon.modifier, icon.roundabout_angle)
}

pub struct ManeuverPanel<'a> {
    pub icon: &'a ManeuverIcon,
    pub distance_text: &'a str,
}

impl Component for ManeuverPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let glyph = if self.icon.maneuver_type.is_empty() {
            String::new()
        } else {
            icon_glyph(self.icon)
        };
        let lines = vec![
            Line::from(Span::styled(
                glyph,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                self.distance_text.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().border_style(Style::default().add_modifier(Modifier::DIM)));
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_roundabout_glyph_shows_angle() {
        assert_eq!(maneuver_glyph("roundabout", "right", Some(45.0)), "↻ 45°");
        assert_eq!(maneuver_glyph("roundabout", "right", None), "↻");
        assert_eq!(maneuver_glyph("turn", "left", Some(45.0)), "←");
        assert_eq!(maneuver_glyph("arrive", "", None), "◎");
    }

    #[test]
    fn test_unknown_direction_is_straight() {
        assert_eq!(direction_glyph("straight"), "↑");
        assert_eq!(direction_glyph("sideways"), "↑");
    }

    #[test]
    fn test_panel_renders_glyph_and_distance() {
        let backend = TestBackend::new(20, 4);
        let mut terminal = Terminal::new(backend).unwrap();
        let icon = ManeuverIcon {
            maneuver_type: "turn".to_string(),
            modifier: "right".to_string(),
            roundabout_angle: None,
        };

        terminal
            .draw(|f| {
                ManeuverPanel {
                    icon: &icon,
                    distance_text: "200 m",
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
        assert!(text.contains('→'));
        assert!(text.contains("200 m"));
    }
}
