//! # InstructionBanner Component
//!
//! Primary and secondary banner text.
//!
//! ## Fitting the primary line
//!
//! The primary text gets at most `max_lines` lines (two alone, one when a
//! secondary line is showing). When the full text does not fit, components
//! carrying an abbreviation are swapped for it one at a time, lowest
//! `abbreviation_priority` first, until it fits. If it still overflows, the
//! last visible line ends in `…`.
//!
//! ## Vertical bias
//!
//! In portrait the text block sits at `vertical_bias` of the free space
//! (0.5 centered, 0.65 a little low to make room for the secondary line).
//! Landscape always pins it to the top.

use std::borrow::Cow;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::DisplayMode;
use crate::core::model::TextComponent;
use crate::tui::component::Component;

pub struct InstructionBanner<'a> {
    pub primary: &'a [TextComponent],
    pub secondary: Option<&'a [TextComponent]>,
    pub max_lines: u8,
    pub vertical_bias: f32,
    pub mode: DisplayMode,
}

/// Joins components, using the abbreviation for any index in `abbreviated`.
fn join_components(components: &[TextComponent], abbreviated: &[usize]) -> String {
    components
        .iter()
        .enumerate()
        .map(|(i, c)| match &c.abbreviation {
            Some(abbr) if abbreviated.contains(&i) => abbr.as_str(),
            _ => c.text.as_str(),
        })
        .collect()
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    textwrap::wrap(text, width.max(1))
        .into_iter()
        .map(Cow::into_owned)
        .collect()
}

/// Wraps the primary text into at most `max_lines` lines of `width` columns.
pub fn fit_primary(components: &[TextComponent], width: usize, max_lines: usize) -> Vec<String> {
    let max_lines = max_lines.max(1);
    let mut order: Vec<(usize, u32)> = components
        .iter()
        .enumerate()
        .filter(|(_, c)| c.abbreviation.is_some())
        .map(|(i, c)| (i, c.abbreviation_priority.unwrap_or(u32::MAX)))
        .collect();
    order.sort_by_key(|&(i, priority)| (priority, i));

    let mut abbreviated = Vec::new();
    let mut lines = wrap(&join_components(components, &abbreviated), width);
    for (index, _) in order {
        if lines.len() <= max_lines {
            break;
        }
        abbreviated.push(index);
        lines = wrap(&join_components(components, &abbreviated), width);
    }

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            *last = with_ellipsis(last, width);
        }
    }
    lines
}

fn with_ellipsis(line: &str, width: usize) -> String {
    let mut out = String::new();
    for ch in line.chars() {
        let candidate = format!("{out}{ch}");
        if candidate.width() + 1 > width {
            break;
        }
        out = candidate;
    }
    out.push('…');
    out
}

/// Rows above the text block for a given bias.
pub fn top_padding(free_rows: u16, vertical_bias: f32, mode: DisplayMode) -> u16 {
    match mode {
        DisplayMode::Portrait => (f32::from(free_rows) * vertical_bias.clamp(0.0, 1.0)).round() as u16,
        DisplayMode::Landscape => 0,
    }
}

impl Component for InstructionBanner<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = usize::from(area.width);
        let primary_style = Style::default().add_modifier(Modifier::BOLD);
        let secondary_style = Style::default().fg(Color::Gray);

        let mut lines: Vec<Line> = fit_primary(self.primary, width, usize::from(self.max_lines))
            .into_iter()
            .map(|l| Line::styled(l, primary_style))
            .collect();
        if let Some(secondary) = self.secondary {
            let text = join_components(secondary, &[]);
            if let Some(first) = wrap(&text, width).into_iter().next() {
                lines.push(Line::styled(first, secondary_style));
            }
        }

        let block_rows = (lines.len() as u16).min(area.height);
        let free_rows = area.height - block_rows;
        let top = top_padding(free_rows, self.vertical_bias, self.mode);
        let text_area = Rect {
            y: area.y + top,
            height: area.height - top,
            ..area
        };
        frame.render_widget(Paragraph::new(lines), text_area);
    }
}
