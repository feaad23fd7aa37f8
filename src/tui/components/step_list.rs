//! # StepList Component
//!
//! Overlay listing the remaining maneuvers: glyph, instruction, distance.
//! Shown and hidden only by directives; Esc/Backspace hides it through the
//! core back-press handler, not here.

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Cell, Clear, Row, Table};

use crate::core::model::StepListEntry;
use crate::tui::component::Component;
use crate::tui::components::maneuver::icon_glyph;

pub struct StepList<'a> {
    pub entries: &'a [StepListEntry],
}

impl Component for StepList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let rows = self.entries.iter().map(|entry| {
            Row::new(vec![
                Cell::from(icon_glyph(&entry.maneuver))
                    .style(Style::default().fg(Color::Cyan)),
                Cell::from(entry.primary_text.clone()),
                Cell::from(entry.distance_text.clone())
                    .style(Style::default().add_modifier(Modifier::BOLD)),
            ])
        });

        let title = format!("Steps ({})", self.entries.len());
        let table = Table::new(
            rows,
            [Constraint::Length(6), Constraint::Min(10), Constraint::Length(9)],
        )
        .block(Block::bordered().title(title));

        frame.render_widget(Clear, area);
        frame.render_widget(table, area);
    }
}
