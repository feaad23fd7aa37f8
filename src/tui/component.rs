use ratatui::Frame;
use ratatui::layout::Rect;

/// A reusable UI component.
///
/// Components receive their data as props (struct fields) and render to a
/// `Frame` within a given `Rect`. HUD components are built fresh for every
/// frame from the [`HudView`](super::view::HudView), so none of them keeps
/// state between draws.
pub trait Component {
    /// Render the component into the given area.
    ///
    /// Takes `&mut self` so a component can cache layout work during the
    /// render pass.
    fn render(&mut self, frame: &mut Frame, area: Rect);
}
