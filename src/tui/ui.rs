use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::DisplayMode;
use crate::tui::component::Component;
use crate::tui::components::{
    Alert, InstructionBanner, ManeuverPanel, StatusBar, StepList, ThenStep, TurnLanes,
};
use crate::tui::view::HudView;

const MANEUVER_PANEL_WIDTH: u16 = 14;
const HEADER_HEIGHT: u16 = 5;

struct HudAreas {
    alert: Option<Rect>,
    maneuver: Rect,
    banner: Rect,
    strip: Rect,
    body: Rect,
    status: Rect,
}

fn layout(area: Rect, view: &HudView, mode: DisplayMode) -> HudAreas {
    use Constraint::{Length, Min, Percentage};

    let alert_height = u16::from(view.rerouting || view.is_showing_problem_prompt());
    let [alert, main, status] = Layout::vertical([Length(alert_height), Min(0), Length(1)]).areas(area);
    let alert = (alert_height > 0).then_some(alert);

    match mode {
        DisplayMode::Portrait => {
            let [header, strip, body] =
                Layout::vertical([Length(HEADER_HEIGHT), Length(1), Min(0)]).areas(main);
            let [maneuver, banner] =
                Layout::horizontal([Length(MANEUVER_PANEL_WIDTH), Min(0)]).areas(header);
            HudAreas { alert, maneuver, banner, strip, body, status }
        }
        DisplayMode::Landscape => {
            let [left, body] = Layout::horizontal([Percentage(45), Min(0)]).areas(main);
            let [maneuver, banner, strip] =
                Layout::vertical([Length(4), Min(0), Length(1)]).areas(left);
            HudAreas { alert, maneuver, banner, strip, body, status }
        }
    }
}

pub fn draw_ui(frame: &mut Frame, view: &HudView, mode: DisplayMode, status_message: &str) {
    let areas = layout(frame.area(), view, mode);

    if let Some(alert_area) = areas.alert {
        let mut alert = if view.rerouting {
            Alert::reroute()
        } else {
            Alert::problem_report()
        };
        alert.render(frame, alert_area);
    }

    ManeuverPanel {
        icon: &view.maneuver,
        distance_text: &view.distance_text,
    }
    .render(frame, areas.maneuver);

    InstructionBanner {
        primary: &view.primary,
        secondary: view.secondary.as_deref(),
        max_lines: view.primary_max_lines,
        vertical_bias: view.vertical_bias,
        mode,
    }
    .render(frame, areas.banner);

    // Lanes and then-step share one strip; the engine never shows both
    if let Some(lanes) = &view.turn_lanes {
        TurnLanes {
            lanes: &lanes.lanes,
            modifier: &lanes.modifier,
        }
        .render(frame, areas.strip);
    } else if let Some(info) = &view.then_step {
        ThenStep { info }.render(frame, areas.strip);
    }

    if view.step_list_visible {
        StepList {
            entries: &view.step_list,
        }
        .render(frame, areas.body);
    }

    StatusBar { mode, status_message }.render(frame, areas.status);
}
