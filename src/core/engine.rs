//! # Reconciliation Engine
//!
//! Holds what is on screen and turns each new snapshot or banner into the
//! smallest set of [`Directive`]s that brings the screen up to date.
//!
//! ```text
//! on_route_progress(snapshot)          on_banner_instruction(content)
//!   1. distance text (anti-flicker)      1. maneuver icon (sticky angle)
//!   2. step list contents                2. primary text (always replaces)
//!   3. turn lanes (<= 70 s)              3. secondary text + layout
//!   4. then step (lanes win)
//!   5. step change -> icon prefetch
//! ```
//!
//! While rerouting, both paths are muted and held state is left alone.
//! Comparisons are on rendered values, never on event identity, so a
//! repeated tick with the same text emits nothing.
//!
//! The engine is single-threaded and never blocks. Hosts with several event
//! sources funnel them through one channel before calling in.

use log::{debug, info};

use crate::core::directive::{
    Directive, PRIMARY_MAX_LINES_ALONE, PRIMARY_MAX_LINES_WITH_SECONDARY, VERTICAL_BIAS_CENTERED,
    VERTICAL_BIAS_WITH_SECONDARY,
};
use crate::core::model::{BannerContent, ManeuverIcon, RouteProgressSnapshot, StepListEntry, StepToken, ThenStepInfo};

/// Turn lanes are only shown when the step ends within this many seconds.
pub const DEFAULT_TURN_LANE_MAX_DURATION_SECS: f64 = 70.0;

/// Visibility and text the engine believes the sink is showing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderState {
    pub last_distance_text: String,
    pub turn_lanes_visible: bool,
    pub then_step_visible: bool,
    pub secondary_text_visible: bool,
    pub instruction_list_visible: bool,
    pub is_rerouting: bool,
}

#[derive(Debug, Clone)]
pub struct ReconciliationEngine {
    state: RenderState,
    turn_lane_max_duration_secs: f64,
    /// Step seen on the previous tick; `None` until the first one.
    last_step: Option<StepToken>,
    /// Icon as last sent, so an absent angle can keep the previous one.
    maneuver_icon: ManeuverIcon,
    /// Then-step content as last shown.
    shown_then_step: Option<ThenStepInfo>,
    /// Latest step list from progress, and what the sink last received.
    latest_steps: Vec<StepListEntry>,
    shown_steps: Option<Vec<StepListEntry>>,
}

impl Default for ReconciliationEngine {
    fn default() -> Self {
        Self::new(DEFAULT_TURN_LANE_MAX_DURATION_SECS)
    }
}

impl ReconciliationEngine {
    pub fn new(turn_lane_max_duration_secs: f64) -> Self {
        Self {
            state: RenderState::default(),
            turn_lane_max_duration_secs,
            last_step: None,
            maneuver_icon: ManeuverIcon::default(),
            shown_then_step: None,
            latest_steps: Vec::new(),
            shown_steps: None,
        }
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn on_route_progress(&mut self, snapshot: &RouteProgressSnapshot) -> Vec<Directive> {
        if self.state.is_rerouting {
            debug!("Rerouting, ignoring progress for step {}", snapshot.current_step());
            return Vec::new();
        }

        let mut out = Vec::new();
        self.update_distance_text(snapshot, &mut out);
        self.update_step_list(snapshot, &mut out);
        self.update_turn_lanes(snapshot, &mut out);
        self.update_then_step(snapshot, &mut out);
        self.update_step(snapshot, &mut out);
        out
    }

    pub fn on_banner_instruction(&mut self, content: &BannerContent) -> Vec<Directive> {
        if self.state.is_rerouting {
            debug!("Rerouting, ignoring banner '{}'", content.primary.plain_text());
            return Vec::new();
        }

        let mut out = Vec::new();
        self.update_maneuver_icon(content, &mut out);
        out.push(Directive::SetPrimaryText(content.primary.components().to_vec()));
        self.update_secondary_text(content, &mut out);
        out
    }

    pub fn on_off_route_changed(&mut self, is_off_route: bool) -> Vec<Directive> {
        match (is_off_route, self.state.is_rerouting) {
            (true, false) => {
                info!("Off route, entering reroute mode");
                self.state.is_rerouting = true;
                vec![Directive::ShowReroute]
            }
            (false, true) => {
                info!("Back on route, leaving reroute mode");
                self.state.is_rerouting = false;
                vec![Directive::HideReroute, Directive::ShowProblemReportPrompt]
            }
            _ => Vec::new(),
        }
    }

    pub fn show_step_list(&mut self) -> Vec<Directive> {
        if self.state.instruction_list_visible {
            return Vec::new();
        }
        self.state.instruction_list_visible = true;
        self.shown_steps = Some(self.latest_steps.clone());
        vec![Directive::ShowStepList, Directive::UpdateStepList(self.latest_steps.clone())]
    }

    pub fn hide_step_list(&mut self) -> Vec<Directive> {
        if !self.state.instruction_list_visible {
            return Vec::new();
        }
        self.state.instruction_list_visible = false;
        self.shown_steps = None;
        vec![Directive::HideStepList]
    }

    pub fn toggle_step_list(&mut self) -> Vec<Directive> {
        if self.state.instruction_list_visible {
            self.hide_step_list()
        } else {
            self.show_step_list()
        }
    }

    /// Hides a visible step list. Returns whether the press was consumed,
    /// together with the directives to apply.
    pub fn handle_back_pressed(&mut self) -> (bool, Vec<Directive>) {
        let directives = self.hide_step_list();
        (!directives.is_empty(), directives)
    }

    /// Empty input never replaces populated text; an empty screen takes
    /// whatever text comes next.
    fn update_distance_text(&mut self, snapshot: &RouteProgressSnapshot, out: &mut Vec<Directive>) {
        let text = snapshot.distance_remaining_text();
        if text.is_empty() || text == self.state.last_distance_text {
            return;
        }
        self.state.last_distance_text = text.to_string();
        out.push(Directive::SetDistanceText(text.to_string()));
    }

    fn update_step_list(&mut self, snapshot: &RouteProgressSnapshot, out: &mut Vec<Directive>) {
        let entries = snapshot.remaining_steps();
        if self.latest_steps != entries {
            self.latest_steps = entries.to_vec();
        }
        if !self.state.instruction_list_visible {
            return;
        }
        if self.shown_steps.as_deref() != Some(entries) {
            self.shown_steps = Some(entries.to_vec());
            out.push(Directive::UpdateStepList(entries.to_vec()));
        }
    }

    fn update_turn_lanes(&mut self, snapshot: &RouteProgressSnapshot, out: &mut Vec<Directive>) {
        let should_show = !snapshot.turn_lanes().is_empty()
            && !snapshot.maneuver_modifier().is_empty()
            && snapshot.step_duration_remaining() <= self.turn_lane_max_duration_secs;

        match (should_show, self.state.turn_lanes_visible) {
            (true, false) => {
                debug!(
                    "Showing {} turn lanes for '{}'",
                    snapshot.turn_lanes().len(),
                    snapshot.maneuver_modifier()
                );
                self.state.turn_lanes_visible = true;
                out.push(Directive::ShowTurnLanes {
                    lanes: snapshot.turn_lanes().to_vec(),
                    modifier: snapshot.maneuver_modifier().to_string(),
                });
            }
            (false, true) => {
                debug!("Hiding turn lanes");
                self.state.turn_lanes_visible = false;
                out.push(Directive::HideTurnLanes);
            }
            _ => {}
        }
    }

    /// Runs after the lane update, so lanes shown on this tick already block
    /// the preview.
    fn update_then_step(&mut self, snapshot: &RouteProgressSnapshot, out: &mut Vec<Directive>) {
        let eligible = if self.state.turn_lanes_visible || !snapshot.should_show_then_step() {
            None
        } else {
            snapshot.then_step()
        };

        match eligible {
            Some(then_step) => {
                if self.shown_then_step.as_ref() != Some(then_step) {
                    debug!("Showing then step '{}'", then_step.text);
                    self.state.then_step_visible = true;
                    self.shown_then_step = Some(then_step.clone());
                    out.push(Directive::ShowThenStep(then_step.clone()));
                }
            }
            None => {
                if self.state.then_step_visible {
                    debug!("Hiding then step");
                    self.state.then_step_visible = false;
                    self.shown_then_step = None;
                    out.push(Directive::HideThenStep);
                }
            }
        }
    }

    fn update_step(&mut self, snapshot: &RouteProgressSnapshot, out: &mut Vec<Directive>) {
        let current = snapshot.current_step();
        if self.last_step == Some(current) {
            return;
        }
        debug!("New step {current}");
        self.last_step = Some(current);
        if let Some(upcoming) = snapshot.upcoming_step() {
            out.push(Directive::PrefetchIcon(upcoming));
        }
    }

    /// The angle only changes when the banner carries one. Absent degrees
    /// never clear it, whatever the maneuver type.
    fn update_maneuver_icon(&mut self, content: &BannerContent, out: &mut Vec<Directive>) {
        let roundabout_angle = content.roundabout_angle.or(self.maneuver_icon.roundabout_angle);
        self.maneuver_icon = ManeuverIcon {
            maneuver_type: content.maneuver_type.clone(),
            modifier: content.maneuver_modifier.clone(),
            roundabout_angle,
        };
        out.push(Directive::SetManeuverIcon(self.maneuver_icon.clone()));
    }

    fn update_secondary_text(&mut self, content: &BannerContent, out: &mut Vec<Directive>) {
        match &content.secondary {
            Some(secondary) => {
                if !self.state.secondary_text_visible {
                    self.state.secondary_text_visible = true;
                    out.push(Directive::SetPrimaryMaxLines(PRIMARY_MAX_LINES_WITH_SECONDARY));
                    out.push(Directive::SetVerticalBias(VERTICAL_BIAS_WITH_SECONDARY));
                }
                out.push(Directive::SetSecondaryText(secondary.components().to_vec()));
            }
            None => {
                if self.state.secondary_text_visible {
                    self.state.secondary_text_visible = false;
                    out.push(Directive::HideSecondaryText);
                    out.push(Directive::SetPrimaryMaxLines(PRIMARY_MAX_LINES_ALONE));
                    out.push(Directive::SetVerticalBias(VERTICAL_BIAS_CENTERED));
                }
            }
        }
    }
}
