//! # HUD View
//!
//! Presentation state of the terminal HUD. The view is a passive
//! [`RenderSink`]: it records what the directives say and `ui::draw_ui` reads
//! it back every frame. It never decides visibility on its own, except for
//! the problem-report prompt which clears itself after a while.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use log::debug;

use crate::core::directive::{Directive, PRIMARY_MAX_LINES_ALONE, RenderSink, VERTICAL_BIAS_CENTERED};
use crate::core::model::{LaneIndicator, ManeuverIcon, StepListEntry, StepToken, TextComponent, ThenStepInfo};

/// How long the problem-report prompt stays up after a reroute.
pub const PROBLEM_PROMPT_DURATION: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq)]
pub struct LaneView {
    pub lanes: Vec<LaneIndicator>,
    pub modifier: String,
}

#[derive(Debug, Clone)]
pub struct HudView {
    pub distance_text: String,
    pub maneuver: ManeuverIcon,
    pub primary: Vec<TextComponent>,
    pub primary_max_lines: u8,
    pub secondary: Option<Vec<TextComponent>>,
    pub vertical_bias: f32,
    pub turn_lanes: Option<LaneView>,
    pub then_step: Option<ThenStepInfo>,
    pub rerouting: bool,
    pub problem_prompt_until: Option<Instant>,
    pub step_list_visible: bool,
    pub step_list: Vec<StepListEntry>,
    /// Steps whose icons were warmed up. Glyphs are drawn from text, so
    /// this only tracks what was asked for.
    pub prefetched: HashSet<StepToken>,
    pub applied: u64,
}

impl Default for HudView {
    fn default() -> Self {
        Self {
            distance_text: String::new(),
            maneuver: ManeuverIcon::default(),
            primary: Vec::new(),
            primary_max_lines: PRIMARY_MAX_LINES_ALONE,
            secondary: None,
            vertical_bias: VERTICAL_BIAS_CENTERED,
            turn_lanes: None,
            then_step: None,
            rerouting: false,
            problem_prompt_until: None,
            step_list_visible: false,
            step_list: Vec::new(),
            prefetched: HashSet::new(),
            applied: 0,
        }
    }
}

impl HudView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_showing_problem_prompt(&self) -> bool {
        self.problem_prompt_until.is_some()
    }

    /// Clears the problem-report prompt once it has expired. Returns true if
    /// anything changed.
    pub fn expire_prompt(&mut self, now: Instant) -> bool {
        match self.problem_prompt_until {
            Some(until) if now >= until => {
                self.problem_prompt_until = None;
                true
            }
            _ => false,
        }
    }

    pub fn time_until_prompt_expiry(&self, now: Instant) -> Option<Duration> {
        self.problem_prompt_until.map(|until| until.saturating_duration_since(now))
    }
}

impl RenderSink for HudView {
    fn apply(&mut self, directive: &Directive) {
        self.applied += 1;
        match directive {
            Directive::SetDistanceText(text) => self.distance_text = text.clone(),
            Directive::ShowTurnLanes { lanes, modifier } => {
                self.turn_lanes = Some(LaneView {
                    lanes: lanes.clone(),
                    modifier: modifier.clone(),
                });
            }
            Directive::HideTurnLanes => self.turn_lanes = None,
            Directive::ShowThenStep(info) => self.then_step = Some(info.clone()),
            Directive::HideThenStep => self.then_step = None,
            Directive::SetManeuverIcon(icon) => self.maneuver = icon.clone(),
            Directive::SetPrimaryText(components) => self.primary = components.clone(),
            Directive::SetPrimaryMaxLines(lines) => self.primary_max_lines = *lines,
            Directive::SetSecondaryText(components) => self.secondary = Some(components.clone()),
            Directive::HideSecondaryText => self.secondary = None,
            Directive::SetVerticalBias(bias) => self.vertical_bias = bias.clamp(0.0, 1.0),
            Directive::PrefetchIcon(step) => {
                if self.prefetched.insert(*step) {
                    debug!("Prefetched icon for step {}", step);
                }
            }
            Directive::ShowReroute => self.rerouting = true,
            Directive::HideReroute => self.rerouting = false,
            Directive::ShowProblemReportPrompt => {
                self.problem_prompt_until = Some(Instant::now() + PROBLEM_PROMPT_DURATION);
            }
            Directive::ShowStepList => self.step_list_visible = true,
            Directive::HideStepList => self.step_list_visible = false,
            Directive::UpdateStepList(entries) => self.step_list = entries.clone(),
        }
    }
}
