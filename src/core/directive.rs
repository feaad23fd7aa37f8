//! # Render Directives
//!
//! The engine never touches a view. It emits directives, and a [`RenderSink`]
//! applies them. Every directive is idempotent: applying it twice leaves the
//! surface as applying it once would.
//!
//! A sink starts out matching the engine's initial state: everything hidden,
//! empty text, primary text on two lines, vertical bias 0.5.

use serde::Serialize;

use crate::core::model::{LaneIndicator, ManeuverIcon, StepListEntry, StepToken, TextComponent, ThenStepInfo};

pub const PRIMARY_MAX_LINES_WITH_SECONDARY: u8 = 1;
pub const PRIMARY_MAX_LINES_ALONE: u8 = 2;
pub const VERTICAL_BIAS_WITH_SECONDARY: f32 = 0.65;
pub const VERTICAL_BIAS_CENTERED: f32 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "directive", content = "args", rename_all = "snake_case")]
pub enum Directive {
    SetDistanceText(String),
    ShowTurnLanes {
        lanes: Vec<LaneIndicator>,
        modifier: String,
    },
    HideTurnLanes,
    ShowThenStep(ThenStepInfo),
    HideThenStep,
    SetManeuverIcon(ManeuverIcon),
    SetPrimaryText(Vec<TextComponent>),
    SetPrimaryMaxLines(u8),
    SetSecondaryText(Vec<TextComponent>),
    HideSecondaryText,
    /// Vertical position of the banner text block, 0.0 top to 1.0 bottom.
    /// Only portrait layouts honour it.
    SetVerticalBias(f32),
    /// Fire-and-forget: sinks swallow prefetch failures.
    PrefetchIcon(StepToken),
    ShowReroute,
    HideReroute,
    ShowProblemReportPrompt,
    ShowStepList,
    HideStepList,
    UpdateStepList(Vec<StepListEntry>),
}

impl Directive {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Directive::SetDistanceText(_) => "set_distance_text",
            Directive::ShowTurnLanes { .. } => "show_turn_lanes",
            Directive::HideTurnLanes => "hide_turn_lanes",
            Directive::ShowThenStep(_) => "show_then_step",
            Directive::HideThenStep => "hide_then_step",
            Directive::SetManeuverIcon(_) => "set_maneuver_icon",
            Directive::SetPrimaryText(_) => "set_primary_text",
            Directive::SetPrimaryMaxLines(_) => "set_primary_max_lines",
            Directive::SetSecondaryText(_) => "set_secondary_text",
            Directive::HideSecondaryText => "hide_secondary_text",
            Directive::SetVerticalBias(_) => "set_vertical_bias",
            Directive::PrefetchIcon(_) => "prefetch_icon",
            Directive::ShowReroute => "show_reroute",
            Directive::HideReroute => "hide_reroute",
            Directive::ShowProblemReportPrompt => "show_problem_report_prompt",
            Directive::ShowStepList => "show_step_list",
            Directive::HideStepList => "hide_step_list",
            Directive::UpdateStepList(_) => "update_step_list",
        }
    }
}

/// A passive surface that applies directives.
pub trait RenderSink {
    fn apply(&mut self, directive: &Directive);

    fn apply_all(&mut self, directives: &[Directive]) {
        for directive in directives {
            self.apply(directive);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<&'static str>);

    impl RenderSink for Recorder {
        fn apply(&mut self, directive: &Directive) {
            self.0.push(directive.name());
        }
    }

    #[test]
    fn test_apply_all_preserves_order() {
        let mut sink = Recorder::default();
        sink.apply_all(&[Directive::ShowReroute, Directive::HideReroute, Directive::ShowProblemReportPrompt]);
        assert_eq!(sink.0, vec!["show_reroute", "hide_reroute", "show_problem_report_prompt"]);
    }

    #[test]
    fn test_directive_json_is_adjacently_tagged() {
        let json = serde_json::to_value(Directive::SetDistanceText("200 m".to_string())).unwrap();
        assert_eq!(json["directive"], "set_distance_text");
        assert_eq!(json["args"], "200 m");

        let unit = serde_json::to_value(Directive::HideTurnLanes).unwrap();
        assert_eq!(unit["directive"], "hide_turn_lanes");
        assert!(unit.get("args").is_none());
    }
}
