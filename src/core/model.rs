//! # Data Model
//!
//! Immutable values the engine reconciles against its held state.
//!
//! ```text
//! RouteProgressSnapshot            BannerContent
//! ├── distance_remaining_text      ├── maneuver_type / maneuver_modifier
//! ├── turn_lanes: [LaneIndicator]  ├── roundabout_angle: Option<f32>
//! ├── maneuver_modifier            ├── primary: TextSpec (never empty)
//! ├── step_duration_remaining      └── secondary: Option<TextSpec>
//! ├── then_step: Option<ThenStepInfo>
//! ├── should_show_then_step
//! ├── current_step: StepToken
//! ├── upcoming_step: Option<StepToken>
//! └── remaining_steps: [StepListEntry]
//! ```
//!
//! Snapshots are built once per progress tick and never mutated afterwards,
//! so their fields are private and read through accessors.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Opaque identity of a route step. Only ever compared, never displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StepToken {
    leg: u32,
    step: u32,
}

impl StepToken {
    pub fn new(leg: u32, step: u32) -> Self {
        Self { leg, step }
    }
}

impl fmt::Display for StepToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.leg, self.step)
    }
}

/// One lane of a turn-lane indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneIndicator {
    /// Permitted directions, e.g. `"left"`, `"straight"`, `"slight right"`.
    pub directions: BTreeSet<String>,
    /// Whether the lane can be used for the upcoming maneuver.
    pub valid: bool,
}

impl LaneIndicator {
    pub fn new<I, S>(directions: I, valid: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            directions: directions.into_iter().map(Into::into).collect(),
            valid,
        }
    }

    /// True if this lane should be drawn highlighted for `modifier`.
    pub fn matches(&self, modifier: &str) -> bool {
        self.valid && self.directions.contains(modifier)
    }
}

/// Preview of the maneuver that follows the upcoming one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThenStepInfo {
    pub maneuver_type: String,
    pub maneuver_modifier: String,
    pub roundabout_angle: Option<f32>,
    pub text: String,
}

/// Maneuver icon parameters as shown on the banner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManeuverIcon {
    pub maneuver_type: String,
    pub modifier: String,
    pub roundabout_angle: Option<f32>,
}

/// A row of the step list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepListEntry {
    pub step: StepToken,
    pub maneuver: ManeuverIcon,
    pub primary_text: String,
    pub distance_text: String,
}

/// Everything the engine needs from one progress tick.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteProgressSnapshot {
    distance_remaining_text: String,
    turn_lanes: Vec<LaneIndicator>,
    maneuver_modifier: String,
    step_duration_remaining: f64,
    then_step: Option<ThenStepInfo>,
    should_show_then_step: bool,
    current_step: StepToken,
    upcoming_step: Option<StepToken>,
    remaining_steps: Vec<StepListEntry>,
}

impl RouteProgressSnapshot {
    /// Starts a snapshot for `current_step` with every optional part empty.
    pub fn builder(current_step: StepToken) -> SnapshotParts {
        SnapshotParts {
            snapshot: RouteProgressSnapshot {
                distance_remaining_text: String::new(),
                turn_lanes: Vec::new(),
                maneuver_modifier: String::new(),
                step_duration_remaining: f64::INFINITY,
                then_step: None,
                should_show_then_step: false,
                current_step,
                upcoming_step: None,
                remaining_steps: Vec::new(),
            },
        }
    }

    pub fn distance_remaining_text(&self) -> &str {
        &self.distance_remaining_text
    }

    pub fn turn_lanes(&self) -> &[LaneIndicator] {
        &self.turn_lanes
    }

    pub fn maneuver_modifier(&self) -> &str {
        &self.maneuver_modifier
    }

    pub fn step_duration_remaining(&self) -> f64 {
        self.step_duration_remaining
    }

    pub fn then_step(&self) -> Option<&ThenStepInfo> {
        self.then_step.as_ref()
    }

    pub fn should_show_then_step(&self) -> bool {
        self.should_show_then_step
    }

    pub fn current_step(&self) -> StepToken {
        self.current_step
    }

    pub fn upcoming_step(&self) -> Option<StepToken> {
        self.upcoming_step
    }

    pub fn remaining_steps(&self) -> &[StepListEntry] {
        &self.remaining_steps
    }
}

/// Write-once assembly of a [`RouteProgressSnapshot`].
///
/// Consumed by [`SnapshotParts::build`]; the finished snapshot has no setters.
#[derive(Debug)]
pub struct SnapshotParts {
    snapshot: RouteProgressSnapshot,
}

impl SnapshotParts {
    pub fn distance_text(mut self, text: impl Into<String>) -> Self {
        self.snapshot.distance_remaining_text = text.into();
        self
    }

    pub fn turn_lanes(mut self, lanes: Vec<LaneIndicator>) -> Self {
        self.snapshot.turn_lanes = lanes;
        self
    }

    pub fn maneuver_modifier(mut self, modifier: impl Into<String>) -> Self {
        self.snapshot.maneuver_modifier = modifier.into();
        self
    }

    pub fn step_duration_remaining(mut self, seconds: f64) -> Self {
        self.snapshot.step_duration_remaining = seconds;
        self
    }

    pub fn then_step(mut self, then_step: Option<ThenStepInfo>, should_show: bool) -> Self {
        self.snapshot.then_step = then_step;
        self.snapshot.should_show_then_step = should_show;
        self
    }

    pub fn upcoming_step(mut self, token: Option<StepToken>) -> Self {
        self.snapshot.upcoming_step = token;
        self
    }

    pub fn remaining_steps(mut self, entries: Vec<StepListEntry>) -> Self {
        self.snapshot.remaining_steps = entries;
        self
    }

    pub fn build(self) -> RouteProgressSnapshot {
        self.snapshot
    }
}

/// What a text component represents on the banner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentKind {
    #[default]
    Text,
    /// Road shield; `image_base_url` may point at the artwork.
    Icon,
    Delimiter,
    Exit,
    ExitNumber,
    Lane,
}

impl ComponentKind {
    /// Maps the wire name to a kind. Unknown names render as plain text.
    pub fn from_wire(name: &str) -> Self {
        match name {
            "icon" => ComponentKind::Icon,
            "delimiter" => ComponentKind::Delimiter,
            "exit" => ComponentKind::Exit,
            "exit-number" => ComponentKind::ExitNumber,
            "lane" => ComponentKind::Lane,
            _ => ComponentKind::Text,
        }
    }
}

/// One styled span of banner text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextComponent {
    pub text: String,
    pub kind: ComponentKind,
    pub abbreviation: Option<String>,
    /// Lower values are abbreviated first.
    pub abbreviation_priority: Option<u32>,
    pub image_base_url: Option<String>,
}

impl TextComponent {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: ComponentKind::Text,
            abbreviation: None,
            abbreviation_priority: None,
            image_base_url: None,
        }
    }
}

/// A renderable text line. Always holds at least one component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TextSpec {
    components: Vec<TextComponent>,
}

impl TextSpec {
    /// Returns `None` for an empty component list.
    pub fn new(components: Vec<TextComponent>) -> Option<Self> {
        if components.is_empty() {
            None
        } else {
            Some(Self { components })
        }
    }

    pub fn components(&self) -> &[TextComponent] {
        &self.components
    }

    /// Concatenated text of every component.
    pub fn plain_text(&self) -> String {
        self.components.iter().map(|c| c.text.as_str()).collect()
    }
}

/// Resolved content of one banner-instruction event.
#[derive(Debug, Clone, PartialEq)]
pub struct BannerContent {
    pub maneuver_type: String,
    pub maneuver_modifier: String,
    pub roundabout_angle: Option<f32>,
    pub primary: TextSpec,
    pub secondary: Option<TextSpec>,
}
