//! # Instruction Snapshot Builder
//!
//! Turns one raw progress tick into an immutable [`RouteProgressSnapshot`].
//!
//! `build()` is total: a tick with missing steps, lanes or banners still
//! yields a snapshot, just with those parts empty. Steps follow the usual
//! routing convention where a step's maneuver sits at its start, so for the
//! current step `i`:
//!
//! ```text
//! steps[i]      current step   (we are driving along it)
//! steps[i + 1]  upcoming step  (its maneuver is the one on the banner)
//! steps[i + 2]  follow-on step (its maneuver is the "then" preview)
//! ```

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::core::banner::{self, BannerInstructions};
use crate::core::format::{DistanceFormatter, UnitDistanceFormatter};
use crate::core::model::{
    LaneIndicator, ManeuverIcon, RouteProgressSnapshot, StepListEntry, StepToken, ThenStepInfo,
};

/// Upcoming steps at most this long (seconds) get a "then" preview.
pub const DEFAULT_THEN_STEP_MAX_UPCOMING_SECS: f64 = 25.0 * 1.2;

/// Lane indication meaning "no guidance for this lane".
const NO_INDICATION: &str = "none";

/// Wire shape of one progress tick from the navigation engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawProgress {
    #[serde(default)]
    pub leg_index: u32,
    #[serde(default)]
    pub step_index: u32,
    /// Meters left on the current step.
    pub step_distance_remaining: f64,
    /// Seconds left on the current step.
    pub step_duration_remaining: f64,
    /// All steps of the current leg.
    #[serde(default)]
    pub steps: Vec<RawStep>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawStep {
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub maneuver: RawManeuver,
    pub instruction: Option<String>,
    pub banner: Option<BannerInstructions>,
    /// Lanes at this step's maneuver.
    pub lanes: Option<Vec<RawLane>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawManeuver {
    #[serde(rename = "type", default)]
    pub maneuver_type: String,
    pub modifier: Option<String>,
    pub degrees: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLane {
    #[serde(default)]
    pub indications: Vec<String>,
    #[serde(default)]
    pub valid: bool,
}

impl RawStep {
    fn banner_primary(&self) -> Option<&banner::BannerText> {
        self.banner.as_ref().and_then(|b| b.primary.as_ref())
    }

    fn modifier(&self) -> Option<&str> {
        self.banner_primary()
            .and_then(|p| p.modifier.as_deref())
            .or(self.maneuver.modifier.as_deref())
    }

    fn maneuver_type(&self) -> &str {
        self.banner_primary()
            .and_then(|p| p.maneuver_type.as_deref())
            .unwrap_or(&self.maneuver.maneuver_type)
    }

    fn degrees(&self) -> Option<f64> {
        self.banner_primary()
            .and_then(|p| p.degrees)
            .or(self.maneuver.degrees)
    }

    fn display_text(&self) -> String {
        self.banner_primary()
            .map(|p| p.text.clone())
            .filter(|t| !t.is_empty())
            .or_else(|| self.instruction.clone())
            .unwrap_or_default()
    }

    fn icon(&self) -> ManeuverIcon {
        ManeuverIcon {
            maneuver_type: self.maneuver_type().to_string(),
            modifier: self.modifier().unwrap_or_default().to_string(),
            roundabout_angle: self.degrees().and_then(banner::roundabout_angle),
        }
    }
}

/// Builds snapshots with a replaceable distance formatter.
#[derive(Debug, Clone)]
pub struct SnapshotBuilder {
    formatter: Arc<dyn DistanceFormatter>,
    then_step_max_upcoming_secs: f64,
}

impl Default for SnapshotBuilder {
    fn default() -> Self {
        Self::new(
            Arc::new(UnitDistanceFormatter::default()),
            DEFAULT_THEN_STEP_MAX_UPCOMING_SECS,
        )
    }
}

impl SnapshotBuilder {
    pub fn new(formatter: Arc<dyn DistanceFormatter>, then_step_max_upcoming_secs: f64) -> Self {
        Self {
            formatter,
            then_step_max_upcoming_secs,
        }
    }

    /// Replaces the formatter. Only snapshots built afterwards use it.
    pub fn set_distance_formatter(&mut self, formatter: Arc<dyn DistanceFormatter>) {
        self.formatter = formatter;
    }

    pub fn build(&self, progress: &RawProgress) -> RouteProgressSnapshot {
        let current = progress.step_index as usize;
        let step_at = |offset: usize| progress.steps.get(current + offset);
        let token_at = |offset: usize| {
            step_at(offset).map(|_| StepToken::new(progress.leg_index, progress.step_index + offset as u32))
        };

        let upcoming = step_at(1);
        let follow_on = step_at(2);

        let then_step = follow_on.map(|step| {
            let icon = step.icon();
            ThenStepInfo {
                maneuver_type: icon.maneuver_type,
                maneuver_modifier: icon.modifier,
                roundabout_angle: icon.roundabout_angle,
                text: step.display_text(),
            }
        });
        let should_show_then_step = then_step.is_some()
            && upcoming.is_some_and(|step| step.duration <= self.then_step_max_upcoming_secs);

        RouteProgressSnapshot::builder(StepToken::new(progress.leg_index, progress.step_index))
            .distance_text(self.format(progress.step_distance_remaining))
            .turn_lanes(upcoming.map(turn_lanes).unwrap_or_default())
            .maneuver_modifier(upcoming.and_then(RawStep::modifier).unwrap_or_default())
            .step_duration_remaining(progress.step_duration_remaining)
            .then_step(then_step, should_show_then_step)
            .upcoming_step(token_at(1))
            .remaining_steps(self.remaining_steps(progress))
            .build()
    }

    fn format(&self, meters: f64) -> String {
        self.formatter.format_distance(meters)
    }

    /// One entry per maneuver after the current step. The distance shown for
    /// a maneuver is how far it is from the previous one.
    fn remaining_steps(&self, progress: &RawProgress) -> Vec<StepListEntry> {
        let first = progress.step_index as usize + 1;
        let Some(rest) = progress.steps.get(first..) else {
            return Vec::new();
        };

        rest.iter()
            .enumerate()
            .map(|(offset, step)| {
                let meters = if offset == 0 {
                    progress.step_distance_remaining
                } else {
                    progress.steps[first + offset - 1].distance
                };
                StepListEntry {
                    step: StepToken::new(progress.leg_index, (first + offset) as u32),
                    maneuver: step.icon(),
                    primary_text: step.display_text(),
                    distance_text: self.format(meters),
                }
            })
            .collect()
    }
}

/// Lanes for a maneuver. A lane set containing a lane without guidance is
/// unusable as a whole.
fn turn_lanes(step: &RawStep) -> Vec<LaneIndicator> {
    let Some(lanes) = step.lanes.as_ref() else {
        return Vec::new();
    };
    let unusable = lanes.iter().any(|lane| {
        lane.indications.is_empty() || lane.indications.iter().any(|i| i == NO_INDICATION)
    });
    if unusable {
        return Vec::new();
    }
    lanes
        .iter()
        .map(|lane| LaneIndicator::new(lane.indications.iter().cloned(), lane.valid))
        .collect()
}
