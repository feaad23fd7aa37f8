//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::banner::{BannerComponent, BannerInstructions, BannerText};
use crate::core::model::{
    BannerContent, LaneIndicator, RouteProgressSnapshot, StepToken, TextComponent, TextSpec,
    ThenStepInfo,
};
use crate::core::snapshot::{RawLane, RawManeuver, RawProgress, RawStep};
use crate::core::state::Hud;

/// Creates a HUD with metric units and default thresholds.
pub fn test_hud() -> Hud {
    Hud::default()
}

// ============================================================================
// Wire shapes
// ============================================================================

pub fn raw_progress(step_index: u32, distance: f64, duration: f64, steps: Vec<RawStep>) -> RawProgress {
    RawProgress {
        leg_index: 0,
        step_index,
        step_distance_remaining: distance,
        step_duration_remaining: duration,
        steps,
    }
}

pub fn raw_step(maneuver_type: &str, modifier: Option<&str>, distance: f64, duration: f64) -> RawStep {
    RawStep {
        distance,
        duration,
        maneuver: RawManeuver {
            maneuver_type: maneuver_type.to_string(),
            modifier: modifier.map(str::to_string),
            degrees: None,
        },
        ..Default::default()
    }
}

pub fn raw_lane(indications: &[&str], valid: bool) -> RawLane {
    RawLane {
        indications: indications.iter().map(|s| s.to_string()).collect(),
        valid,
    }
}

/// Banner text with one plain component carrying the same text.
pub fn banner_text(text: &str, maneuver_type: &str, modifier: &str) -> BannerText {
    BannerText {
        text: text.to_string(),
        maneuver_type: Some(maneuver_type.to_string()),
        modifier: Some(modifier.to_string()),
        degrees: None,
        components: Some(vec![BannerComponent {
            text: text.to_string(),
            kind: "text".to_string(),
            ..Default::default()
        }]),
    }
}

pub fn banner_instructions(primary: BannerText, secondary: Option<BannerText>) -> BannerInstructions {
    BannerInstructions {
        distance_along_geometry: 0.0,
        primary: Some(primary),
        secondary,
    }
}

// ============================================================================
// Engine inputs
// ============================================================================

/// Snapshot on step `(0, step_index)` with only a distance text.
pub fn snapshot(step_index: u32, distance_text: &str) -> RouteProgressSnapshot {
    RouteProgressSnapshot::builder(StepToken::new(0, step_index))
        .distance_text(distance_text)
        .build()
}

/// Snapshot with two lanes (left valid, straight not) for a left turn.
pub fn lane_snapshot(step_duration_remaining: f64) -> RouteProgressSnapshot {
    RouteProgressSnapshot::builder(StepToken::new(0, 0))
        .turn_lanes(vec![
            LaneIndicator::new(["left"], true),
            LaneIndicator::new(["straight"], false),
        ])
        .maneuver_modifier("left")
        .step_duration_remaining(step_duration_remaining)
        .build()
}

pub fn then_step_info(text: &str) -> ThenStepInfo {
    ThenStepInfo {
        maneuver_type: "turn".to_string(),
        maneuver_modifier: "left".to_string(),
        roundabout_angle: None,
        text: text.to_string(),
    }
}

fn single_spec(text: &str) -> TextSpec {
    TextSpec::new(vec![TextComponent::text(text)]).unwrap()
}

pub fn banner_content(
    primary: &str,
    maneuver_type: &str,
    modifier: &str,
    secondary: Option<&str>,
    roundabout_angle: Option<f32>,
) -> BannerContent {
    BannerContent {
        maneuver_type: maneuver_type.to_string(),
        maneuver_modifier: modifier.to_string(),
        roundabout_angle,
        primary: single_spec(primary),
        secondary: secondary.map(single_spec),
    }
}
