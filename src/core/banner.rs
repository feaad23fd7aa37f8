//! # Banner Content Resolver
//!
//! Banner instructions arrive on their own cadence (milestones), separate from
//! progress ticks. This module turns the wire shape into [`BannerContent`].
//!
//! A banner without primary components resolves to `None`. That is a normal,
//! silent condition: the engine never sees it, so it cannot clobber text that
//! is already on screen.

use serde::{Deserialize, Serialize};

use crate::core::model::{BannerContent, ComponentKind, TextComponent, TextSpec};

/// Wire shape of a banner-instruction event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BannerInstructions {
    #[serde(default)]
    pub distance_along_geometry: f64,
    pub primary: Option<BannerText>,
    pub secondary: Option<BannerText>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BannerText {
    #[serde(default)]
    pub text: String,
    #[serde(rename = "type")]
    pub maneuver_type: Option<String>,
    pub modifier: Option<String>,
    /// Roundabout exit angle in degrees, present only for roundabout maneuvers.
    pub degrees: Option<f64>,
    pub components: Option<Vec<BannerComponent>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BannerComponent {
    #[serde(default)]
    pub text: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(rename = "abbr")]
    pub abbreviation: Option<String>,
    #[serde(rename = "abbr_priority")]
    pub abbreviation_priority: Option<u32>,
    pub image_base_url: Option<String>,
}

/// Milestones the navigation engine fires. Only banner milestones carry
/// anything this HUD renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Milestone {
    BannerInstruction {
        instructions: Option<BannerInstructions>,
    },
    VoiceInstruction {
        announcement: String,
    },
    #[serde(other)]
    Other,
}

/// Resolves a milestone into banner content, if it is a renderable banner.
pub fn resolve_milestone(milestone: &Milestone) -> Option<BannerContent> {
    match milestone {
        Milestone::BannerInstruction { instructions } => instructions.as_ref().and_then(resolve),
        Milestone::VoiceInstruction { .. } | Milestone::Other => None,
    }
}

/// Resolves banner instructions. `None` when there is no primary text.
pub fn resolve(instructions: &BannerInstructions) -> Option<BannerContent> {
    let primary_text = instructions.primary.as_ref()?;
    let primary = text_spec(primary_text)?;
    let secondary = instructions.secondary.as_ref().and_then(text_spec);

    Some(BannerContent {
        maneuver_type: primary_text.maneuver_type.clone().unwrap_or_default(),
        maneuver_modifier: primary_text.modifier.clone().unwrap_or_default(),
        roundabout_angle: primary_text.degrees.and_then(roundabout_angle),
        primary,
        secondary,
    })
}

/// Converts roundabout degrees into the icon's angle unit: `f32` degrees in
/// `[0, 360)`. Non-finite input is treated as absent.
pub fn roundabout_angle(degrees: f64) -> Option<f32> {
    if degrees.is_finite() {
        Some(degrees.rem_euclid(360.0) as f32)
    } else {
        None
    }
}

pub(crate) fn text_spec(text: &BannerText) -> Option<TextSpec> {
    let components = text
        .components
        .as_ref()?
        .iter()
        .map(|c| TextComponent {
            text: c.text.clone(),
            kind: ComponentKind::from_wire(&c.kind),
            abbreviation: c.abbreviation.clone(),
            abbreviation_priority: c.abbreviation_priority,
            image_base_url: c.image_base_url.clone(),
        })
        .collect();
    TextSpec::new(components)
}
