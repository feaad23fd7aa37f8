//! navhud library exports for testing

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod core;
pub mod feed;
pub mod headless;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// Screen orientation of the HUD. Vertical bias only applies in portrait.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Portrait,
    Landscape,
}

impl DisplayMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "portrait" => Some(DisplayMode::Portrait),
            "landscape" => Some(DisplayMode::Landscape),
            _ => None,
        }
    }
}
