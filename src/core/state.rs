//! # HUD State
//!
//! Core business state for the heads-up display. Domain logic only; the
//! terminal view keeps its own presentation state in the `tui` module.
//!
//! ```text
//! Hud
//! ├── builder: SnapshotBuilder        // raw progress -> snapshot (owns the formatter)
//! ├── engine: ReconciliationEngine    // held render state + diffing
//! └── ticks / banners: u64            // counters for the status line and logs
//! ```
//!
//! State changes only happen through `update(hud, action)` in action.rs.

use std::sync::Arc;

use crate::core::config::ResolvedConfig;
use crate::core::engine::ReconciliationEngine;
use crate::core::format::UnitDistanceFormatter;
use crate::core::snapshot::SnapshotBuilder;

#[derive(Debug, Clone, Default)]
pub struct Hud {
    pub builder: SnapshotBuilder,
    pub engine: ReconciliationEngine,
    pub ticks: u64,
    pub banners: u64,
}

impl Hud {
    pub fn new(builder: SnapshotBuilder, engine: ReconciliationEngine) -> Self {
        Self {
            builder,
            engine,
            ticks: 0,
            banners: 0,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        let formatter = UnitDistanceFormatter::new(config.unit_type, config.rounding_increment);
        Self::new(
            SnapshotBuilder::new(Arc::new(formatter), config.then_step_max_upcoming_secs),
            ReconciliationEngine::new(config.turn_lane_max_duration_secs),
        )
    }

    pub fn is_rerouting(&self) -> bool {
        self.engine.state().is_rerouting
    }

    pub fn is_showing_step_list(&self) -> bool {
        self.engine.state().instruction_list_visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{HudConfig, UnitsConfig, resolve};
    use crate::core::format::UnitType;
    use crate::core::snapshot::RawProgress;
    use crate::test_support::test_hud;

    #[test]
    fn test_hud_new_defaults() {
        let hud = test_hud();
        assert_eq!(hud.ticks, 0);
        assert!(!hud.is_rerouting());
        assert!(!hud.is_showing_step_list());
    }

    #[test]
    fn test_from_config_uses_configured_units() {
        let config = HudConfig {
            units: UnitsConfig {
                unit_type: Some(UnitType::Imperial),
                rounding_increment: None,
            },
            ..Default::default()
        };
        let resolved = resolve(&config, &Default::default());
        let hud = Hud::from_config(&resolved);

        let progress = RawProgress {
            step_distance_remaining: 1240.0,
            ..Default::default()
        };
        assert_eq!(hud.builder.build(&progress).distance_remaining_text(), "0.8 mi");
    }
}
