//! # Actions
//!
//! Everything that can happen to the HUD becomes an `Action`.
//! A progress tick? That's `Action::RouteProgress(raw)`.
//! The user taps the banner? That's `Action::ToggleStepList`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns the directives the render sink must apply.
//! No I/O happens here.
//!
//! ```text
//! Hud + Action  →  update()  →  Vec<Directive>
//! ```
//!
//! Every input source (progress feed, milestone feed, keyboard) funnels its
//! actions through one channel, so `update()` always runs on a single thread.

use std::sync::Arc;

use log::debug;

use crate::core::banner::{self, Milestone};
use crate::core::directive::Directive;
use crate::core::format::DistanceFormatter;
use crate::core::snapshot::RawProgress;
use crate::core::state::Hud;

#[derive(Debug, Clone)]
pub enum Action {
    RouteProgress(RawProgress),
    Milestone(Milestone),
    OffRouteChanged(bool),
    SetDistanceFormatter(Arc<dyn DistanceFormatter>),
    ToggleStepList,
    ShowStepList,
    HideStepList,
}

pub fn update(hud: &mut Hud, action: Action) -> Vec<Directive> {
    let directives = match action {
        Action::RouteProgress(progress) => {
            hud.ticks += 1;
            let snapshot = hud.builder.build(&progress);
            hud.engine.on_route_progress(&snapshot)
        }
        Action::Milestone(milestone) => match banner::resolve_milestone(&milestone) {
            Some(content) => {
                hud.banners += 1;
                hud.engine.on_banner_instruction(&content)
            }
            None => {
                debug!("Milestone without banner content, nothing to render");
                Vec::new()
            }
        },
        Action::OffRouteChanged(is_off_route) => hud.engine.on_off_route_changed(is_off_route),
        Action::SetDistanceFormatter(formatter) => {
            debug!("Distance formatter replaced: {:?}", formatter);
            hud.builder.set_distance_formatter(formatter);
            Vec::new()
        }
        Action::ToggleStepList => hud.engine.toggle_step_list(),
        Action::ShowStepList => hud.engine.show_step_list(),
        Action::HideStepList => hud.engine.hide_step_list(),
    };

    if !directives.is_empty() {
        debug!(
            "Emitting {} directive(s): {:?}",
            directives.len(),
            directives.iter().map(Directive::name).collect::<Vec<_>>()
        );
    }
    directives
}

/// Back press: hides the step list if it is showing. Returns whether the
/// press was consumed.
pub fn handle_back_pressed(hud: &mut Hud) -> (bool, Vec<Directive>) {
    hud.engine.handle_back_pressed()
}
