//! # Core HUD Logic
//!
//! This module decides what the navigation heads-up display shows.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!   progress ticks        banner milestones       off-route signal
//!         │                      │                       │
//!         ▼                      ▼                       │
//!  ┌──────────────┐      ┌───────────────┐               │
//!  │   snapshot   │      │    banner     │               │
//!  │   builder    │      │   resolver    │               │
//!  └──────┬───────┘      └───────┬───────┘               │
//!         └──────────┬───────────┘───────────────────────┘
//!                    ▼
//!         ┌─────────────────────┐
//!         │ reconciliation      │   holds RenderState,
//!         │ engine              │   emits only what changed
//!         └──────────┬──────────┘
//!                    ▼
//!              Vec<Directive>  ──►  RenderSink (tui, headless)
//! ```
//!
//! ## Modules
//!
//! - [`model`]: snapshots, banner content, lanes, text components
//! - [`format`]: the distance formatter adapter
//! - [`snapshot`]: raw progress → `RouteProgressSnapshot`
//! - [`banner`]: banner milestones → `BannerContent`
//! - [`engine`]: the reconciliation state machine
//! - [`directive`]: the directive protocol and the `RenderSink` trait
//! - [`state`]: the `Hud` struct that owns builder and engine
//! - [`action`]: the `Action` enum and `update()`
//! - [`config`]: layered configuration

pub mod action;
pub mod banner;
pub mod config;
pub mod directive;
pub mod engine;
pub mod format;
pub mod model;
pub mod snapshot;
pub mod state;
