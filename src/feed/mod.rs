//! # Event Feed
//!
//! Recorded navigation events and their timed playback. This stands in for
//! the live navigation engine: it produces raw progress ticks, milestones
//! and off-route signals, and hands them to the HUD as `Action`s.

pub mod replay;
pub mod trace;

pub use replay::{spawn_replay, wait_for_replay};
pub use trace::{FeedError, TraceEvent, TraceRecord, load_trace, parse_trace};
