//! # TUI Components
//!
//! All components are stateless and props-based: `ui::draw_ui` builds them
//! from the [`HudView`](crate::tui::view::HudView) on every frame and renders
//! them once.
//!
//! ```text
//! components/
//! ├── maneuver.rs            (arrow + distance, shared glyph lookup)
//! ├── instruction_banner.rs  (primary/secondary text, abbreviation, bias)
//! ├── turn_lanes.rs          (centered lane strip)
//! ├── then_step.rs           ("Then ..." preview)
//! ├── step_list.rs           (remaining steps overlay)
//! ├── alert.rs               (reroute and problem-report notices)
//! └── status_bar.rs          (mode, replay status, key hints)
//! ```
//!
//! Components borrow their props from the view, so nothing is cloned just to
//! draw a frame.

pub mod alert;
pub mod instruction_banner;
pub mod maneuver;
pub mod status_bar;
pub mod step_list;
pub mod then_step;
pub mod turn_lanes;

pub use alert::Alert;
pub use instruction_banner::InstructionBanner;
pub use maneuver::ManeuverPanel;
pub use status_bar::StatusBar;
pub use step_list::StepList;
pub use then_step::ThenStep;
pub use turn_lanes::TurnLanes;
