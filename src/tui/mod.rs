//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the HUD,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! ```text
//! replay tasks ──► mpsc ──┐
//!                         ├──► update(hud, action) ──► HudView (RenderSink) ──► draw
//! keyboard ──► TuiEvent ──┘
//! ```
//!
//! Redraws are conditional: the loop only draws after a key, a resize, a
//! drained action, or the problem-report prompt expiring.

mod component;
mod components;
mod event;
mod ui;
pub mod view;

use log::{debug, info};
use std::io::stdout;
use std::sync::mpsc::{self, TryRecvError};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::execute;

use crate::DisplayMode;
use crate::core::action::{Action, handle_back_pressed, update};
use crate::core::config::ResolvedConfig;
use crate::core::directive::RenderSink;
use crate::core::state::Hud;
use crate::feed::{TraceRecord, spawn_replay};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::view::HudView;

const IDLE_POLL: Duration = Duration::from_millis(250);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub view: HudView,
    pub mode: DisplayMode,
    pub status_message: String,
}

impl TuiState {
    pub fn new(mode: DisplayMode) -> Self {
        Self {
            view: HudView::new(),
            mode,
            status_message: "Replaying".to_string(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), Hide)?;
        info!("Terminal modes enabled (hidden cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), Show);
    }
}

/// What a key press asks the loop to do.
#[derive(Debug, PartialEq, Eq)]
enum KeyOutcome {
    Continue,
    Quit,
}

fn handle_event(hud: &mut Hud, tui: &mut TuiState, event: TuiEvent) -> KeyOutcome {
    match event {
        TuiEvent::Quit => KeyOutcome::Quit,
        TuiEvent::Resize => KeyOutcome::Continue,
        TuiEvent::ToggleStepList => {
            tui.view.apply_all(&update(hud, Action::ToggleStepList));
            KeyOutcome::Continue
        }
        // Back closes the step list first; with nothing to close it quits
        TuiEvent::Back => {
            let (consumed, directives) = handle_back_pressed(hud);
            tui.view.apply_all(&directives);
            if consumed {
                KeyOutcome::Continue
            } else {
                KeyOutcome::Quit
            }
        }
    }
}

pub fn run(config: ResolvedConfig, records: Vec<TraceRecord>) -> std::io::Result<()> {
    let mut hud = Hud::from_config(&config);
    let mut tui = TuiState::new(config.display_mode);

    // Channel for actions from the replay tasks
    let (tx, rx) = mpsc::channel();
    let replay_handles = spawn_replay(records, config.replay_speed, tx);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let mut needs_redraw = true; // Force first frame
    let mut feed_open = true;

    loop {
        if tui.view.expire_prompt(Instant::now()) {
            needs_redraw = true;
        }

        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &tui.view, tui.mode, &tui.status_message))?;
            needs_redraw = false;
        }

        // Wake up in time to clear the prompt
        let timeout = tui
            .view
            .time_until_prompt_expiry(Instant::now())
            .map_or(IDLE_POLL, |left| left.min(IDLE_POLL));
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event.into_iter().chain(std::iter::from_fn(poll_event_immediate)) {
            if handle_event(&mut hud, &mut tui, event) == KeyOutcome::Quit {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }

        // Handle actions from the replay tasks
        while feed_open {
            match rx.try_recv() {
                Ok(action) => {
                    needs_redraw = true;
                    let directives = update(&mut hud, action);
                    tui.view.apply_all(&directives);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    info!("Replay feed finished after {} ticks", hud.ticks);
                    tui.status_message = "Replay finished".to_string();
                    feed_open = false;
                    needs_redraw = true;
                }
            }
        }
    }

    for handle in &replay_handles {
        handle.abort();
    }
    debug!(
        "Exiting after {} ticks, {} banners, {} directives applied",
        hud.ticks, hud.banners, tui.view.applied
    );

    ratatui::restore();
    Ok(())
}
