//! # Trace Replay
//!
//! Plays a recorded trace back with its original timing. Progress (plus
//! off-route signals) and milestones are replayed by two independent tasks,
//! the way a navigation engine delivers them. Both feed the same channel,
//! which is the one place the HUD reads actions from.
//!
//! ```text
//! progress task ──┐
//!                 ├──► mpsc::Sender<Action> ──► event loop ──► update()
//! milestone task ─┘
//! ```

use std::sync::mpsc;
use std::time::Duration;

use futures::future::join_all;
use log::{debug, info, warn};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};

use crate::core::action::Action;
use crate::feed::trace::TraceRecord;

/// Spawns the replay tasks. `speed` scales playback (2.0 = twice as fast).
///
/// The sender is moved into the tasks, so the receiver sees a disconnect
/// once both have finished.
pub fn spawn_replay(records: Vec<TraceRecord>, speed: f64, tx: mpsc::Sender<Action>) -> Vec<JoinHandle<()>> {
    let speed = if speed.is_finite() && speed > 0.0 { speed } else { 1.0 };
    let (milestones, progress): (Vec<_>, Vec<_>) = records.into_iter().partition(|r| r.event.is_milestone());
    info!(
        "Replaying {} progress and {} milestone records at {}x",
        progress.len(),
        milestones.len(),
        speed
    );

    let start = Instant::now();
    vec![
        tokio::spawn(replay_stream("progress", progress, start, speed, tx.clone())),
        tokio::spawn(replay_stream("milestone", milestones, start, speed, tx)),
    ]
}

async fn replay_stream(
    name: &'static str,
    records: Vec<TraceRecord>,
    start: Instant,
    speed: f64,
    tx: mpsc::Sender<Action>,
) {
    let mut sent = 0usize;
    for record in records {
        sleep_until(start + scaled(record.at_ms, speed)).await;
        if tx.send(record.event.into_action()).is_err() {
            warn!("Replay {name} stream stopped after {sent} records: receiver dropped");
            return;
        }
        sent += 1;
    }
    debug!("Replay {name} stream finished ({sent} records)");
}

fn scaled(at_ms: u64, speed: f64) -> Duration {
    Duration::from_secs_f64(at_ms as f64 / 1000.0 / speed)
}

/// Waits for the replay tasks. Returns how many ended abnormally.
pub async fn wait_for_replay(handles: Vec<JoinHandle<()>>) -> usize {
    let failures = join_all(handles)
        .await
        .into_iter()
        .filter_map(Result::err)
        .inspect(|e| warn!("Replay task failed: {e}"))
        .count();
    info!("Replay complete ({failures} failed tasks)");
    failures
}
