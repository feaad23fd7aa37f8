//! # Headless Adapter
//!
//! Runs the HUD without a terminal UI. Every directive is written as one
//! JSON line, so a replay can be diffed or piped into another renderer.
//!
//! ```text
//! {"directive":"set_distance_text","args":"200 m"}
//! {"directive":"hide_turn_lanes"}
//! ```

use std::io::{self, Write};
use std::sync::mpsc;

use log::{info, warn};

use crate::core::action::update;
use crate::core::config::ResolvedConfig;
use crate::core::directive::{Directive, RenderSink};
use crate::core::state::Hud;
use crate::feed::{TraceRecord, spawn_replay, wait_for_replay};

/// Writes directives as JSON lines. Write failures are logged and the
/// directive is dropped.
pub struct JsonLinesSink<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_line(&mut self, directive: &Directive) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, directive)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}

impl<W: Write> RenderSink for JsonLinesSink<W> {
    fn apply(&mut self, directive: &Directive) {
        match self.write_line(directive) {
            Ok(()) => self.written += 1,
            Err(e) => warn!("Failed to write {} directive: {}", directive.name(), e),
        }
    }
}

/// Replays `records` and prints the resulting directives to stdout.
pub async fn run(config: ResolvedConfig, records: Vec<TraceRecord>) -> io::Result<()> {
    run_to(config, records, io::stdout()).await.map(|_| ())
}

/// Replays `records` into `writer` and hands the writer back when the
/// trace is exhausted.
///
/// The channel is drained on the blocking pool, so the replay tasks keep
/// running on the caller's runtime whatever its flavor.
pub async fn run_to<W>(config: ResolvedConfig, records: Vec<TraceRecord>, writer: W) -> io::Result<W>
where
    W: Write + Send + 'static,
{
    let mut hud = Hud::from_config(&config);
    let mut sink = JsonLinesSink::new(writer);

    let (tx, rx) = mpsc::channel();
    let handles = spawn_replay(records, config.replay_speed, tx);

    // Ends once both replay streams have dropped their senders
    let drain = tokio::task::spawn_blocking(move || {
        while let Ok(action) = rx.recv() {
            let directives = update(&mut hud, action);
            sink.apply_all(&directives);
        }
        (hud, sink)
    });
    let (hud, sink) = drain
        .await
        .map_err(|e| io::Error::other(format!("headless drain failed: {e}")))?;

    let failures = wait_for_replay(handles).await;
    info!(
        "Headless replay done: {} ticks, {} banners, {} directives written",
        hud.ticks,
        hud.banners,
        sink.written()
    );
    if failures > 0 {
        return Err(io::Error::other(format!("{failures} replay task(s) failed")));
    }
    Ok(sink.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::core::action::Action;
    use crate::core::config::{CliOverrides, HudConfig, resolve};
    use crate::feed::parse_trace;
    use crate::test_support::{raw_progress, raw_step};

    fn fast_config() -> ResolvedConfig {
        let cli = CliOverrides {
            speed: Some(100.0),
            ..Default::default()
        };
        resolve(&HudConfig::default(), &cli)
    }

    struct BrokenWriter;

    impl Write for BrokenWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_sink_writes_one_line_per_directive() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.apply_all(&[
            Directive::SetDistanceText("200 m".to_string()),
            Directive::HideTurnLanes,
        ]);
        assert_eq!(sink.written(), 2);

        let output = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], r#"{"directive":"set_distance_text","args":"200 m"}"#);
        assert_eq!(lines[1], r#"{"directive":"hide_turn_lanes"}"#);
    }

    #[test]
    fn test_write_errors_are_not_fatal() {
        let mut sink = JsonLinesSink::new(BrokenWriter);
        sink.apply(&Directive::ShowReroute);
        assert_eq!(sink.written(), 0);
    }

    #[test]
    fn test_update_output_feeds_sink() {
        let mut hud = Hud::default();
        let mut sink = JsonLinesSink::new(Vec::new());
        let progress = raw_progress(0, 380.0, 42.0, vec![raw_step("depart", None, 380.0, 42.0)]);
        sink.apply_all(&update(&mut hud, Action::RouteProgress(progress)));
        sink.apply_all(&update(&mut hud, Action::OffRouteChanged(true)));

        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert!(output.contains(r#""args":"400 m""#));
        assert!(output.contains(r#"{"directive":"show_reroute"}"#));
    }

    #[tokio::test]
    async fn test_run_finishes_on_current_thread_runtime() {
        let records = parse_trace(r#"{"at_ms": 10, "event": {"kind": "off_route", "off_route": true}}"#).unwrap();
        let output = tokio::time::timeout(Duration::from_secs(5), run_to(fast_config(), records, Vec::new()))
            .await
            .expect("headless run should not hang")
            .unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_eq!(output, "{\"directive\":\"show_reroute\"}\n");
    }

    #[tokio::test]
    async fn test_run_with_empty_trace_writes_nothing() {
        let output = tokio::time::timeout(Duration::from_secs(5), run_to(fast_config(), Vec::new(), Vec::new()))
            .await
            .expect("headless run should not hang")
            .unwrap();
        assert!(output.is_empty());
    }
}
