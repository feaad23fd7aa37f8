//! # Trace Files
//!
//! A trace is newline-delimited JSON, one record per line:
//!
//! ```text
//! {"at_ms": 0,    "event": {"kind": "progress", "step_distance_remaining": 480.0, ...}}
//! {"at_ms": 250,  "event": {"kind": "milestone", "milestone": {"type": "banner_instruction", ...}}}
//! {"at_ms": 9000, "event": {"kind": "off_route", "off_route": true}}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

use log::info;

use crate::core::action::Action;
use crate::core::banner::Milestone;
use crate::core::snapshot::RawProgress;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceRecord {
    /// Offset from the start of the recording.
    pub at_ms: u64,
    pub event: TraceEvent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceEvent {
    Progress(RawProgress),
    Milestone { milestone: Milestone },
    OffRoute { off_route: bool },
}

impl TraceEvent {
    /// Milestones come from their own source; everything else rides with
    /// progress.
    pub fn is_milestone(&self) -> bool {
        matches!(self, TraceEvent::Milestone { .. })
    }

    pub fn into_action(self) -> Action {
        match self {
            TraceEvent::Progress(progress) => Action::RouteProgress(progress),
            TraceEvent::Milestone { milestone } => Action::Milestone(milestone),
            TraceEvent::OffRoute { off_route } => Action::OffRouteChanged(off_route),
        }
    }
}

#[derive(Debug)]
pub enum FeedError {
    Io(std::io::Error),
    /// `line` is 1-based.
    Parse { line: usize, source: serde_json::Error },
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Io(e) => write!(f, "trace I/O error: {e}"),
            FeedError::Parse { line, source } => write!(f, "trace parse error on line {line}: {source}"),
        }
    }
}

impl std::error::Error for FeedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FeedError::Io(e) => Some(e),
            FeedError::Parse { source, .. } => Some(source),
        }
    }
}

/// Parses a trace. Records come back ordered by `at_ms`; records with the
/// same timestamp keep their file order.
pub fn parse_trace(contents: &str) -> Result<Vec<TraceRecord>, FeedError> {
    let mut records = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let record: TraceRecord =
            serde_json::from_str(line).map_err(|source| FeedError::Parse { line: index + 1, source })?;
        records.push(record);
    }
    records.sort_by_key(|r| r.at_ms);
    Ok(records)
}

pub fn load_trace(path: &Path) -> Result<Vec<TraceRecord>, FeedError> {
    let contents = fs::read_to_string(path).map_err(FeedError::Io)?;
    let records = parse_trace(&contents)?;
    info!("Loaded {} trace records from {}", records.len(), path.display());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACE: &str = r#"
# recorded on the 101
{"at_ms": 500, "event": {"kind": "off_route", "off_route": true}}
{"at_ms": 0, "event": {"kind": "progress", "step_distance_remaining": 480.0, "step_duration_remaining": 42.0}}
{"at_ms": 0, "event": {"kind": "milestone", "milestone": {"type": "voice_instruction", "announcement": "Turn left"}}}

{"at_ms": 250, "event": {"kind": "milestone", "milestone": {"type": "banner_instruction", "instructions": null}}}
"#;

    #[test]
    fn test_parse_trace_sorts_and_skips_comments() {
        let records = parse_trace(TRACE).unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records.iter().map(|r| r.at_ms).collect::<Vec<_>>(), vec![0, 0, 250, 500]);
        // Stable: the progress line came first in the file
        assert!(matches!(records[0].event, TraceEvent::Progress(_)));
        assert!(records[1].event.is_milestone());
        assert_eq!(records[3].event, TraceEvent::OffRoute { off_route: true });
    }

    #[test]
    fn test_parse_error_reports_line() {
        let err = parse_trace("\n{\"at_ms\": 0, \"event\": {\"kind\": \"teleport\"}}\n").unwrap_err();
        match err {
            FeedError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn test_into_action_maps_each_kind() {
        assert!(matches!(
            TraceEvent::OffRoute { off_route: false }.into_action(),
            Action::OffRouteChanged(false)
        ));
        assert!(matches!(
            TraceEvent::Progress(RawProgress::default()).into_action(),
            Action::RouteProgress(_)
        ));
        assert!(matches!(
            TraceEvent::Milestone { milestone: Milestone::Other }.into_action(),
            Action::Milestone(Milestone::Other)
        ));
    }

    #[test]
    fn test_load_missing_trace_is_io_error() {
        let err = load_trace(Path::new("/nonexistent/trace.ndjson")).unwrap_err();
        assert!(matches!(err, FeedError::Io(_)));
    }
}
