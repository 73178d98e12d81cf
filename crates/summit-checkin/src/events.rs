// events.rs — Roster events and notification dispatch.
//
// The desk emits an event after every command, accepted or rejected.
// Presentation layers (terminal output, banners, celebration effects) and
// the JSONL event log subscribe through `NotificationSink`.
//
// `GoalReached` is edge-triggered: it fires only for the command that
// filled the roster, never when re-rendering an already-full one.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::check_in::CheckIn;
use crate::error::{CheckInError, ValidationError};
use crate::team::Team;

/// Events emitted at roster lifecycle points.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum CheckInEvent {
    /// An attendee was checked in.
    CheckedIn {
        check_in_id: Uuid,
        name: String,
        team: Team,
        count: usize,
        timestamp: DateTime<Utc>,
    },

    /// A check-in's name or team was changed.
    CheckInEdited {
        check_in_id: Uuid,
        name: String,
        team: Team,
        timestamp: DateTime<Utc>,
    },

    /// A check-in was removed.
    CheckInRemoved {
        check_in_id: Uuid,
        name: String,
        team: Team,
        count: usize,
        timestamp: DateTime<Utc>,
    },

    /// The roster was cleared.
    RosterReset { timestamp: DateTime<Utc> },

    /// A command was rejected.
    CheckInRejected {
        kind: String,
        reason: String,
        timestamp: DateTime<Utc>,
    },

    /// The roster just became full.
    GoalReached {
        capacity: usize,
        winners: Vec<Team>,
        timestamp: DateTime<Utc>,
    },

    /// A celebrated roster dropped below capacity.
    GoalLost {
        count: usize,
        capacity: usize,
        timestamp: DateTime<Utc>,
    },
}

impl CheckInEvent {
    /// Get the event type name as a string.
    pub fn event_type(&self) -> &str {
        match self {
            CheckInEvent::CheckedIn { .. } => "checked_in",
            CheckInEvent::CheckInEdited { .. } => "check_in_edited",
            CheckInEvent::CheckInRemoved { .. } => "check_in_removed",
            CheckInEvent::RosterReset { .. } => "roster_reset",
            CheckInEvent::CheckInRejected { .. } => "check_in_rejected",
            CheckInEvent::GoalReached { .. } => "goal_reached",
            CheckInEvent::GoalLost { .. } => "goal_lost",
        }
    }

    pub fn checked_in(record: &CheckIn, count: usize) -> Self {
        CheckInEvent::CheckedIn {
            check_in_id: record.id(),
            name: record.display_name().to_string(),
            team: record.team(),
            count,
            timestamp: Utc::now(),
        }
    }

    pub fn edited(record: &CheckIn) -> Self {
        CheckInEvent::CheckInEdited {
            check_in_id: record.id(),
            name: record.display_name().to_string(),
            team: record.team(),
            timestamp: Utc::now(),
        }
    }

    pub fn removed(record: &CheckIn, count: usize) -> Self {
        CheckInEvent::CheckInRemoved {
            check_in_id: record.id(),
            name: record.display_name().to_string(),
            team: record.team(),
            count,
            timestamp: Utc::now(),
        }
    }

    pub fn reset() -> Self {
        CheckInEvent::RosterReset {
            timestamp: Utc::now(),
        }
    }

    pub fn rejected(err: &ValidationError) -> Self {
        CheckInEvent::CheckInRejected {
            kind: err.kind().to_string(),
            reason: err.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn goal_reached(capacity: usize, winners: &[Team]) -> Self {
        CheckInEvent::GoalReached {
            capacity,
            winners: winners.to_vec(),
            timestamp: Utc::now(),
        }
    }

    pub fn goal_lost(count: usize, capacity: usize) -> Self {
        CheckInEvent::GoalLost {
            count,
            capacity,
            timestamp: Utc::now(),
        }
    }
}

/// Trait for receiving roster events.
///
/// Implementations decide what to do with each event: print it, log it to
/// a file, fire a celebration effect, etc.
pub trait NotificationSink: Send {
    /// Handle an event. Errors are logged but don't stop dispatch.
    fn send(&self, event: &CheckInEvent) -> Result<(), CheckInError>;
}

/// One line of the event log: the event tagged with the roster it
/// happened to, so several events can share a log file.
#[derive(Debug, Serialize)]
struct LogEntry<'a> {
    roster: &'a str,
    #[serde(flatten)]
    event: &'a CheckInEvent,
}

/// Appends events as JSONL, one `LogEntry` per line.
pub struct LogSink {
    path: PathBuf,
    roster: String,
}

impl LogSink {
    /// Log events for the roster stored under `roster` to `path`.
    pub fn new(path: impl AsRef<Path>, roster: impl Into<String>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            roster: roster.into(),
        }
    }

    fn io_error(&self, source: std::io::Error) -> CheckInError {
        CheckInError::IoError {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl NotificationSink for LogSink {
    fn send(&self, event: &CheckInEvent) -> Result<(), CheckInError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let line = serde_json::to_string(&LogEntry {
            roster: &self.roster,
            event,
        })?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;
        writeln!(file, "{}", line).map_err(|e| self.io_error(e))
    }
}

/// Fans a command's events out to every sink.
///
/// A command can produce more than one event (a check-in that fills the
/// roster is followed by `goal_reached`); they are delivered as a batch, in
/// order, to each sink. A failing sink is logged and skipped.
pub struct EventDispatcher {
    sinks: Vec<Box<dyn NotificationSink>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn add_sink(&mut self, sink: Box<dyn NotificationSink>) {
        self.sinks.push(sink);
    }

    /// Deliver `events` in order to all sinks.
    pub fn dispatch(&self, events: &[CheckInEvent]) {
        for event in events {
            for sink in &self.sinks {
                if let Err(e) = sink.send(event) {
                    tracing::warn!(event = event.event_type(), "notification sink error: {}", e);
                }
            }
        }
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn event_serialization_round_trip() {
        let record = CheckIn::new("Ana Lee", Team::Zero);
        let event = CheckInEvent::checked_in(&record, 1);
        let json = serde_json::to_string(&event).unwrap();
        let restored: CheckInEvent = serde_json::from_str(&json).unwrap();

        assert_eq!(event.event_type(), restored.event_type());
        assert!(json.contains("\"checked_in\""));
        assert!(json.contains("\"zero\""));
    }

    #[test]
    fn rejected_carries_kind_and_reason() {
        let event = CheckInEvent::rejected(&ValidationError::AtCapacity { capacity: 50 });
        match event {
            CheckInEvent::CheckInRejected { kind, reason, .. } => {
                assert_eq!(kind, "at_capacity");
                assert_eq!(reason, "event is at capacity (50/50)");
            }
            other => panic!("unexpected event {}", other.event_type()),
        }
    }

    #[test]
    fn log_sink_appends_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("events.jsonl");
        let sink = LogSink::new(&path, "spring_meetup");

        sink.send(&CheckInEvent::reset()).unwrap();
        sink.send(&CheckInEvent::goal_reached(50, &[Team::Water]))
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("goal_reached"));

        // Each line is the event tagged with its roster.
        let entry: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(entry["roster"], "spring_meetup");
        assert_eq!(entry["event_type"], "roster_reset");
    }

    #[test]
    fn dispatcher_sends_to_all_sinks() {
        let dir = tempdir().unwrap();
        let path1 = dir.path().join("sink1.jsonl");
        let path2 = dir.path().join("sink2.jsonl");

        let mut dispatcher = EventDispatcher::new();
        dispatcher.add_sink(Box::new(LogSink::new(&path1, "roster")));
        dispatcher.add_sink(Box::new(LogSink::new(&path2, "roster")));

        dispatcher.dispatch(&[CheckInEvent::goal_lost(49, 50)]);

        assert!(fs::read_to_string(&path1).unwrap().contains("goal_lost"));
        assert!(fs::read_to_string(&path2).unwrap().contains("goal_lost"));
    }

    #[test]
    fn batch_is_delivered_in_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("events.jsonl");
        let mut dispatcher = EventDispatcher::new();
        dispatcher.add_sink(Box::new(LogSink::new(&path, "roster")));

        let record = CheckIn::new("Ana Lee", Team::Water);
        dispatcher.dispatch(&[
            CheckInEvent::checked_in(&record, 1),
            CheckInEvent::goal_reached(1, &[Team::Water]),
        ]);

        let content = fs::read_to_string(&path).unwrap();
        let types: Vec<String> = content
            .lines()
            .map(|l| {
                let v: serde_json::Value = serde_json::from_str(l).unwrap();
                v["event_type"].as_str().unwrap().to_string()
            })
            .collect();
        assert_eq!(types, vec!["checked_in", "goal_reached"]);
    }
}
