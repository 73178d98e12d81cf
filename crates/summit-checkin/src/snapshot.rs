// snapshot.rs — Serialize rosters to a JSON blob and rebuild them on load.
//
// Saving is straightforward. Loading never trusts the blob: records are
// repaired or dropped one by one, and `celebrated` is recomputed from the
// repaired length. Blobs written by the earlier storage format use
// different field names (`checkins`, `nameOriginal`, `teamKey`, ...);
// those are accepted too.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::check_in::{normalize_name, CheckIn};
use crate::error::CheckInError;
use crate::state::EventState;
use crate::team::{resolve_team_id, Team};

/// Persisted form of an `EventState`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBlob {
    pub check_ins: Vec<RawCheckIn>,
    pub celebrated: bool,
}

/// Persisted form of a `CheckIn`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCheckIn {
    pub id: Uuid,
    pub display_name: String,
    pub normalized_name: String,
    pub team_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<&CheckIn> for RawCheckIn {
    fn from(c: &CheckIn) -> Self {
        Self {
            id: c.id(),
            display_name: c.display_name().to_string(),
            normalized_name: c.normalized_name().to_string(),
            team_id: c.team().id().to_string(),
            created_at: c.created_at(),
        }
    }
}

impl From<&EventState> for RawBlob {
    fn from(state: &EventState) -> Self {
        Self {
            check_ins: state.check_ins().iter().map(RawCheckIn::from).collect(),
            celebrated: state.celebrated(),
        }
    }
}

// Accepted field names, current first.
const CHECK_INS_KEYS: &[&str] = &["checkIns", "checkins"];
const NAME_KEYS: &[&str] = &["displayName", "nameOriginal"];
const TEAM_KEYS: &[&str] = &["teamId", "teamKey"];
const TIME_KEYS: &[&str] = &["createdAt", "timeISO"];

impl EventState {
    /// Serialize to the compact JSON blob handed to a `BlobStore`.
    pub fn to_blob(&self) -> Result<String, CheckInError> {
        Ok(serde_json::to_string(&RawBlob::from(self))?)
    }

    /// Pretty-printed blob, for exporting the roster.
    pub fn export(&self) -> Result<String, CheckInError> {
        Ok(serde_json::to_string_pretty(&RawBlob::from(self))?)
    }

    /// Rebuild a roster from a stored blob, repairing what it can.
    ///
    /// Never fails: unparsable input degrades to an empty roster.
    pub fn rehydrate(blob: &str, capacity: usize) -> EventState {
        match serde_json::from_str::<Value>(blob) {
            Ok(value) => Self::rehydrate_value(&value, capacity),
            Err(e) => {
                tracing::warn!("stored roster is not valid JSON, starting empty: {}", e);
                EventState::new(capacity)
            }
        }
    }

    /// Rebuild from an already-parsed JSON value.
    pub fn rehydrate_value(value: &Value, capacity: usize) -> EventState {
        let Some(records) = value
            .as_object()
            .and_then(|root| field(root, CHECK_INS_KEYS))
            .and_then(Value::as_array)
        else {
            tracing::warn!("stored roster has no check-in list, starting empty");
            return EventState::new(capacity);
        };

        let mut seen_ids = HashSet::new();
        let mut seen_entries = HashSet::new();
        let mut repaired = Vec::with_capacity(records.len().min(capacity));
        let mut dropped = 0usize;

        for raw in records {
            let Some(mut record) = repair_record(raw) else {
                dropped += 1;
                continue;
            };
            if !seen_entries.insert((record.normalized_name().to_string(), record.team())) {
                dropped += 1;
                continue;
            }
            if !seen_ids.insert(record.id()) {
                record = CheckIn::restore(
                    Uuid::new_v4(),
                    record.display_name(),
                    record.team(),
                    record.created_at(),
                );
                seen_ids.insert(record.id());
            }
            repaired.push(record);
        }

        if dropped > 0 {
            tracing::warn!("dropped {} unusable check-in record(s) on load", dropped);
        }
        if repaired.len() > capacity {
            tracing::warn!(
                "stored roster holds {} check-ins, truncating to capacity {}",
                repaired.len(),
                capacity
            );
            repaired.truncate(capacity);
        }

        EventState::from_records(capacity, repaired)
    }
}

fn field<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| obj.get(*k))
}

fn str_field<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    field(obj, keys).and_then(Value::as_str)
}

/// Repair one stored record, or `None` if it must be dropped.
fn repair_record(raw: &Value) -> Option<CheckIn> {
    let obj = raw.as_object()?;
    let name = str_field(obj, NAME_KEYS)?;
    if normalize_name(name).is_empty() {
        return None;
    }
    let team = Team::from_id(&resolve_team_id(str_field(obj, TEAM_KEYS)?))?;

    let id = str_field(obj, &["id"])
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4);
    let created_at = str_field(obj, TIME_KEYS)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_else(Utc::now);

    Some(CheckIn::restore(id, name, team, created_at))
}
