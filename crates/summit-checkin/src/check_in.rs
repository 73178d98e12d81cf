// check_in.rs — CheckIn: one attendee's registration record.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::team::Team;

/// Trim, collapse internal whitespace runs to one space, lowercase.
///
/// Used only for duplicate comparison; the entered text is kept separately
/// for display. Idempotent.
pub fn normalize_name(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// A single check-in.
///
/// `normalized_name` is always derived from `display_name`; there is no
/// way to set one without the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckIn {
    id: Uuid,
    display_name: String,
    normalized_name: String,
    team: Team,
    created_at: DateTime<Utc>,
}

impl CheckIn {
    /// Create a fresh record with a new id and the current time.
    ///
    /// The name is stored trimmed. Callers validate before constructing.
    pub fn new(display_name: &str, team: Team) -> Self {
        Self::restore(Uuid::new_v4(), display_name, team, Utc::now())
    }

    /// Rebuild a record from persisted parts. The normalized name is recomputed.
    pub(crate) fn restore(
        id: Uuid,
        display_name: &str,
        team: Team,
        created_at: DateTime<Utc>,
    ) -> Self {
        let display_name = display_name.trim().to_string();
        Self {
            id,
            normalized_name: normalize_name(&display_name),
            display_name,
            team,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The name as the attendee typed it (trimmed).
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn normalized_name(&self) -> &str {
        &self.normalized_name
    }

    pub fn team(&self) -> Team {
        self.team
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether this record collides with `(normalized_name, team)`.
    pub fn matches(&self, normalized_name: &str, team: Team) -> bool {
        self.team == team && self.normalized_name == normalized_name
    }

    /// Replace name and team, keeping id and creation time.
    pub(crate) fn rename(&mut self, display_name: &str, team: Team) {
        self.display_name = display_name.trim().to_string();
        self.normalized_name = normalize_name(&self.display_name);
        self.team = team;
    }
}
