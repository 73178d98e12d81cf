// error.rs — Error types for the check-in subsystem.
//
// Two families live here:
// - `ValidationError`: expected, user-correctable rejections of a command.
//   The Display text is what gets shown to the attendee.
// - `CheckInError`: infrastructure failures (storage, config). Commands never
//   return these; only the store, config loader and desk do.

use thiserror::Error;
use uuid::Uuid;

/// Why a command was rejected. Every rejection leaves the roster untouched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The trimmed name was empty.
    #[error("please enter a name")]
    EmptyName,

    /// The team did not resolve to one of the fixed teams.
    #[error("please select a team ('{raw}' is not a known team)")]
    InvalidTeam { raw: String },

    /// The roster already holds `capacity` check-ins.
    #[error("event is at capacity ({capacity}/{capacity})")]
    AtCapacity { capacity: usize },

    /// Same normalized name already checked in for the same team.
    #[error("{name} is already checked in for {team}")]
    DuplicateEntry { name: String, team: String },

    /// No check-in with this id exists.
    #[error("no check-in found with id {0}")]
    NotFound(Uuid),
}

impl ValidationError {
    /// Stable snake_case name of the rejection, used as an event/message key.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::EmptyName => "empty_name",
            ValidationError::InvalidTeam { .. } => "invalid_team",
            ValidationError::AtCapacity { .. } => "at_capacity",
            ValidationError::DuplicateEntry { .. } => "duplicate_entry",
            ValidationError::NotFound(_) => "not_found",
        }
    }
}

/// Errors from persistence, configuration and notification plumbing.
#[derive(Debug, Error)]
pub enum CheckInError {
    /// A file I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: String,
        source: std::io::Error,
    },

    /// Failed to serialize roster or event data.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// The config file is not valid TOML for `CheckInConfig`.
    #[error("failed to parse config at {path}: {source}")]
    ConfigParse {
        path: String,
        source: toml::de::Error,
    },

    /// A config value is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
