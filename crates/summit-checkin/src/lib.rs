//! # summit-checkin
//!
//! Check-in roster management for a capacity-bounded event.
//!
//! Attendees check in under one of a fixed set of teams. The roster enforces
//! name/team validation, a per-team duplicate ban and a hard capacity, keeps
//! per-team tallies, and reports the one-shot "goal reached" transition when
//! the roster fills up, together with the winning team(s).
//!
//! ## Key components
//!
//! - [`EventState`] — the roster snapshot; commands return a new snapshot and
//!   never touch the one they were called on
//! - [`TeamTallies`] / [`GoalStatus`] — tallies, winners (ties kept) and the
//!   edge-triggered `just_reached` flag
//! - [`EventState::rehydrate`] — load-time repair of stored blobs
//! - [`BlobStore`] — persistence adapter ([`JsonFileStore`], [`MemoryStore`])
//! - [`CheckInDesk`] — stateful command surface that persists and notifies
//! - [`CheckInEvent`] / [`NotificationSink`] — hooks for presentation layers

pub mod check_in;
pub mod config;
pub mod desk;
pub mod error;
pub mod events;
pub mod goal;
pub mod snapshot;
pub mod state;
pub mod store;
pub mod team;
pub mod validate;

pub use check_in::{normalize_name, CheckIn};
pub use config::CheckInConfig;
pub use desk::{CheckInDesk, CommandResult};
pub use error::{CheckInError, ValidationError};
pub use events::{CheckInEvent, EventDispatcher, LogSink, NotificationSink};
pub use goal::{winner_labels, GoalStatus, TeamTallies};
pub use snapshot::{RawBlob, RawCheckIn};
pub use state::{EventState, Outcome, DEFAULT_CAPACITY};
pub use store::{BlobStore, JsonFileStore, MemoryStore};
pub use team::{parse_team, resolve_team_id, Team};
