// state.rs — EventState: the roster snapshot and its commands.
//
// Commands take `&self` and hand back a new snapshot; the snapshot they were
// given is never touched, so a caller can keep the previous one around for
// comparison or undo. Every successful command returns a snapshot whose
// `celebrated` flag already reflects whether the roster is full.

use uuid::Uuid;

use crate::check_in::CheckIn;
use crate::error::ValidationError;
use crate::goal::{self, GoalStatus, TeamTallies};
use crate::team::Team;
use crate::validate;

/// Default number of check-ins an event accepts.
pub const DEFAULT_CAPACITY: usize = 50;

/// The aggregate root: an ordered, capacity-bounded list of check-ins.
///
/// Invariants held by every snapshot this type hands out:
/// - `check_ins.len() <= capacity`
/// - no two records share both normalized name and team
/// - `celebrated` implies the roster is full
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventState {
    capacity: usize,
    check_ins: Vec<CheckIn>,
    celebrated: bool,
}

/// A successful command: the new snapshot plus what it touched.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// The snapshot after the command.
    pub state: EventState,
    /// The record that was created, edited or removed.
    pub record: CheckIn,
    /// Goal evaluation for the new snapshot. `just_reached` is true only
    /// when this command filled the roster.
    pub goal: GoalStatus,
}

impl EventState {
    /// An empty roster.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            check_ins: Vec::new(),
            celebrated: false,
        }
    }

    /// Build from already-repaired records; `celebrated` is derived.
    pub(crate) fn from_records(capacity: usize, check_ins: Vec<CheckIn>) -> Self {
        let celebrated = check_ins.len() == capacity;
        Self {
            capacity,
            check_ins,
            celebrated,
        }
    }

    // ── Commands ────────────────────────────────────────────────

    /// Register `name` for the team named by `team_raw`.
    pub fn check_in(&self, name: &str, team_raw: &str) -> Result<Outcome, ValidationError> {
        let name = validate::validate_name(name)?;
        let team = validate::validate_team(team_raw)?;
        validate::ensure_capacity(self.check_ins.len(), self.capacity)?;
        validate::ensure_unique(&self.check_ins, name, team, None)?;

        let record = CheckIn::new(name, team);
        let mut next = self.clone();
        next.check_ins.push(record.clone());
        Ok(next.settle(record))
    }

    /// Change the name and team of an existing record, keeping its id,
    /// creation time and position.
    pub fn edit(&self, id: Uuid, name: &str, team_raw: &str) -> Result<Outcome, ValidationError> {
        let index = self.position(id)?;
        let name = validate::validate_name(name)?;
        let team = validate::validate_team(team_raw)?;
        validate::ensure_unique(&self.check_ins, name, team, Some(id))?;

        let mut next = self.clone();
        next.check_ins[index].rename(name, team);
        let record = next.check_ins[index].clone();
        Ok(next.settle(record))
    }

    /// Remove a record by id. Dropping below capacity clears `celebrated`.
    pub fn remove(&self, id: Uuid) -> Result<Outcome, ValidationError> {
        let index = self.position(id)?;
        let mut next = self.clone();
        let record = next.check_ins.remove(index);
        Ok(next.settle(record))
    }

    /// Remove the most recently added record, if any.
    pub fn remove_last(&self) -> Option<Outcome> {
        let mut next = self.clone();
        let record = next.check_ins.pop()?;
        Some(next.settle(record))
    }

    /// A fresh empty roster with the same capacity.
    pub fn reset(&self) -> EventState {
        EventState::new(self.capacity)
    }

    // ── Queries ─────────────────────────────────────────────────

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.check_ins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.check_ins.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.check_ins.len() >= self.capacity
    }

    /// Whether the goal-reached transition has been acknowledged.
    pub fn celebrated(&self) -> bool {
        self.celebrated
    }

    /// Records in insertion order.
    pub fn check_ins(&self) -> &[CheckIn] {
        &self.check_ins
    }

    /// Records newest first, the order the attendee list shows them.
    pub fn newest_first(&self) -> impl Iterator<Item = &CheckIn> {
        self.check_ins.iter().rev()
    }

    pub fn find(&self, id: Uuid) -> Option<&CheckIn> {
        self.check_ins.iter().find(|c| c.id() == id)
    }

    pub fn tallies(&self) -> TeamTallies {
        TeamTallies::from_records(&self.check_ins)
    }

    pub fn winners(&self) -> Vec<Team> {
        self.tallies().winners()
    }

    /// Fill level as a rounded percentage, clamped to 100.
    pub fn progress_percent(&self) -> u8 {
        if self.capacity == 0 {
            return 100;
        }
        let pct = (self.check_ins.len() as f64 / self.capacity as f64 * 100.0).round();
        pct.min(100.0) as u8
    }

    /// Evaluate the goal against the cached `celebrated` flag.
    pub fn evaluate_goal(&self) -> GoalStatus {
        goal::evaluate(&self.check_ins, self.capacity, self.celebrated)
    }

    // ── Internals ───────────────────────────────────────────────

    fn position(&self, id: Uuid) -> Result<usize, ValidationError> {
        self.check_ins
            .iter()
            .position(|c| c.id() == id)
            .ok_or(ValidationError::NotFound(id))
    }

    /// Evaluate against the inherited flag, then record the result so the
    /// flag tracks fullness from here on.
    fn settle(mut self, record: CheckIn) -> Outcome {
        let goal = self.evaluate_goal();
        self.celebrated = goal.is_reached();
        Outcome {
            state: self,
            record,
            goal,
        }
    }
}
