// goal.rs — Team tallies, winner selection and goal evaluation.
//
// All functions here are pure. Ties are never broken: every team sharing
// the top tally is a winner.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::check_in::CheckIn;
use crate::team::Team;

/// Check-in count per team. Every team is present, even at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamTallies(BTreeMap<Team, usize>);

impl TeamTallies {
    /// Count records per team.
    pub fn from_records(records: &[CheckIn]) -> Self {
        let mut counts: BTreeMap<Team, usize> = Team::ALL.iter().map(|&t| (t, 0)).collect();
        for record in records {
            *counts.entry(record.team()).or_insert(0) += 1;
        }
        Self(counts)
    }

    pub fn get(&self, team: Team) -> usize {
        self.0.get(&team).copied().unwrap_or(0)
    }

    /// Sum over all teams; equals the roster length.
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    /// Highest tally across teams.
    pub fn max(&self) -> usize {
        self.0.values().copied().max().unwrap_or(0)
    }

    /// `(team, count)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Team, usize)> + '_ {
        self.0.iter().map(|(&t, &n)| (t, n))
    }

    /// Teams whose tally equals the maximum, in display order.
    pub fn winners(&self) -> Vec<Team> {
        let max = self.max();
        self.iter()
            .filter(|&(_, n)| n == max)
            .map(|(t, _)| t)
            .collect()
    }
}

/// Result of evaluating the participation goal on a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GoalStatus {
    /// The roster is below capacity.
    NotReached,

    /// The roster is full.
    Reached {
        /// Team(s) with the top tally, ties included.
        winners: Vec<Team>,
        /// True only for the transition into the full state; false when
        /// re-rendering a roster that was already celebrated.
        just_reached: bool,
    },
}

impl GoalStatus {
    pub fn is_reached(&self) -> bool {
        matches!(self, GoalStatus::Reached { .. })
    }

    pub fn just_reached(&self) -> bool {
        matches!(
            self,
            GoalStatus::Reached {
                just_reached: true,
                ..
            }
        )
    }

    pub fn winners(&self) -> &[Team] {
        match self {
            GoalStatus::Reached { winners, .. } => winners,
            GoalStatus::NotReached => &[],
        }
    }
}

/// Evaluate the goal for a roster of `records` with the given cached flag.
pub fn evaluate(records: &[CheckIn], capacity: usize, celebrated: bool) -> GoalStatus {
    if records.len() != capacity {
        return GoalStatus::NotReached;
    }
    GoalStatus::Reached {
        winners: TeamTallies::from_records(records).winners(),
        just_reached: !celebrated,
    }
}

/// "Team A & Team B" — joined labels for banners and messages.
pub fn winner_labels(winners: &[Team]) -> String {
    winners
        .iter()
        .map(|t| t.label())
        .collect::<Vec<_>>()
        .join(" & ")
}
