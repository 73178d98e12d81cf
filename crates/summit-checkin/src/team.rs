// team.rs — The fixed, closed set of teams attendees can join.
//
// Teams are known at compile time; there is no runtime create/delete.
// Each team has a canonical id (what gets stored) and a display label
// (what attendees see). Older stored rosters used labels in place of ids,
// so resolution accepts either.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the event's teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    Water,
    Zero,
    Power,
}

impl Team {
    /// Every team, in display order.
    pub const ALL: [Team; 3] = [Team::Water, Team::Zero, Team::Power];

    /// Canonical identifier, as stored in the roster blob.
    pub fn id(self) -> &'static str {
        match self {
            Team::Water => "water",
            Team::Zero => "zero",
            Team::Power => "power",
        }
    }

    /// Human-readable label used in messages and tallies.
    pub fn label(self) -> &'static str {
        match self {
            Team::Water => "Team Water Wise",
            Team::Zero => "Team Net Zero",
            Team::Power => "Team Renewables",
        }
    }

    /// Look up a team by canonical id only.
    pub fn from_id(id: &str) -> Option<Team> {
        Team::ALL.into_iter().find(|t| t.id() == id)
    }

    fn from_label(label: &str) -> Option<Team> {
        Team::ALL.into_iter().find(|t| t.label() == label)
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Map a raw team value (canonical id or display label) to its canonical id.
///
/// Unrecognized input comes back trimmed but otherwise unchanged so the
/// caller can reject it explicitly. It is never coerced to a default team.
pub fn resolve_team_id(raw: &str) -> String {
    let v = raw.trim();
    if let Some(team) = Team::from_id(v).or_else(|| Team::from_label(v)) {
        return team.id().to_string();
    }
    v.to_string()
}

/// Resolve and look up in one step.
pub fn parse_team(raw: &str) -> Option<Team> {
    Team::from_id(&resolve_team_id(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_ids_and_labels() {
        assert_eq!(resolve_team_id("water"), "water");
        assert_eq!(resolve_team_id("Team Net Zero"), "zero");
        assert_eq!(resolve_team_id("  Team Renewables "), "power");
    }

    #[test]
    fn unknown_team_passes_through() {
        assert_eq!(resolve_team_id("fire"), "fire");
        assert_eq!(resolve_team_id(""), "");
        // Labels are matched exactly; no case folding.
        assert_eq!(resolve_team_id("team net zero"), "team net zero");
        assert_eq!(parse_team("fire"), None);
    }

    #[test]
    fn parse_team_finds_known_teams() {
        assert_eq!(parse_team("zero"), Some(Team::Zero));
        assert_eq!(parse_team("Team Water Wise"), Some(Team::Water));
    }

    #[test]
    fn serializes_as_canonical_id() {
        let json = serde_json::to_string(&Team::Power).unwrap();
        assert_eq!(json, "\"power\"");
        let team: Team = serde_json::from_str("\"water\"").unwrap();
        assert_eq!(team, Team::Water);
    }

    #[test]
    fn display_uses_label() {
        assert_eq!(Team::Zero.to_string(), "Team Net Zero");
    }
}
