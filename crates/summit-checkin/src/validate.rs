// validate.rs — Pure checks run before any roster mutation.
//
// Each function either approves its piece of the input or returns the
// single `ValidationError` the command should surface. Commands call them
// in a fixed order: name, team, capacity, duplicate.

use uuid::Uuid;

use crate::check_in::{normalize_name, CheckIn};
use crate::error::ValidationError;
use crate::team::{resolve_team_id, Team};

/// Reject names that are empty after trimming. Returns the trimmed name.
pub fn validate_name(raw: &str) -> Result<&str, ValidationError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(name)
}

/// Resolve a raw team value and reject anything outside the fixed set.
pub fn validate_team(raw: &str) -> Result<Team, ValidationError> {
    let resolved = resolve_team_id(raw);
    Team::from_id(&resolved).ok_or(ValidationError::InvalidTeam { raw: resolved })
}

/// Reject when the roster already holds `capacity` records.
pub fn ensure_capacity(len: usize, capacity: usize) -> Result<(), ValidationError> {
    if len >= capacity {
        return Err(ValidationError::AtCapacity { capacity });
    }
    Ok(())
}

/// Reject when another record has the same normalized name on the same team.
///
/// `exclude` skips one record by id, so an edit doesn't collide with itself.
/// The duplicate ban is per team: the same person may join each team once.
pub fn ensure_unique(
    records: &[CheckIn],
    display_name: &str,
    team: Team,
    exclude: Option<Uuid>,
) -> Result<(), ValidationError> {
    let key = normalize_name(display_name);
    let clash = records
        .iter()
        .filter(|c| Some(c.id()) != exclude)
        .any(|c| c.matches(&key, team));
    if clash {
        return Err(ValidationError::DuplicateEntry {
            name: display_name.trim().to_string(),
            team: team.label().to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_blank_names_rejected() {
        assert_eq!(validate_name(""), Err(ValidationError::EmptyName));
        assert_eq!(validate_name(" \t "), Err(ValidationError::EmptyName));
        assert_eq!(validate_name("  Ana "), Ok("Ana"));
    }

    #[test]
    fn team_must_be_known() {
        assert_eq!(validate_team("Team Water Wise"), Ok(Team::Water));
        assert_eq!(
            validate_team(" lava "),
            Err(ValidationError::InvalidTeam {
                raw: "lava".to_string()
            })
        );
        assert!(validate_team("").is_err());
    }

    #[test]
    fn capacity_boundary() {
        assert!(ensure_capacity(49, 50).is_ok());
        assert_eq!(
            ensure_capacity(50, 50),
            Err(ValidationError::AtCapacity { capacity: 50 })
        );
    }

    #[test]
    fn duplicates_are_scoped_per_team() {
        let records = vec![CheckIn::new("Ana Lee", Team::Water)];
        assert!(matches!(
            ensure_unique(&records, "  ana   LEE ", Team::Water, None),
            Err(ValidationError::DuplicateEntry { .. })
        ));
        assert!(ensure_unique(&records, "Ana Lee", Team::Zero, None).is_ok());
    }

    #[test]
    fn excluded_record_does_not_collide() {
        let records = vec![CheckIn::new("Ana Lee", Team::Water)];
        let id = records[0].id();
        assert!(ensure_unique(&records, "ANA LEE", Team::Water, Some(id)).is_ok());
    }
}
