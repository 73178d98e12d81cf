// roster.rs — Commands that change the roster: checkin, edit, remove,
// remove-last, reset.
//
// Accepted commands print through `TerminalSink`; rejections come back as
// errors so the process exits non-zero with the reason.

use summit_checkin::{CheckInConfig, CheckInDesk, CommandResult, EventState, JsonFileStore};
use uuid::Uuid;

use super::open_desk;
use crate::render::{self, TerminalSink};

fn open_with_terminal(config: &CheckInConfig) -> anyhow::Result<CheckInDesk<JsonFileStore>> {
    let mut desk = open_desk(config)?;
    desk.add_sink(Box::new(TerminalSink));
    Ok(desk)
}

/// Unwrap a desk result, turning a rejection into an error.
fn accepted(result: CommandResult, state: &EventState) -> anyhow::Result<()> {
    match result? {
        Ok(out) => {
            if !out.goal.is_reached() {
                println!(
                    "{}/{} checked in {}",
                    out.state.len(),
                    out.state.capacity(),
                    render::format_progress(&out.state)
                );
            }
            Ok(())
        }
        Err(err) => {
            // At capacity: show the standing goal banner with the rejection.
            if let Some(banner) = render::format_banner(state) {
                println!("{}", banner);
            }
            anyhow::bail!("{}", err)
        }
    }
}

pub fn check_in(config: &CheckInConfig, name: &str, team: &str) -> anyhow::Result<()> {
    let mut desk = open_with_terminal(config)?;
    let result = desk.check_in(name, team);
    accepted(result, desk.state())
}

pub fn edit(config: &CheckInConfig, id: &str, name: &str, team: &str) -> anyhow::Result<()> {
    let mut desk = open_with_terminal(config)?;
    let id = resolve_id(desk.state(), id)?;
    let result = desk.edit(id, name, team);
    accepted(result, desk.state())
}

pub fn remove(config: &CheckInConfig, id: &str) -> anyhow::Result<()> {
    let mut desk = open_with_terminal(config)?;
    let id = resolve_id(desk.state(), id)?;
    let result = desk.remove(id);
    accepted(result, desk.state())
}

pub fn remove_last(config: &CheckInConfig) -> anyhow::Result<()> {
    let mut desk = open_with_terminal(config)?;
    if desk.remove_last()?.is_none() {
        println!("No attendees checked in yet.");
    }
    Ok(())
}

pub fn reset(config: &CheckInConfig) -> anyhow::Result<()> {
    let mut desk = open_with_terminal(config)?;
    desk.reset()?;
    Ok(())
}

/// Accept a full UUID or a unique prefix of one from the current roster.
fn resolve_id(state: &EventState, raw: &str) -> anyhow::Result<Uuid> {
    if let Ok(id) = Uuid::parse_str(raw) {
        return Ok(id);
    }
    let raw = raw.trim().to_lowercase();
    if raw.is_empty() {
        anyhow::bail!("check-in id must not be empty");
    }
    let matches: Vec<Uuid> = state
        .check_ins()
        .iter()
        .map(|c| c.id())
        .filter(|id| id.to_string().starts_with(&raw))
        .collect();
    match matches.as_slice() {
        [id] => Ok(*id),
        [] => anyhow::bail!("no check-in found matching '{}'", raw),
        _ => anyhow::bail!("'{}' matches {} check-ins; use more characters", raw, matches.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use summit_checkin::Team;
    use tempfile::TempDir;

    fn config(project: &TempDir, capacity: usize) -> CheckInConfig {
        CheckInConfig::for_project(project.path())
            .with_capacity(Some(capacity))
            .unwrap()
    }

    #[test]
    fn check_in_persists_to_project() {
        let project = TempDir::new().unwrap();
        let config = config(&project, 5);

        check_in(&config, "Ana Lee", "Team Water Wise").unwrap();

        let desk = open_desk(&config).unwrap();
        assert_eq!(desk.state().len(), 1);
        assert_eq!(desk.state().check_ins()[0].team(), Team::Water);
        assert!(config.events_log.exists());
    }

    #[test]
    fn rejection_is_an_error() {
        let project = TempDir::new().unwrap();
        let config = config(&project, 5);

        check_in(&config, "Ana Lee", "water").unwrap();
        let err = check_in(&config, "ana lee", "water").unwrap_err();
        assert!(err.to_string().contains("already checked in"));
        assert!(check_in(&config, "Bo", "lava").is_err());
        assert_eq!(open_desk(&config).unwrap().state().len(), 1);
    }

    #[test]
    fn edit_and_remove_by_prefix() {
        let project = TempDir::new().unwrap();
        let config = config(&project, 5);
        check_in(&config, "Ana Lee", "water").unwrap();

        let id = open_desk(&config).unwrap().state().check_ins()[0].id();
        let prefix = &id.to_string()[..8];

        edit(&config, prefix, "Ana B. Lee", "power").unwrap();
        let desk = open_desk(&config).unwrap();
        assert_eq!(desk.state().check_ins()[0].display_name(), "Ana B. Lee");
        assert_eq!(desk.state().check_ins()[0].id(), id);

        remove(&config, &id.to_string()).unwrap();
        assert!(open_desk(&config).unwrap().state().is_empty());
    }

    #[test]
    fn unknown_id_is_an_error() {
        let project = TempDir::new().unwrap();
        let config = config(&project, 5);
        assert!(remove(&config, "deadbeef").is_err());
        assert!(remove(&config, &Uuid::new_v4().to_string()).is_err());
    }

    #[test]
    fn remove_last_and_reset() {
        let project = TempDir::new().unwrap();
        let config = config(&project, 2);
        remove_last(&config).unwrap();

        check_in(&config, "A", "water").unwrap();
        check_in(&config, "B", "zero").unwrap();
        assert!(open_desk(&config).unwrap().is_full());

        remove_last(&config).unwrap();
        let desk = open_desk(&config).unwrap();
        assert_eq!(desk.state().len(), 1);
        assert!(!desk.state().celebrated());

        reset(&config).unwrap();
        assert!(open_desk(&config).unwrap().state().is_empty());
    }

    #[test]
    fn at_capacity_is_rejected() {
        let project = TempDir::new().unwrap();
        let config = config(&project, 1);
        check_in(&config, "A", "water").unwrap();
        let err = check_in(&config, "B", "zero").unwrap_err();
        assert!(err.to_string().contains("at capacity"));
    }
}
