// report.rs — Read-only commands: status, list, export, teams.

use summit_checkin::{CheckInConfig, Team};

use super::open_desk;
use crate::render;

pub fn status(config: &CheckInConfig) -> anyhow::Result<()> {
    let desk = open_desk(config)?;
    print!("{}", render::format_status(desk.state()));
    Ok(())
}

pub fn list(config: &CheckInConfig) -> anyhow::Result<()> {
    let desk = open_desk(config)?;
    let state = desk.state();

    if state.is_empty() {
        println!("No attendees checked in yet.");
        return Ok(());
    }

    println!("{:<10} {:<30} {:<18} {}", "ID", "NAME", "TEAM", "CHECKED IN");
    println!("{}", "-".repeat(76));
    for c in state.newest_first() {
        println!("{}", render::format_row(c));
    }
    println!("\n{}/{} attendee(s).", state.len(), state.capacity());

    Ok(())
}

pub fn export(config: &CheckInConfig) -> anyhow::Result<()> {
    let desk = open_desk(config)?;
    println!("{}", desk.export()?);
    Ok(())
}

pub fn teams() -> anyhow::Result<()> {
    println!("{:<8} {}", "ID", "LABEL");
    for team in Team::ALL {
        println!("{:<8} {}", team.id(), team.label());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use summit_checkin::EventState;
    use tempfile::TempDir;

    #[test]
    fn read_only_commands_on_empty_project() {
        let project = TempDir::new().unwrap();
        let config = CheckInConfig::for_project(project.path());

        status(&config).unwrap();
        list(&config).unwrap();
        export(&config).unwrap();
        teams().unwrap();

        // Reading never writes a roster blob.
        assert!(!open_desk(&config).unwrap().store().path().exists());
    }

    #[test]
    fn export_matches_stored_roster() {
        let project = TempDir::new().unwrap();
        let config = CheckInConfig::for_project(project.path());
        let mut desk = open_desk(&config).unwrap();
        desk.check_in("Ana Lee", "zero").unwrap().unwrap();

        let exported = open_desk(&config).unwrap().export().unwrap();
        let restored = EventState::rehydrate(&exported, config.capacity);
        assert_eq!(&restored, desk.state());
        list(&config).unwrap();
    }
}
