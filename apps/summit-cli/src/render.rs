// render.rs — Terminal presentation of the roster.
//
// `TerminalSink` turns desk events into attendee-facing messages. The
// celebration is printed only on `GoalReached`, which the desk emits once
// per transition into a full roster. The `format_*` helpers build the
// status screen from a snapshot.

use summit_checkin::{
    winner_labels, CheckIn, CheckInError, CheckInEvent, EventState, NotificationSink,
};

const BAR_WIDTH: usize = 20;

/// Prints a message for each accepted command and the goal edges.
pub struct TerminalSink;

impl NotificationSink for TerminalSink {
    fn send(&self, event: &CheckInEvent) -> Result<(), CheckInError> {
        if let Some(line) = message_for(event) {
            println!("{}", line);
        }
        Ok(())
    }
}

/// Attendee-facing text for an event. Rejections are reported by the
/// command itself, so they map to `None`.
pub fn message_for(event: &CheckInEvent) -> Option<String> {
    match event {
        CheckInEvent::CheckedIn { name, team, .. } => {
            Some(format!("Welcome, {} from {}!", name, team.label()))
        }
        CheckInEvent::CheckInEdited { name, team, .. } => {
            Some(format!("Updated: {} ({})", name, team.label()))
        }
        CheckInEvent::CheckInRemoved { name, team, .. } => {
            Some(format!("Removed: {} ({})", name, team.label()))
        }
        CheckInEvent::RosterReset { .. } => Some("Reset: all check-ins cleared.".to_string()),
        CheckInEvent::GoalReached {
            capacity, winners, ..
        } => Some(format!(
            "\n*** CELEBRATION ***\nGoal reached! {cap}/{cap} checked in. Winning team: {}!",
            winner_labels(winners),
            cap = capacity
        )),
        CheckInEvent::GoalLost {
            count, capacity, ..
        } => Some(format!(
            "Roster is below capacity again ({}/{}).",
            count, capacity
        )),
        CheckInEvent::CheckInRejected { .. } => None,
    }
}

/// `[#############.......]  67%`
pub fn format_progress(state: &EventState) -> String {
    let pct = usize::from(state.progress_percent());
    let filled = (pct * BAR_WIDTH) / 100;
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH - filled),
        pct
    )
}

/// Standing goal banner for a full roster, `None` otherwise.
pub fn format_banner(state: &EventState) -> Option<String> {
    let goal = state.evaluate_goal();
    if !goal.is_reached() {
        return None;
    }
    Some(format!(
        "Goal reached! {cap}/{cap} checked in. Winning team: {}!",
        winner_labels(goal.winners()),
        cap = state.capacity()
    ))
}

/// Counts, progress bar, per-team tallies and the banner if full.
pub fn format_status(state: &EventState) -> String {
    let mut out = format!(
        "Attendees: {}/{}\n{}\n\n",
        state.len(),
        state.capacity(),
        format_progress(state)
    );
    for (team, count) in state.tallies().iter() {
        out.push_str(&format!("  {:<18} {:>3}\n", team.label(), count));
    }
    if let Some(banner) = format_banner(state) {
        out.push('\n');
        out.push_str(&banner);
        out.push('\n');
    }
    out
}

/// One attendee row: short id, name, team label.
pub fn format_row(c: &CheckIn) -> String {
    let id = c.id().to_string();
    format!(
        "{:<10} {:<30} {:<18} {}",
        &id[..8],
        truncate(c.display_name(), 28),
        c.team().label(),
        c.created_at().format("%Y-%m-%d %H:%M")
    )
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let head: String = s.chars().take(max - 3).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}
