//! # summit-cli
//!
//! Command-line front desk for event check-ins.
//!
//! - `summit checkin/edit/remove/remove-last/reset` — change the roster
//! - `summit status/list` — counts, progress, team tallies, attendee list
//! - `summit export` — dump the stored roster as JSON
//! - `summit teams` — show the teams attendees can join

mod commands;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use summit_checkin::CheckInConfig;
use tracing_subscriber::EnvFilter;

/// Event check-in desk — register attendees and track the team goal.
#[derive(Parser)]
#[command(name = "summit", version, about)]
struct Cli {
    /// Project root directory (defaults to current directory).
    #[arg(long, default_value = ".")]
    project_root: PathBuf,

    /// Override the event capacity from .summit/config.toml.
    #[arg(long)]
    capacity: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check in an attendee.
    Checkin {
        /// Attendee name as it should be displayed.
        name: String,
        /// Team id (water, zero, power) or label (e.g. "Team Net Zero").
        #[arg(long)]
        team: String,
    },
    /// Change an existing check-in's name and team.
    Edit {
        /// Check-in ID (or a unique prefix of it).
        id: String,
        /// New attendee name.
        name: String,
        /// New team id or label.
        #[arg(long)]
        team: String,
    },
    /// Remove a check-in.
    Remove {
        /// Check-in ID (or a unique prefix of it).
        id: String,
    },
    /// Remove the most recent check-in.
    RemoveLast,
    /// Clear all check-ins.
    Reset,
    /// Show counts, progress and team tallies.
    Status,
    /// List attendees, newest first.
    List,
    /// Print the stored roster as JSON.
    Export,
    /// List the teams attendees can join.
    Teams,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they don't interfere with `export` on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("summit_checkin=warn,summit=warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let project_root = cli.project_root.canonicalize().unwrap_or(cli.project_root);
    let config = CheckInConfig::load(&project_root)?.with_capacity(cli.capacity)?;
    tracing::debug!(
        capacity = config.capacity,
        data_dir = %config.data_dir.display(),
        "configuration loaded"
    );

    match &cli.command {
        Commands::Checkin { name, team } => commands::roster::check_in(&config, name, team),
        Commands::Edit { id, name, team } => commands::roster::edit(&config, id, name, team),
        Commands::Remove { id } => commands::roster::remove(&config, id),
        Commands::RemoveLast => commands::roster::remove_last(&config),
        Commands::Reset => commands::roster::reset(&config),
        Commands::Status => commands::report::status(&config),
        Commands::List => commands::report::list(&config),
        Commands::Export => commands::report::export(&config),
        Commands::Teams => commands::report::teams(),
    }
}
