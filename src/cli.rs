use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Fitlock - earn screen time by working out
///
/// Tracks workout-earned unlock sessions, answers whether the shield
/// should block right now, and watches for shield notifications so a
/// blocked app launch can point the user back to their next workout.
#[derive(Parser, Debug)]
#[command(name = "fitlock")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file (defaults to the per-user config dir)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write an example configuration file
    Init {
        /// Where to write the file (defaults to the per-user config dir)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Show the shield gate decision and session state
    Status,
    /// Manage the unlock session
    Session {
        #[command(subcommand)]
        command: SessionCommands,
    },
    /// Run the shield notification monitor in the foreground
    Monitor,
}

#[derive(Subcommand, Debug)]
pub enum SessionCommands {
    /// Record a completed workout and start an unlock session
    Grant {
        /// Minutes to unlock (defaults to unlock.default_unlock_minutes)
        #[arg(long)]
        minutes: Option<u32>,

        /// Reason recorded on the session
        #[arg(long)]
        reason: Option<String>,
    },
    /// Add time to the current session
    Extend {
        /// Minutes to add (defaults to unlock.extend_minutes)
        #[arg(long)]
        minutes: Option<u32>,
    },
    /// Drop the current session, re-arming the shield
    Clear,
}
