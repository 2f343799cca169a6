use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::{Args, Commands, SessionCommands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    commands::utils::init_logging(args.verbose);

    match args.command {
        Commands::Init { output, force } => commands::session::init(output, force),
        Commands::Status => commands::session::status(),
        Commands::Session { command } => match command {
            SessionCommands::Grant { minutes, reason } => {
                commands::session::grant(args.config, minutes, reason)
            }
            SessionCommands::Extend { minutes } => {
                commands::session::extend(args.config, minutes)
            }
            SessionCommands::Clear => commands::session::clear(),
        },
        Commands::Monitor => commands::monitor::run(args.config),
    }
}
