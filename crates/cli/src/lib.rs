pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "frontdesk",
    about = "Frontdesk operator CLI",
    long_about = "Exercise the dialogue core offline: run turns, inspect intent routing, \
                  sentiment scoring, and effective configuration.",
    after_help = "Examples:\n  frontdesk turn \"What's on the menu?\"\n  frontdesk classify \"any houses for sale\"\n  frontdesk config"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Run one dialogue turn against an in-process engine with default knowledge")]
    Turn {
        text: String,
        #[arg(long, default_value = "cli", help = "Session key to run the turn under")]
        session: String,
        #[arg(long, help = "Business type override (restaurant|real_estate)")]
        business_type: Option<String>,
    },
    #[command(about = "Show which topic the keyword rules route a text to")]
    Classify { text: String },
    #[command(about = "Score a text against the sentiment lexicons")]
    Sentiment { text: String },
    #[command(about = "Inspect effective configuration values with secret redaction")]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Turn { text, session, business_type } => {
            commands::turn::run(&text, &session, business_type.as_deref())
        }
        Command::Classify { text } => commands::classify::run(&text),
        Command::Sentiment { text } => commands::sentiment::run(&text),
        Command::Config => commands::CommandResult { exit_code: 0, output: commands::config::run() },
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
