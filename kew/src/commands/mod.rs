mod completions;
mod dump;

use clap::{ArgAction, Parser, Subcommand};
use completions::CompletionsCommand;
use dump::DumpCommand;
use eyre::Result;

/// Extension trait for exiting on decode errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for kew_decode::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "kew")]
#[command(version)]
#[command(about = "Dump JSON, YAML and TOML documents as Go literals")]
pub(crate) struct Cli {
    /// Log more (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Dump(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write each document as Go literals to <input>.go
    Dump(DumpCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
