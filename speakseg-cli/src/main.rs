//! speakseg command-line entry point

use clap::Parser;
use speakseg_cli::{commands::Commands, CliResult};

/// Split text into speech-ready fragments
#[derive(Debug, Parser)]
#[command(name = "speakseg", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    cli.command.execute()
}
