//! CLI command implementations

use crate::error::CliResult;
use clap::Subcommand;

pub mod generate_config;
pub mod segment;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Split text into speech-ready fragments
    Segment(segment::SegmentArgs),

    /// Check that a rule resource extracts and compiles
    Validate(validate::ValidateArgs),

    /// Write a configuration file holding every default
    GenerateConfig(generate_config::GenerateConfigArgs),
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self) -> CliResult<()> {
        match self {
            Commands::Segment(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
        }
    }
}
