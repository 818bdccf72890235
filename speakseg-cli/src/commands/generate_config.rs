//! Generate config command implementation

use crate::error::CliResult;
use anyhow::Context;
use clap::Args;
use speakseg_core::SegmenterConfig;
use std::fs;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> CliResult<()> {
        let template = generate_template()?;

        match &self.output {
            Some(path) => {
                fs::write(path, template)
                    .with_context(|| format!("Failed to write to {}", path.display()))?;
                eprintln!("✓ Configuration written to {}", path.display());
            }
            None => print!("{template}"),
        }

        Ok(())
    }
}

/// Render the default configuration as TOML
pub fn generate_template() -> CliResult<String> {
    let body = toml::to_string_pretty(&SegmenterConfig::default())
        .context("Failed to render default configuration")?;
    Ok(format!("# speakseg configuration; every key is optional\n\n{body}"))
}
