//! Validate command implementation

use crate::error::{CliError, CliResult};
use anyhow::Context;
use clap::Args;
use speakseg_core::{compile_boundaries, RuleExtractor, SegmenterConfig};
use std::fs;
use std::path::{Path, PathBuf};

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to the rule resource to validate
    #[arg(value_name = "FILE")]
    pub rules: PathBuf,

    /// Configuration file supplying rule labels and block markers
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> CliResult<()> {
        println!("Validating rule resource: {}", self.rules.display());

        let extractor = match &self.config {
            Some(path) => {
                let config = SegmenterConfig::from_file(path)
                    .map_err(|e| CliError::ConfigError(format!("{}: {e}", path.display())))?;
                RuleExtractor::from_config(&config)
            }
            None => RuleExtractor::default(),
        };

        let count = validate_file(&self.rules, &extractor)?;
        println!("✓ Rules are valid!");
        println!("  Boundary expressions: {count}");
        Ok(())
    }
}

/// Extract and compile the rules in `path`, returning the expression count
pub fn validate_file(path: &Path, extractor: &RuleExtractor) -> CliResult<usize> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let patterns = extractor.extract(&text);
    compile_boundaries(&patterns)
        .with_context(|| format!("Validation failed for {}", path.display()))?;

    Ok(patterns.len())
}
