//! Segment command implementation

use crate::error::{CliError, CliResult};
use crate::output::{JsonFormatter, OutputFormatter, TextFormatter};
use anyhow::Context;
use clap::Args;
use speakseg_core::{Segmenter, SegmenterConfig};
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Arguments for the segment command
#[derive(Debug, Args)]
pub struct SegmentArgs {
    /// Input files; reads stdin when none are given or for `-`
    #[arg(value_name = "FILE")]
    pub input: Vec<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Language tag selecting the boundary rules (e.g. en, ja_JP, zh-CN)
    #[arg(short, long, default_value = "en", env = "SPEAKSEG_LANGUAGE")]
    pub language: String,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Character budget for fragments without CJK
    #[arg(long, value_name = "N")]
    pub max_chars: Option<usize>,

    /// Character budget for fragments with CJK
    #[arg(long, value_name = "N")]
    pub max_cjk_chars: Option<usize>,

    /// UTF-8 byte budget
    #[arg(long, value_name = "N")]
    pub max_bytes: Option<usize>,

    /// Directory of `<language>.rules` files
    #[arg(long, value_name = "DIR", conflicts_with = "no_system_rules")]
    pub rules_dir: Option<PathBuf>,

    /// Skip the system rules directory
    #[arg(long)]
    pub no_system_rules: bool,

    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text with one fragment per line
    Text,
    /// JSON array of fragments with lengths
    Json,
}

impl SegmentArgs {
    /// Execute the segment command
    pub fn execute(&self) -> CliResult<()> {
        self.init_logging();

        log::debug!("Arguments: {:?}", self);

        let config = self.load_config()?;
        let segmenter =
            Segmenter::new(config).map_err(|e| CliError::ConfigError(e.to_string()))?;

        let writer = self.open_output()?;
        let mut formatter: Box<dyn OutputFormatter> = match self.format {
            OutputFormat::Text => Box::new(TextFormatter::new(writer)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
        };

        let mut index = 0;
        for (name, text) in self.read_inputs()? {
            let fragments = segmenter.segment(&text, &self.language);
            log::info!("{name}: {} fragments", fragments.len());

            for fragment in &fragments {
                formatter.format_fragment(fragment, index)?;
                index += 1;
            }
        }

        formatter.finish()
    }

    /// Build the segmenter configuration from the file and the overrides
    pub fn load_config(&self) -> CliResult<SegmenterConfig> {
        let mut config = match &self.config {
            Some(path) => SegmenterConfig::from_file(path).with_context(|| {
                format!("Failed to load configuration from {}", path.display())
            })?,
            None => SegmenterConfig::default(),
        };

        if let Some(max_chars) = self.max_chars {
            config.max_chars = max_chars;
        }
        if let Some(max_cjk_chars) = self.max_cjk_chars {
            config.max_cjk_chars = max_cjk_chars;
        }
        if let Some(max_bytes) = self.max_bytes {
            config.max_bytes = max_bytes;
        }
        if self.no_system_rules {
            config.rules_dir = None;
        } else if let Some(dir) = &self.rules_dir {
            config.rules_dir = Some(dir.clone());
        }

        config
            .validate()
            .map_err(|e| CliError::ConfigError(e.to_string()))?;
        Ok(config)
    }

    fn read_inputs(&self) -> CliResult<Vec<(String, String)>> {
        if self.input.is_empty() {
            return Ok(vec![("<stdin>".to_string(), read_stdin()?)]);
        }

        self.input
            .iter()
            .map(|path| -> CliResult<(String, String)> {
                if path.as_os_str() == "-" {
                    return Ok(("<stdin>".to_string(), read_stdin()?));
                }
                Ok((path.display().to_string(), read_file(path)?))
            })
            .collect()
    }

    fn open_output(&self) -> CliResult<Box<dyn Write>> {
        match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create {}", path.display()))?;
                Ok(Box::new(BufWriter::new(file)))
            }
            None => Ok(Box::new(io::stdout().lock())),
        }
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        // Already installed when the command runs twice in one process
        let _ = env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(log_level),
        )
        .try_init();
    }
}

fn read_file(path: &Path) -> CliResult<String> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()).into());
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn read_stdin() -> CliResult<String> {
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read standard input")?;
    Ok(text)
}
