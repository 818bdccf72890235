//! Output formatting module

use anyhow::Result;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format and output a single fragment
    fn format_fragment(&mut self, fragment: &str, index: usize) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod text;

pub use json::{FragmentData, JsonFormatter};
pub use text::TextFormatter;
