//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// JSON formatter - outputs fragments as JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    fragments: Vec<FragmentData>,
}

/// Data structure for JSON output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentData {
    /// Position in the output sequence
    pub index: usize,
    /// The fragment text
    pub text: String,
    /// Length in characters
    pub chars: usize,
    /// Length in UTF-8 bytes
    pub bytes: usize,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            fragments: Vec::new(),
        }
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputFormatter for JsonFormatter<W> {
    fn format_fragment(&mut self, fragment: &str, index: usize) -> Result<()> {
        self.fragments.push(FragmentData {
            index,
            text: fragment.to_string(),
            chars: fragment.chars().count(),
            bytes: fragment.len(),
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.fragments)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_lengths() {
        let mut formatter = JsonFormatter::new(Vec::new());
        formatter.format_fragment("Dr.", 0).unwrap();
        formatter.format_fragment("こんにちは。", 1).unwrap();
        formatter.finish().unwrap();

        let output = formatter.into_inner();
        let parsed: Vec<FragmentData> = serde_json::from_slice(&output).unwrap();
        assert_eq!(
            parsed,
            vec![
                FragmentData {
                    index: 0,
                    text: "Dr.".to_string(),
                    chars: 3,
                    bytes: 3,
                },
                FragmentData {
                    index: 1,
                    text: "こんにちは。".to_string(),
                    chars: 6,
                    bytes: 18,
                },
            ]
        );
    }

    #[test]
    fn test_empty_output_is_empty_array() {
        let mut formatter = JsonFormatter::new(Vec::new());
        formatter.finish().unwrap();
        assert_eq!(String::from_utf8(formatter.into_inner()).unwrap(), "[]\n");
    }
}
