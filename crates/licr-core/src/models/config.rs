//! Configuration structures for the receipt pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{LicrError, Result};

/// Main configuration for licr.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LicrConfig {
    /// Where document text comes from.
    pub source: SourceConfig,

    /// Document classification configuration.
    pub classification: ClassificationConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,
}

/// Text source selection.
///
/// Resolved once at startup by [`crate::source::resolve_text_source`]; a
/// source that cannot be resolved is a configuration error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceConfig {
    /// Read documents that are already UTF-8 text.
    PlainText {
        /// Documents larger than this are rejected as unreadable.
        #[serde(default = "default_max_bytes")]
        max_bytes: u64,
    },

    /// Run an external program that prints the document text on stdout.
    Command {
        /// Program name (looked up on `PATH`) or path.
        program: String,

        /// Arguments; `{input}` is replaced by the document path, which is
        /// appended when no placeholder is present.
        #[serde(default)]
        args: Vec<String>,
    },
}

fn default_max_bytes() -> u64 {
    16 * 1024 * 1024
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::PlainText {
            max_bytes: default_max_bytes(),
        }
    }
}

/// Document classification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationConfig {
    /// Distinct marker phrases required to classify as an LIC receipt.
    pub min_marker_matches: usize,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            min_marker_matches: 3,
        }
    }
}

/// How to read an all-numeric date such as `05/06/2023`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateOrder {
    /// `05/06/2023` is 5 June 2023.
    #[default]
    DayFirst,
    /// `05/06/2023` is 6 May 2023.
    MonthFirst,
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Preferred reading of ambiguous numeric dates.
    pub date_order: DateOrder,

    /// Characters of raw text kept in the report excerpt.
    pub excerpt_chars: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            date_order: DateOrder::DayFirst,
            excerpt_chars: 500,
        }
    }
}

impl LicrConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| LicrError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
