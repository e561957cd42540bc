//! Upload metadata accompanying a receipt.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LicrError, Result};

/// Metadata written next to an uploaded receipt (`metadata.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptMetadata {
    /// Financial year label to validate against, e.g. `2023-24`.
    pub financial_year: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_timestamp: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_filename: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
}

impl ReceiptMetadata {
    pub fn new(financial_year: impl Into<String>) -> Self {
        Self {
            financial_year: financial_year.into(),
            upload_timestamp: None,
            original_filename: None,
            file_size: None,
        }
    }

    /// Load metadata from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| LicrError::Metadata(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| LicrError::Metadata(format!("{}: {}", path.display(), e)))
    }
}
