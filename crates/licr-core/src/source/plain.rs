//! UTF-8 text files.

use std::fs;
use std::path::Path;

use tracing::debug;

use super::TextSource;
use crate::error::SourceError;

/// Reads documents that are already plain UTF-8 text.
#[derive(Debug, Clone)]
pub struct PlainTextSource {
    max_bytes: u64,
}

impl PlainTextSource {
    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }
}

impl TextSource for PlainTextSource {
    fn name(&self) -> &str {
        "plain-text"
    }

    fn read_text(&self, path: &Path) -> Result<String, SourceError> {
        let unreadable = |reason: String| SourceError::Unreadable {
            path: path.to_path_buf(),
            reason,
        };

        if !path.exists() {
            return Err(SourceError::NotFound(path.to_path_buf()));
        }

        let size = fs::metadata(path).map_err(|e| unreadable(e.to_string()))?.len();
        if size > self.max_bytes {
            return Err(unreadable(format!(
                "{} bytes exceeds the {} byte limit",
                size, self.max_bytes
            )));
        }

        let bytes = fs::read(path).map_err(|e| unreadable(e.to_string()))?;
        let text = String::from_utf8(bytes)
            .map_err(|e| unreadable(format!("not UTF-8 text: {}", e)))?;

        if text.trim().is_empty() {
            return Err(SourceError::Empty(path.to_path_buf()));
        }

        debug!("Read {} characters from {}", text.chars().count(), path.display());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_reads_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("receipt.txt");
        fs::write(&path, "Premium Paid: ₹ 1,000").unwrap();

        let text = PlainTextSource::new(1024).read_text(&path).unwrap();
        assert_eq!(text, "Premium Paid: ₹ 1,000");
    }

    #[test]
    fn test_missing_file() {
        let err = PlainTextSource::new(1024)
            .read_text(Path::new("/nonexistent/receipt.txt"))
            .unwrap_err();
        assert!(matches!(err, SourceError::NotFound(_)));
    }

    #[test]
    fn test_binary_file_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("receipt.pdf");
        fs::write(&path, [0x25, 0x50, 0x44, 0x46, 0xff, 0xfe, 0x00]).unwrap();

        let err = PlainTextSource::new(1024).read_text(&path).unwrap_err();
        assert!(matches!(err, SourceError::Unreadable { .. }));
    }

    #[test]
    fn test_size_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.txt");
        fs::write(&path, "a".repeat(64)).unwrap();

        let err = PlainTextSource::new(16).read_text(&path).unwrap_err();
        assert!(matches!(err, SourceError::Unreadable { .. }));
    }

    #[test]
    fn test_blank_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blank.txt");
        fs::write(&path, "  \n\n ").unwrap();

        let err = PlainTextSource::new(1024).read_text(&path).unwrap_err();
        assert!(matches!(err, SourceError::Empty(_)));
    }
}
