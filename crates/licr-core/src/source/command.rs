//! External text extraction programs (e.g. `pdftotext`).

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, trace};
use which::which;

use super::TextSource;
use crate::error::SourceError;

/// Placeholder replaced by the document path in program arguments.
pub const INPUT_PLACEHOLDER: &str = "{input}";

/// Runs a program that prints a document's text on stdout.
#[derive(Debug, Clone)]
pub struct CommandTextSource {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandTextSource {
    /// Locate `program` (a path, or a name looked up on `PATH`).
    pub fn resolve(program: &str, args: Vec<String>) -> Result<Self, SourceError> {
        let explicit = Path::new(program);
        let program = if explicit.components().count() > 1 && explicit.exists() {
            explicit.to_path_buf()
        } else {
            which(program).map_err(|e| SourceError::ProgramNotFound(format!("{}: {}", program, e)))?
        };

        debug!("Resolved text extraction program {}", program.display());
        Ok(Self { program, args })
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments for one document, substituting or appending its path.
    fn args_for(&self, path: &Path) -> Vec<String> {
        let input = path.to_string_lossy();
        let mut args: Vec<String> = self
            .args
            .iter()
            .map(|a| a.replace(INPUT_PLACEHOLDER, &input))
            .collect();
        if !self.args.iter().any(|a| a.contains(INPUT_PLACEHOLDER)) {
            args.push(input.into_owned());
        }
        args
    }
}

impl TextSource for CommandTextSource {
    fn name(&self) -> &str {
        "command"
    }

    fn read_text(&self, path: &Path) -> Result<String, SourceError> {
        if !path.exists() {
            return Err(SourceError::NotFound(path.to_path_buf()));
        }

        let args = self.args_for(path);
        trace!("Running {} {:?}", self.program.display(), args);

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|e| SourceError::Unreadable {
                path: path.to_path_buf(),
                reason: format!("failed to run {}: {}", self.program.display(), e),
            })?;

        if !output.status.success() {
            return Err(SourceError::CommandFailed {
                program: self.program.display().to_string(),
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        if text.trim().is_empty() {
            return Err(SourceError::Empty(path.to_path_buf()));
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_args_placeholder() {
        let source = CommandTextSource {
            program: PathBuf::from("pdftotext"),
            args: vec!["-layout".into(), "{input}".into(), "-".into()],
        };
        assert_eq!(
            source.args_for(Path::new("/in/r.pdf")),
            vec!["-layout", "/in/r.pdf", "-"]
        );
    }

    #[test]
    fn test_args_appended_without_placeholder() {
        let source = CommandTextSource {
            program: PathBuf::from("cat"),
            args: vec!["-u".into()],
        };
        assert_eq!(source.args_for(Path::new("r.txt")), vec!["-u", "r.txt"]);
    }

    #[test]
    fn test_unknown_program() {
        let err = CommandTextSource::resolve("licr-no-such-extractor-program", Vec::new()).unwrap_err();
        assert!(matches!(err, SourceError::ProgramNotFound(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_runs_program() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("receipt.txt");
        std::fs::write(&path, "Receipt No 9").unwrap();

        let source = CommandTextSource::resolve("cat", Vec::new()).unwrap();
        assert_eq!(source.read_text(&path).unwrap(), "Receipt No 9");
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_program() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("receipt.txt");
        std::fs::write(&path, "x").unwrap();

        let source = CommandTextSource::resolve("false", Vec::new()).unwrap();
        let err = source.read_text(&path).unwrap_err();
        assert!(matches!(err, SourceError::CommandFailed { status: 1, .. }));
    }
}
