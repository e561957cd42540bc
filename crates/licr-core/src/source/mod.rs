//! Text sources: where the raw text of a document comes from.

mod command;
mod plain;

pub use command::CommandTextSource;
pub use plain::PlainTextSource;

use std::path::Path;

use tracing::info;

use crate::error::{LicrError, Result, SourceError};
use crate::models::config::SourceConfig;

/// Produces the full text content of a document.
pub trait TextSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Read the text of the document at `path`.
    fn read_text(&self, path: &Path) -> std::result::Result<String, SourceError>;
}

/// Build the configured text source.
///
/// Called once at startup. A source whose backing program is unavailable is
/// a configuration error; there is no fallback source.
pub fn resolve_text_source(config: &SourceConfig) -> Result<Box<dyn TextSource>> {
    let source: Box<dyn TextSource> = match config {
        SourceConfig::PlainText { max_bytes } => Box::new(PlainTextSource::new(*max_bytes)),
        SourceConfig::Command { program, args } => Box::new(
            CommandTextSource::resolve(program, args.clone())
                .map_err(|e| LicrError::Config(format!("text source unavailable: {}", e)))?,
        ),
    };

    info!("Using {} text source", source.name());
    Ok(source)
}
