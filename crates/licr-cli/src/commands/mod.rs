//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod process;
pub mod validate;

use std::path::{Path, PathBuf};

use licr_core::models::metadata::ReceiptMetadata;
use licr_core::receipt::is_well_formed_label;
use licr_core::LicrConfig;

/// Load the explicit config file, else the user config file if present,
/// else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<LicrConfig> {
    if let Some(path) = config_path {
        return Ok(LicrConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        Ok(LicrConfig::from_file(&default_path)?)
    } else {
        Ok(LicrConfig::default())
    }
}

/// Financial year from `--financial-year` or a metadata file, shape-checked
/// the way the upload endpoint does.
pub fn resolve_financial_year(
    financial_year: Option<String>,
    metadata: Option<&PathBuf>,
) -> anyhow::Result<Option<String>> {
    let financial_year = match (financial_year, metadata) {
        (Some(fy), _) => Some(fy),
        (None, Some(path)) => Some(ReceiptMetadata::from_file(path)?.financial_year),
        (None, None) => None,
    };

    if let Some(fy) = &financial_year {
        if !is_well_formed_label(fy) {
            anyhow::bail!("Financial year must be in format YYYY-YY, got {:?}", fy);
        }
    }

    Ok(financial_year)
}
