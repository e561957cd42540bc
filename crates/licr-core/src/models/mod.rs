//! Data models for receipt processing.

pub mod config;
pub mod metadata;
pub mod receipt;
