//! Error types for dataset generation

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    /// Batch configuration rejected before any output is produced.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A material texture or other required asset could not be found.
    #[error("Resource unavailable: {resource}")]
    ResourceUnavailable { resource: PathBuf },

    /// An asset exists but could not be decoded.
    #[error("Failed to load asset {path}: {source}")]
    Asset {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// An image could not be encoded or written.
    #[error("Failed to write image {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scene error: {0}")]
    Scene(String),

    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),
}
