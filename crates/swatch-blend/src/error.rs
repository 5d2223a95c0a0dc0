//! Error types for swatch-blend.

use std::path::PathBuf;

use thiserror::Error;

/// Retrieval failures from a [`ColorCatalog`](crate::ColorCatalog) or
/// [`SampleStore`](crate::SampleStore).
///
/// Distinct from "no data": an empty tier is `Ok(vec![])`, an unknown color is
/// `Ok(None)`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backing store could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A row could not be turned into a domain record.
    #[error("malformed record: {0}")]
    Malformed(String),

    /// IO error while reading a fixture.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Fixture JSON could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Engine configuration problems.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A value parsed but is not usable.
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: &'static str, message: String },
}

/// Errors surfaced by the inference engine.
#[derive(Debug, Error)]
pub enum BlendError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
