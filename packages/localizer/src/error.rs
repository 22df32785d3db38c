/*
 * Error types for the localizer library
 */

//! Library-wide error and result types

use thiserror::Error;

/// Errors produced while extracting or localizing template files.
#[derive(Debug, Error)]
pub enum LocalizerError {
    /// File could not be read or written.
    #[error("i/o error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Project or resource file could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// A resource was missing a field required for lookup.
    #[error("invalid resource: {0}")]
    Resource(String),
}

pub type Result<T> = std::result::Result<T, LocalizerError>;

impl LocalizerError {
    /// Wrap an i/o error with the path it occurred on.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        LocalizerError::Io {
            path: path.into(),
            source,
        }
    }
}
