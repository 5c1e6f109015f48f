// SPDX-License-Identifier: MIT OR Apache-2.0
//! Errors raised while loading timeline data.

use std::path::PathBuf;

/// Errors from loading or saving beatmaps and styles
#[derive(Debug, thiserror::Error)]
pub enum TimelineError {
    /// RON parse error
    #[error("Failed to parse RON: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// RON serialization error
    #[error("Failed to serialize RON: {0}")]
    Serialize(#[from] ron::Error),

    /// IO error with the file involved
    #[error("IO error on {path:?}: {source}")]
    Io {
        /// File being read or written
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },
}

/// Result type for timeline operations
pub type Result<T> = std::result::Result<T, TimelineError>;

/// Read a RON file into a deserializable type
pub(crate) fn read_ron<T: serde::de::DeserializeOwned>(path: &std::path::Path) -> Result<T> {
    let text = std::fs::read_to_string(path).map_err(|source| TimelineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(ron::from_str(&text)?)
}

/// Write a serializable type as pretty RON
pub(crate) fn write_ron<T: serde::Serialize>(path: &std::path::Path, value: &T) -> Result<()> {
    let text = ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::default())?;
    std::fs::write(path, text).map_err(|source| TimelineError::Io {
        path: path.to_path_buf(),
        source,
    })
}
