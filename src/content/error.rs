//! Content loading errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or parsing content files
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("{kind} not found: {slug}")]
    NotFound { kind: &'static str, slug: String },

    #[error("Invalid slug: {0:?}")]
    InvalidSlug(String),

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unterminated front-matter in {path:?}")]
    UnterminatedFrontMatter { path: PathBuf },

    #[error("Malformed front-matter in {path:?}: {source}")]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Malformed price list {path:?}: {source}")]
    PriceList {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid date in {path:?}: {field} = {value:?}")]
    InvalidDate {
        path: PathBuf,
        field: &'static str,
        value: String,
    },
}

impl ContentError {
    /// Whether the error means "no such document" rather than a broken one
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::InvalidSlug(_))
    }
}
