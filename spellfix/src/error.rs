//! Error types surfaced at the crate boundary.

use std::path::{Path, PathBuf};

/// Errors that can occur while building or querying a correction engine.
///
/// Per-row problems in a dictionary file are not errors; they are skipped
/// and tallied in the build stats. A failed build leaves the previously
/// published snapshot in place.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SpellfixError {
    /// An operation ran before any snapshot was published
    #[error("no dictionary loaded")]
    NotLoaded,

    /// A caller-supplied argument is outside the accepted domain
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A dictionary or protected-terms path could not be read
    #[error("cannot read {}", path.display())]
    Io {
        /// the path that failed to read
        path: PathBuf,
        /// the underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A supplied regex failed to compile
    #[error("malformed pattern {pattern:?}")]
    MalformedPattern {
        /// source text of the offending pattern
        pattern: String,
        /// the underlying regex error
        #[source]
        source: regex::Error,
    },

    /// A broken internal invariant; signals a bug, never expected to fire
    #[error("internal invariant violated: {0}")]
    InternalInvariant(&'static str),
}

impl SpellfixError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        SpellfixError::Io {
            path: path.to_owned(),
            source,
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        SpellfixError::InvalidArgument(message.into())
    }
}
