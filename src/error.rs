//! Error types for the translation engine.
//!
//! The engine distinguishes recoverable conditions (a missing document) from
//! fatal ones (unreadable manifest, I/O failure after a file was found) by
//! variant, so the batch applier can decide per case whether to continue.

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatchError {
    /// The module manifest does not exist. Fatal: nothing can run without it.
    #[error("manifest not found: {}", path.display())]
    ConfigMissing { path: PathBuf },

    /// A translation document referenced by the manifest does not exist.
    #[error("translation document not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// A manifest or document is not well-formed JSON of the expected shape.
    #[error("failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Reading or writing a file failed after it was found to exist.
    #[error("I/O error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The combined matcher for snapshot mode could not be built.
    #[error("failed to build replacement matcher")]
    Pattern(#[from] regex::Error),
}

impl PatchError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for conditions the batch applier skips over instead of aborting.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type Result<T, E = PatchError> = std::result::Result<T, E>;
