//! Error type shared by the extraction pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias for pdb2res operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while extracting residues from a structure file.
///
/// Unknown residue codes are not represented here: they are filtered out
/// during scanning and never surface as failures.
#[derive(Debug, Error)]
pub enum Error {
    /// The input could not be opened, mapped, or decompressed.
    #[error("failed to open {}: {source}", .path.display())]
    SourceOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A fixed-column field of an ATOM record could not be interpreted.
    #[error("malformed {field} field {text:?} on line {line}")]
    RecordParse {
        /// One-based line number within the decompressed file.
        line: usize,
        /// Name of the offending column group (e.g. `"resSeq"`, `"x"`).
        field: &'static str,
        /// Raw text found at the field's offset.
        text: String,
    },

    /// Failure on the output sink or while reading the path list.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl Error {
    pub(crate) fn source_open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::SourceOpen {
            path: path.into(),
            source,
        }
    }
}
