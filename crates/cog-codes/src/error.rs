//! Error types for reference data loading and code resolution.

use std::path::PathBuf;

use thiserror::Error;

use crate::dataset::Dataset;

/// Errors surfaced by resolution operations.
///
/// "Not found" and "ambiguous" are not errors: they are ordinary lookup
/// outcomes and are returned as values (`Option`, [`crate::CommuneMatch`]).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CogError {
    /// The reference file backing a table could not be loaded.
    ///
    /// Cached on first failure: the table stays unavailable for the
    /// lifetime of the context.
    #[error("reference data unavailable for {dataset} ({path}): {reason}")]
    DatasetUnavailable {
        dataset: Dataset,
        path: PathBuf,
        reason: String,
    },

    /// A departement hint did not resolve to any departement.
    #[error("unknown departement '{hint}'")]
    InvalidHint { hint: String },
}

/// Result type for resolution operations.
pub type Result<T> = std::result::Result<T, CogError>;

/// Errors raised while parsing a single reference file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DatasetError {
    /// Failed to read the file.
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the CSV content.
    #[error("failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A required column is absent from the header row.
    #[error("missing required column '{column}' in {path}")]
    MissingColumn { column: &'static str, path: PathBuf },

    /// A required field is blank on an indexed row.
    #[error("empty {column} value on line {line} of {path}")]
    EmptyField {
        column: &'static str,
        line: u64,
        path: PathBuf,
    },
}

impl DatasetError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }
}
