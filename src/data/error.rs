use std::path::{Path, PathBuf};

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised by the catalog pipeline.
///
/// Per-row parse failures (dates, durations) are not errors: they become
/// nulls and are counted in [`CleanReport`](super::clean::CleanReport).
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The input file is missing, unreadable or structurally broken.
    #[error("cannot read catalog {}", path.display())]
    DataSource {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    /// A row lacks a value every title must have.
    #[error("{}: row {row}: {reason}", path.display())]
    Malformed {
        path: PathBuf,
        row: usize,
        reason: String,
    },

    #[error("missing required column(s): {}", missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("cannot write catalog {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),
}

impl CatalogError {
    pub(crate) fn data_source(path: &Path, source: impl Into<BoxError>) -> Self {
        CatalogError::DataSource {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }

    pub(crate) fn write(path: &Path, source: impl Into<BoxError>) -> Self {
        CatalogError::Write {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }
}
