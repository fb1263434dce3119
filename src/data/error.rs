use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Dataset error taxonomy
// ---------------------------------------------------------------------------

/// Everything that can go wrong between opening a transactions export and
/// producing the augmented table. All variants are fatal to the load: the
/// dashboard renders nothing until a clean file is supplied.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("cannot read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV")]
    Csv(#[from] csv::Error),

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("row {row}: {column} value '{value}' is not a number")]
    Number {
        row: usize,
        column: String,
        value: String,
    },

    #[error("row {row}: unparseable date '{value}'")]
    Date { row: usize, value: String },
}
