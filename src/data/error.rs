use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why a dataset could not be loaded.  Fatal to the session: nothing is
/// rendered from a dataset that failed to load.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("input is not valid {0}")]
    Encoding(&'static str),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("duplicate column '{0}' in header")]
    DuplicateColumn(String),

    #[error("line {line}: column '{column}' has non-numeric value '{value}'")]
    InvalidNumber {
        line: u64,
        column: &'static str,
        value: String,
    },
}
