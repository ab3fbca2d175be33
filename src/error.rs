use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Could not read ledger file: {0}")]
    Parse(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Failed to save ledger to {path}: {source}")]
    Persist {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Calculation error: {0}")]
    Calc(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
