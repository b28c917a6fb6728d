use thiserror::Error;

/// Failures while turning a transaction export into `Transaction` records.
///
/// Any of these aborts the run before matching starts; there is no partial load.
/// `line` is the 1-based line in the source, header included.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: missing required field '{field}'")]
    MissingField { line: u64, field: &'static str },

    #[error("line {line}: quantity '{value}' is not an integer")]
    InvalidQuantity { line: u64, value: String },

    #[error("line {line}: cannot decode {field} '{value}'")]
    InvalidMoney {
        line: u64,
        field: &'static str,
        value: String,
    },

    #[error("invalid record: {0}")]
    InvalidRecord(String),
}

pub type Result<T> = std::result::Result<T, LoadError>;
