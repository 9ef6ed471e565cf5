use thiserror::Error;

/// Errors raised while assembling or exporting a relation document.
///
/// Every variant is fatal to the current export attempt: nothing is retried
/// and no partial output is produced, so callers correct the inputs and run
/// the export again from scratch.
#[derive(Debug, Error)]
pub enum Error {
    #[error("row count mismatch: expected {expected} rows, got {actual}")]
    RowCountMismatch { expected: usize, actual: usize },

    #[error("attribute '{0}' is not registered")]
    UnknownAttribute(String),

    #[error("column index {index} out of range for row of width {width}")]
    ColumnIndexOutOfRange { index: usize, width: usize },

    #[error("no data for attribute '{attribute}' at row {row}")]
    MissingRowData { attribute: String, row: usize },

    #[error("failed to read delimited source: {0}")]
    SourceRead(#[from] csv::Error),

    #[error("query execution failed: {0}")]
    QueryExecution(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("failed to write document: {0}")]
    Write(#[source] std::io::Error),
}
