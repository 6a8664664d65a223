use arrow::datatypes::DataType;
use arrow::error::ArrowError;
use thiserror::Error;

/// Ways a listing file can fail to load.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("missing required column '{column}' (accepted names: {accepted})")]
    MissingColumn {
        column: &'static str,
        accepted: String,
    },

    #[error("row {row}: price '{value}' is not a number")]
    InvalidPrice { row: usize, value: String },

    #[error("column '{column}' of type {data_type} cannot be read")]
    UnreadableColumn {
        column: &'static str,
        data_type: DataType,
        #[source]
        source: ArrowError,
    },

    #[error("expected a top-level JSON array of records")]
    NotAnArray,

    #[error("row {row} is not a JSON object")]
    NotAnObject { row: usize },
}
