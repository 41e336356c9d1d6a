use thiserror::Error;

#[derive(Error, Debug)]
pub enum NormalizerError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Column '{column}' not found in record {record_index}")]
    MissingColumn { column: String, record_index: usize },

    #[error("No numeric value column found: {0}")]
    NoNumericColumn(String),

    #[error("Cannot parse time value {value:?} in record {record_index}")]
    UnparseableTime { record_index: usize, value: String },

    #[error("Input contains no records")]
    EmptyDataset,

    #[error("Unknown detection method(s): {0}")]
    UnknownMethod(String),

    #[error("At least one detection method must be requested")]
    NoMethodsRequested,
}
