use thiserror::Error;

#[derive(Error, Debug)]
pub enum DetectorError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}
