use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Input validation failed: {0}")]
    Normalize(#[from] normalizer::NormalizerError),

    #[error("Detector configuration error: {0}")]
    Detector(#[from] detectors::DetectorError),
}
