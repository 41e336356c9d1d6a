//! # Vigil Detectors
//!
//! The three statistical detection methods behind a common `Detector` trait.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** Pure statistics over one `Group` at a time. No
//!   knowledge of input parsing or report assembly.
//! - **Total on well-formed input:** A detector never fails. Insufficient
//!   data (a too-short group or window, a zero spread) is a silent skip,
//!   because sparse real-world data is expected, not a caller mistake.
//! - **Extensibility:** Adding a method means a new module implementing
//!   `Detector`, a new `Method` variant, and a new factory arm.
//!
//! ## Public API
//!
//! - `Detector`: the trait every method implements.
//! - `DetectorParams`: tuning knobs shared by all methods, with validation.
//! - `create_detector`: the factory constructing a detector for a `Method`.

pub mod error;
pub mod factory;
pub mod iqr;
pub mod moving_average;
pub mod standard_deviation;
pub mod stats;

// Re-export the key components to create a clean, public-facing API.
pub use error::DetectorError;
pub use factory::create_detector;
pub use iqr::IqrDetector;
pub use moving_average::MovingAverageDetector;
pub use standard_deviation::StandardDeviationDetector;

use core_types::{AnomalyPoint, Group, Method};
use serde::{Deserialize, Serialize};

/// The core trait every detection method implements.
///
/// A detector is a pure function of one group: it reads the group's
/// chronologically sorted points and returns the points it flags, in
/// chronological order. The `Send + Sync` bounds allow groups and methods to
/// be evaluated on separate threads, since no detector holds mutable state.
pub trait Detector: Send + Sync {
    /// The method this detector implements.
    fn method(&self) -> Method;

    /// Evaluates one group and returns every flagged point.
    fn detect(&self, group: &Group) -> Vec<AnomalyPoint>;
}

/// Tuning parameters shared by the detection methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorParams {
    /// Trailing window size for the moving-average method. Must be >= 2.
    pub window: usize,
    /// Z-score threshold for the moving-average and standard-deviation
    /// methods. Must be positive.
    pub threshold: f64,
    /// Bound multiplier for the IQR method. Must be positive.
    pub iqr_multiplier: f64,
}

impl Default for DetectorParams {
    fn default() -> Self {
        Self {
            window: 7,
            threshold: 2.0,
            iqr_multiplier: 1.5,
        }
    }
}

impl DetectorParams {
    /// Validates every parameter, regardless of which methods are requested,
    /// so a bad call fails before any detector runs.
    pub fn validate(&self) -> Result<(), DetectorError> {
        if self.window < 2 {
            return Err(DetectorError::InvalidParameter(format!(
                "window must be at least 2, got {}",
                self.window
            )));
        }
        if !(self.threshold.is_finite() && self.threshold > 0.0) {
            return Err(DetectorError::InvalidParameter(format!(
                "threshold must be a positive number, got {}",
                self.threshold
            )));
        }
        if !(self.iqr_multiplier.is_finite() && self.iqr_multiplier > 0.0) {
            return Err(DetectorError::InvalidParameter(format!(
                "iqr_multiplier must be a positive number, got {}",
                self.iqr_multiplier
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_are_valid() {
        assert!(DetectorParams::default().validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_params() {
        let mut params = DetectorParams::default();
        params.window = 1;
        assert!(params.validate().is_err());

        let mut params = DetectorParams::default();
        params.threshold = 0.0;
        assert!(params.validate().is_err());

        let mut params = DetectorParams::default();
        params.threshold = f64::NAN;
        assert!(params.validate().is_err());

        let mut params = DetectorParams::default();
        params.iqr_multiplier = -1.5;
        assert!(params.validate().is_err());
    }
}
