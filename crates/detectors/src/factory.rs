use crate::iqr::IqrDetector;
use crate::moving_average::MovingAverageDetector;
use crate::standard_deviation::StandardDeviationDetector;
use crate::{Detector, DetectorParams};
use core_types::Method;

/// Creates a detector instance for the given method.
///
/// Callers validate `params` up front via `DetectorParams::validate`; the
/// compiler forces a new arm here whenever a `Method` variant is added.
pub fn create_detector(method: Method, params: &DetectorParams) -> Box<dyn Detector> {
    match method {
        Method::MovingAverage => {
            Box::new(MovingAverageDetector::new(params.window, params.threshold))
        }
        Method::StandardDeviation => {
            Box::new(StandardDeviationDetector::new(params.threshold))
        }
        Method::Iqr => Box::new(IqrDetector::new(params.iqr_multiplier)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_covers_every_method() {
        let params = DetectorParams::default();
        for method in Method::ALL {
            assert_eq!(create_detector(method, &params).method(), method);
        }
    }
}
