//! # Vigil Detection Engine
//!
//! The single public operation of the system: `detect` takes raw records and
//! produces an anomaly `Report`. Orchestrates the normalizer, the grouper,
//! the detectors, and the result combiner.
//!
//! ## Architectural Principles
//!
//! - **Layer 2 Orchestration:** No statistics of its own; it wires the
//!   Layer 1 crates together in strict forward order.
//! - **Validate, then compute:** Every error the engine can raise is raised
//!   before the first detector runs. Detectors are total on well-formed input.
//! - **Stateless and deterministic:** Nothing persists between invocations;
//!   identical arguments produce byte-identical serialized reports.

pub mod combiner;
pub mod error;
pub mod grouper;

pub use error::EngineError;
pub use normalizer::DataInput;

use core_types::Report;
use detectors::DetectorParams;

/// One full detection request, as the caller hands it over.
#[derive(Debug, Clone)]
pub struct DetectRequest {
    /// Raw records: a JSON-encoded array or already-parsed records.
    pub data: DataInput,
    /// Name of the field holding each record's timestamp.
    pub time_field: String,
    /// Numeric field to analyze; auto-detected when `None`.
    pub value_field: Option<String>,
    /// Field to partition records by; a single implicit group when `None`.
    pub group_field: Option<String>,
    /// Requested method names; must be non-empty.
    pub methods: Vec<String>,
    /// Detector tuning parameters.
    pub params: DetectorParams,
}

/// Runs the full detection pipeline and returns the anomaly report.
///
/// # Errors
///
/// Returns an `EngineError` for any validation failure: malformed input,
/// missing or non-numeric columns, unparseable timestamps, an empty dataset,
/// unknown method names, or out-of-range parameters. Once validation passes
/// the pipeline cannot fail.
pub fn detect(request: &DetectRequest) -> Result<Report, EngineError> {
    // 1. Validate parameters before touching the data.
    request.params.validate()?;

    // 2. Normalize: parse, validate, and coerce into the canonical dataset.
    let normalized = normalizer::normalize(
        &request.data,
        &request.time_field,
        request.value_field.as_deref(),
        request.group_field.as_deref(),
        &request.methods,
    )?;

    // 3. Group: partition into independent chronological groups.
    let groups = grouper::split(&normalized.dataset);
    tracing::info!(
        records = normalized.dataset.len(),
        groups = groups.len(),
        methods = normalized.methods.len(),
        "running detection"
    );

    // 4. Detect and combine into the final report.
    Ok(combiner::combine(&normalized, &groups, &request.params))
}
