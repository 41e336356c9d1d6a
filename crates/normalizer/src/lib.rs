//! # Vigil Input Normalizer
//!
//! Turns raw caller input into a validated, canonical `Dataset`. This is the
//! only place the engine validates anything: every error in the taxonomy is
//! raised here (or by parameter validation) before any detector runs.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** Pure validation and coercion. Depends only on
//!   `core-types`. No side effects.
//! - **Fail fast, fail precisely:** Every error carries the field name or
//!   record index needed for a precise user-facing message.

pub mod error;
pub mod time;

pub use error::NormalizerError;

use core_types::{Dataset, Method, Record, Row};
use serde_json::Value;

/// Raw input as the caller hands it over: either a JSON-encoded array of
/// records, or records that were already parsed upstream.
#[derive(Debug, Clone)]
pub enum DataInput {
    Text(String),
    Records(Vec<Record>),
}

/// The normalizer's output: the canonical dataset plus the resolved field
/// names and the parsed method set.
#[derive(Debug, Clone)]
pub struct Normalized {
    pub dataset: Dataset,
    pub time_field: String,
    pub value_field: String,
    pub group_field: Option<String>,
    /// Requested methods, deduplicated, in request order.
    pub methods: Vec<Method>,
}

/// Validates and normalizes raw input into a `Dataset`.
///
/// # Arguments
///
/// * `data` - The raw records, textual or already parsed.
/// * `time_field` - Name of the field holding the record's timestamp.
/// * `value_field` - Name of the numeric field to analyze. When `None`, the
///   first field whose values are numeric in every record is selected,
///   scanning the first record's fields in their original order and skipping
///   the time and grouping fields.
/// * `group_field` - Optional name of the field to partition by.
/// * `methods` - Requested method names; must be non-empty and drawn from
///   `moving_average`, `standard_deviation`, `iqr`.
pub fn normalize(
    data: &DataInput,
    time_field: &str,
    value_field: Option<&str>,
    group_field: Option<&str>,
    methods: &[String],
) -> Result<Normalized, NormalizerError> {
    let methods = resolve_methods(methods)?;

    let parsed;
    let records: &[Record] = match data {
        DataInput::Text(text) => {
            parsed = parse_text(text)?;
            &parsed
        }
        DataInput::Records(records) => records.as_slice(),
    };

    if records.is_empty() {
        return Err(NormalizerError::EmptyDataset);
    }

    // Coerce timestamps and group keys first, so structural problems are
    // reported with the first offending record.
    let mut timestamps = Vec::with_capacity(records.len());
    let mut group_keys = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let raw_time = record
            .get(time_field)
            .ok_or_else(|| NormalizerError::MissingColumn {
                column: time_field.to_string(),
                record_index: index,
            })?;
        let timestamp = time::coerce_timestamp(raw_time).ok_or_else(|| {
            NormalizerError::UnparseableTime {
                record_index: index,
                value: render_scalar(raw_time),
            }
        })?;
        timestamps.push(timestamp);

        let key = match group_field {
            Some(field) => {
                let raw = record
                    .get(field)
                    .ok_or_else(|| NormalizerError::MissingColumn {
                        column: field.to_string(),
                        record_index: index,
                    })?;
                Some(render_scalar(raw))
            }
            None => None,
        };
        group_keys.push(key);
    }

    let value_field = resolve_value_field(records, time_field, value_field, group_field)?;
    tracing::debug!(
        records = records.len(),
        value_field = %value_field,
        "input normalized"
    );

    let mut rows = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        // Presence and numericness were established by resolve_value_field.
        let value = record
            .get(&value_field)
            .and_then(Value::as_f64)
            .ok_or_else(|| NormalizerError::MissingColumn {
                column: value_field.clone(),
                record_index: index,
            })?;
        rows.push(Row {
            index,
            timestamp: timestamps[index],
            group: group_keys[index].clone(),
            value,
        });
    }

    Ok(Normalized {
        dataset: Dataset::new(rows),
        time_field: time_field.to_string(),
        value_field,
        group_field: group_field.map(str::to_string),
        methods,
    })
}

/// Parses, deduplicates, and order-preserves the requested method names.
fn resolve_methods(names: &[String]) -> Result<Vec<Method>, NormalizerError> {
    if names.is_empty() {
        return Err(NormalizerError::NoMethodsRequested);
    }

    let mut methods = Vec::new();
    let mut unknown = Vec::new();
    for name in names {
        match name.parse::<Method>() {
            Ok(method) => {
                if !methods.contains(&method) {
                    methods.push(method);
                }
            }
            Err(()) => unknown.push(name.as_str()),
        }
    }
    if !unknown.is_empty() {
        return Err(NormalizerError::UnknownMethod(unknown.join(", ")));
    }
    Ok(methods)
}

/// Parses the textual encoding into an array of uniform-shaped records.
fn parse_text(text: &str) -> Result<Vec<Record>, NormalizerError> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| NormalizerError::MalformedInput(e.to_string()))?;
    let Value::Array(items) = value else {
        return Err(NormalizerError::MalformedInput(
            "top-level JSON value must be an array of records".to_string(),
        ));
    };

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match item {
            Value::Object(record) => records.push(record),
            other => {
                return Err(NormalizerError::MalformedInput(format!(
                    "record {index} is not an object: {other}"
                )));
            }
        }
    }
    Ok(records)
}

/// Resolves the value column, either by validating the named one or by
/// scanning for the first field that is numeric in every record.
fn resolve_value_field(
    records: &[Record],
    time_field: &str,
    value_field: Option<&str>,
    group_field: Option<&str>,
) -> Result<String, NormalizerError> {
    if let Some(name) = value_field {
        for (index, record) in records.iter().enumerate() {
            let raw = record
                .get(name)
                .ok_or_else(|| NormalizerError::MissingColumn {
                    column: name.to_string(),
                    record_index: index,
                })?;
            if raw.as_f64().is_none() {
                return Err(NormalizerError::NoNumericColumn(format!(
                    "column '{name}' has a non-numeric value in record {index}"
                )));
            }
        }
        return Ok(name.to_string());
    }

    // Auto-detection: scan the first record's fields in original order.
    let candidates = records[0]
        .keys()
        .filter(|name| name.as_str() != time_field && Some(name.as_str()) != group_field);
    for candidate in candidates {
        let all_numeric = records
            .iter()
            .all(|record| record.get(candidate).is_some_and(|v| v.as_f64().is_some()));
        if all_numeric {
            tracing::debug!(column = %candidate, "auto-detected value column");
            return Ok(candidate.clone());
        }
    }
    Err(NormalizerError::NoNumericColumn(
        "no column holds a numeric value in every record".to_string(),
    ))
}

/// Renders a JSON scalar for use as a group key or in an error message.
fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
