//! # Vigil Core Types
//!
//! The shared vocabulary of the Vigil anomaly detection system. Every other
//! crate depends on this one and nothing else at its layer.
//!
//! ## Architectural Principles
//!
//! - **Layer 0:** Pure data. No I/O, no statistics, no validation logic.
//! - **Immutability:** A `Dataset`, a `Group`, and every report entity are
//!   constructed once and never mutated by downstream components.
//!
//! ## Public API
//!
//! - `Method`: identifies one of the three detection methods.
//! - `Dataset` / `Row` / `Group` / `GroupPoint`: the normalized input shapes.
//! - `AnomalyPoint`, `Baseline`, `MethodSummary`, `CombinedPoint`,
//!   `CombinedSummary`, `Report`: the output shapes.

pub mod dataset;
pub mod method;
pub mod report;

// Re-export the core types to provide a clean public API.
pub use dataset::{Dataset, Group, GroupKey, GroupPoint, Record, Row};
pub use method::Method;
pub use report::{
    AnomalyPoint, Baseline, CombinedPoint, CombinedSummary, MethodSummary, Report,
};
