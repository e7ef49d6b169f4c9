//! Summary statistics over decoded trace streams.
//!
//! This crate provides:
//! - Per-event-type counts of records, arguments and payload bytes
//! - Text and JSON reports of those counts
//!
//! It does not interpret event arguments; timelines and durations are out of
//! its scope.

pub mod analyzer;
pub mod metrics;
pub mod report;

pub use analyzer::Analyzer;
pub use metrics::{Metrics, TypeMetrics};
pub use report::Report;
