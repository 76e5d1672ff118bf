//! Data types flowing through the prediction pipeline.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domains::Domain;
use crate::pipeline::risk::RiskTier;

/// One classified emission quantity for a record.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub kind: String,
    pub value: f64,
    pub tier: RiskTier,
}

/// Normalized result of one entity-observation on one day.
///
/// Produced by the assembler, consumed by the aggregator. `day` is the
/// 1-based day-of-year index.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyResult {
    pub day: u32,
    pub entity: String,
    pub observations: Vec<Observation>,
}

/// Aggregated statistics for one calendar month.
///
/// Maps are ordered so that serializing the same input twice is
/// byte-identical.
#[derive(Debug, Serialize, PartialEq)]
pub struct MonthSummary {
    pub month: &'static str,
    /// Distinct entity labels observed, sorted.
    pub entities: Vec<String>,
    /// Mean emission per quantity kind; 0.0 for kinds with no observations.
    pub average_emissions: BTreeMap<String, f64>,
    /// Per-kind risk tier distribution, two-decimal percentage strings.
    pub risk_levels: BTreeMap<String, BTreeMap<String, String>>,
}

/// Complete aggregation result for one domain, serialized as the report.
#[derive(Debug, Serialize)]
pub struct SummaryReport {
    pub schema_version: u8,
    pub domain: String,
    pub generated_at: DateTime<Utc>,
    pub months: Vec<MonthSummary>,
}

impl SummaryReport {
    pub fn new(domain: Domain, months: Vec<MonthSummary>) -> Self {
        SummaryReport {
            schema_version: 1,
            domain: domain.as_str().to_string(),
            generated_at: Utc::now(),
            months,
        }
    }
}
