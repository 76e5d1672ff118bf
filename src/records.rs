//! Activity-record ingestion and daily-result row mapping.
//!
//! Activity records arrive as CSV with one row per entity-observation and a
//! `day` column assigning each row a 1-based day-of-year index. Assembled
//! daily results persist as flat CSV rows, one per (day, entity, kind)
//! observation, so prediction and aggregation can run as separate
//! invocations.

use std::collections::BTreeMap;
use std::fs::File;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domains::DomainSpec;
use crate::error::PipelineError;
use crate::pipeline::risk::RiskTier;
use crate::pipeline::types::{DailyResult, Observation};

/// One raw activity record: field name → raw value, as read from input.
pub type RawRecord = BTreeMap<String, String>;

/// All entity-observations recorded for one day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayRecords {
    /// 1-based day-of-year index.
    pub day: u32,
    pub records: Vec<RawRecord>,
}

/// Column carrying the day index in activity CSVs.
const DAY_COLUMN: &str = "day";

/// Reads activity records from a CSV file, grouping rows into days.
///
/// Headers must cover every schema field; missing columns fail with a
/// [`PipelineError::Schema`] naming them. Rows sharing a `day` value group
/// into one day regardless of file order. Without a `day` column each row
/// becomes its own day, numbered in file order.
pub fn read_activity_csv(path: &str, spec: &DomainSpec) -> Result<Vec<DayRecords>> {
    let file = File::open(path)?;
    let mut rdr = csv::Reader::from_reader(file);

    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();
    let missing: Vec<String> = spec
        .fields
        .iter()
        .filter(|f| !headers.iter().any(|h| h == f.name))
        .map(|f| f.name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(PipelineError::Schema { missing }.into());
    }
    let has_day_column = headers.iter().any(|h| h == DAY_COLUMN);

    let mut days: Vec<DayRecords> = Vec::new();
    for (row_index, result) in rdr.records().enumerate() {
        let row = result?;
        let record: RawRecord = headers
            .iter()
            .zip(row.iter())
            .map(|(h, v)| (h.clone(), v.to_string()))
            .collect();

        let day = if has_day_column {
            let raw = record.get(DAY_COLUMN).map(String::as_str).unwrap_or("");
            raw.trim()
                .parse::<u32>()
                .map_err(|_| PipelineError::BadNumericField {
                    field: DAY_COLUMN.to_string(),
                    value: raw.to_string(),
                })?
        } else {
            row_index as u32 + 1
        };

        match days.iter_mut().find(|d| d.day == day) {
            Some(existing) => existing.records.push(record),
            None => days.push(DayRecords {
                day,
                records: vec![record],
            }),
        }
    }

    debug!(path, days = days.len(), "Activity records read");
    Ok(days)
}

/// One persisted observation row: the flat CSV form of a [`DailyResult`].
#[derive(Debug, Serialize, Deserialize)]
pub struct DailyRow {
    pub day: u32,
    pub entity: String,
    pub kind: String,
    pub value: f64,
    pub risk_level: RiskTier,
}

/// Flattens daily results into persistable rows, one per observation.
pub fn rows_from_results(results: &[DailyResult]) -> Vec<DailyRow> {
    results
        .iter()
        .flat_map(|r| {
            r.observations.iter().map(|obs| DailyRow {
                day: r.day,
                entity: r.entity.clone(),
                kind: obs.kind.clone(),
                value: obs.value,
                risk_level: obs.tier,
            })
        })
        .collect()
}

/// Reads daily-result rows back from CSV, regrouping consecutive rows that
/// share a (day, entity) pair into one [`DailyResult`].
pub fn read_daily_results(path: &str) -> Result<Vec<DailyResult>> {
    let file = File::open(path)?;
    let mut rdr = csv::Reader::from_reader(file);

    let mut results: Vec<DailyResult> = Vec::new();
    for row in rdr.deserialize() {
        let row: DailyRow = row?;
        let obs = Observation {
            kind: row.kind,
            value: row.value,
            tier: row.risk_level,
        };
        match results.last_mut() {
            Some(last) if last.day == row.day && last.entity == row.entity => {
                last.observations.push(obs);
            }
            _ => results.push(DailyResult {
                day: row.day,
                entity: row.entity,
                observations: vec![obs],
            }),
        }
    }

    debug!(path, results = results.len(), "Daily results read");
    Ok(results)
}
