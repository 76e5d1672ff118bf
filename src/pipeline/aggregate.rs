//! Monthly roll-up of daily prediction results.
//!
//! A single pass folds every [`DailyResult`] into its month's accumulator,
//! then emits one [`MonthSummary`] per canonical month in calendar order,
//! sparse months included. The fold is order-independent and carries no
//! state between calls.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{info, warn};

use crate::error::PipelineError;
use crate::pipeline::calendar::{DayPartition, MONTH_NAMES};
use crate::pipeline::risk::RiskTier;
use crate::pipeline::types::{DailyResult, MonthSummary};
use crate::pipeline::utility::{mean, pct};

/// What to do with a day index that falls outside every month range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GapPolicy {
    /// Skip the record, with a warning.
    #[default]
    Drop,
    /// Abort the aggregation naming the day.
    Error,
}

#[derive(Default)]
struct MonthAccumulator {
    emissions: BTreeMap<String, Vec<f64>>,
    tier_counts: BTreeMap<String, BTreeMap<RiskTier, usize>>,
    entities: BTreeSet<String>,
}

/// Aggregates daily results into one summary per calendar month.
///
/// `kinds` is the domain's quantity-kind universe: every kind appears in
/// every month's mean map, 0.0 when the month has no observations of it.
/// Risk distributions are percentages of that month's observations per
/// kind, formatted to two decimals.
pub fn aggregate(
    results: &[DailyResult],
    partition: &DayPartition,
    kinds: &[&str],
    gap_policy: GapPolicy,
) -> Result<Vec<MonthSummary>, PipelineError> {
    let mut months: [MonthAccumulator; 12] = Default::default();
    let mut dropped = 0usize;

    for result in results {
        let Some(m) = partition.month_of(result.day) else {
            match gap_policy {
                GapPolicy::Drop => {
                    warn!(day = result.day, "day index outside every month range, dropping");
                    dropped += 1;
                    continue;
                }
                GapPolicy::Error => {
                    return Err(PipelineError::AggregationGap { day: result.day });
                }
            }
        };

        let acc = &mut months[m];
        acc.entities.insert(result.entity.clone());
        for obs in &result.observations {
            acc.emissions
                .entry(obs.kind.clone())
                .or_default()
                .push(obs.value);
            *acc.tier_counts
                .entry(obs.kind.clone())
                .or_default()
                .entry(obs.tier)
                .or_insert(0) += 1;
        }
    }

    let summaries = months
        .iter()
        .zip(MONTH_NAMES)
        .map(|(acc, month)| summarize(acc, month, kinds))
        .collect();

    info!(records = results.len(), dropped, "Monthly aggregation complete");
    Ok(summaries)
}

fn summarize(acc: &MonthAccumulator, month: &'static str, kinds: &[&str]) -> MonthSummary {
    let average_emissions = kinds
        .iter()
        .map(|kind| {
            let values = acc.emissions.get(*kind).map_or(&[][..], Vec::as_slice);
            (kind.to_string(), mean(values))
        })
        .collect();

    let risk_levels = acc
        .tier_counts
        .iter()
        .map(|(kind, counts)| {
            let total: usize = counts.values().sum();
            let dist: BTreeMap<String, String> = counts
                .iter()
                .map(|(tier, n)| {
                    (tier.as_str().to_string(), format!("{:.2}%", pct(*n, total)))
                })
                .collect();
            (kind.clone(), dist)
        })
        .collect();

    MonthSummary {
        month,
        entities: acc.entities.iter().cloned().collect(),
        average_emissions,
        risk_levels,
    }
}
