//! Error taxonomy for the emission pipeline.
//!
//! Record-scoped failures carry the day index and entity label of the
//! offending record; aggregation-scoped failures abort the whole call.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Required input fields were absent from a record.
    #[error("missing required fields: {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    /// A numeric field held a value that does not parse as a number.
    #[error("field '{field}' is not numeric: '{value}'")]
    BadNumericField { field: String, value: String },

    /// The predictor could not score a record.
    #[error("prediction failed: {0}")]
    Prediction(String),

    /// A record-scoped failure tagged with where it happened.
    #[error("day {day}, entity '{entity}': {source}")]
    Record {
        day: u32,
        entity: String,
        #[source]
        source: Box<PipelineError>,
    },

    /// A day index outside every month range, under [`GapPolicy::Error`].
    ///
    /// [`GapPolicy::Error`]: crate::pipeline::aggregate::GapPolicy
    #[error("day index {day} falls outside every month range")]
    AggregationGap { day: u32 },

    /// A fitted artifact failed to load or validate.
    #[error("artifact '{name}': {reason}")]
    Artifact { name: String, reason: String },

    /// The day-range partition table is malformed.
    #[error("invalid day partition: {0}")]
    InvalidPartition(String),
}

impl PipelineError {
    /// Wraps an error with the day index and entity label it belongs to.
    pub fn for_record(self, day: u32, entity: &str) -> Self {
        PipelineError::Record {
            day,
            entity: entity.to_string(),
            source: Box::new(self),
        }
    }
}
