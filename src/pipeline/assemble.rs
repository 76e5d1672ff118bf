//! Daily prediction assembly: encode → predict → classify, one record at a
//! time, in encounter order.

use tracing::{debug, info};

use crate::bundle::{CategoryEncoder, FeatureScaler, ModelBundle, Predictor};
use crate::domains::DomainSpec;
use crate::error::PipelineError;
use crate::pipeline::encode::encode;
use crate::pipeline::risk::classify;
use crate::pipeline::types::{DailyResult, Observation};
use crate::records::{DayRecords, RawRecord};

/// Runs the per-record pipeline over an ordered sequence of days.
///
/// Produces one [`DailyResult`] per entity-observation, in encounter order.
/// An encoding or prediction failure aborts the assembly with an error
/// identifying the day index and entity label; the caller gets either a
/// complete batch or that error, never a silently truncated batch.
pub fn assemble<P: Predictor>(
    days: &[DayRecords],
    spec: &DomainSpec,
    encoder: &CategoryEncoder,
    scaler: &FeatureScaler,
    model: &P,
) -> Result<Vec<DailyResult>, PipelineError> {
    let mut results = Vec::new();

    for day in days {
        for record in &day.records {
            let entity = record
                .get(spec.entity_field)
                .cloned()
                .unwrap_or_default();

            let observations = score_record(record, spec, encoder, scaler, model)
                .map_err(|e| e.for_record(day.day, &entity))?;

            debug!(day = day.day, entity = %entity, "Record scored");
            results.push(DailyResult {
                day: day.day,
                entity,
                observations,
            });
        }
    }

    info!(
        domain = %spec.domain,
        days = days.len(),
        records = results.len(),
        "Daily predictions assembled"
    );
    Ok(results)
}

/// Convenience wrapper running [`assemble`] against a loaded bundle.
pub fn assemble_with(
    days: &[DayRecords],
    spec: &DomainSpec,
    bundle: &ModelBundle,
) -> Result<Vec<DailyResult>, PipelineError> {
    assemble(days, spec, &bundle.encoder, &bundle.scaler, &bundle.model)
}

fn score_record<P: Predictor>(
    record: &RawRecord,
    spec: &DomainSpec,
    encoder: &CategoryEncoder,
    scaler: &FeatureScaler,
    model: &P,
) -> Result<Vec<Observation>, PipelineError> {
    let features = encode(record, spec, encoder, scaler)?;
    let values = model.predict(&features)?;

    if values.len() != spec.kinds.len() {
        return Err(PipelineError::Prediction(format!(
            "predictor returned {} quantities, domain has {} kinds",
            values.len(),
            spec.kinds.len()
        )));
    }

    Ok(spec
        .kinds
        .iter()
        .copied()
        .zip(values)
        .map(|(kind, value)| Observation {
            kind: kind.to_string(),
            value,
            tier: classify(value, kind, spec.thresholds),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::Domain;
    use crate::pipeline::risk::RiskTier;

    /// Predictor double that returns a fixed quantity vector.
    struct FixedPredictor(Vec<f64>);

    impl Predictor for FixedPredictor {
        fn predict(&self, _features: &[f64]) -> Result<Vec<f64>, PipelineError> {
            Ok(self.0.clone())
        }
    }

    /// Predictor double that always fails.
    struct FailingPredictor;

    impl Predictor for FailingPredictor {
        fn predict(&self, _features: &[f64]) -> Result<Vec<f64>, PipelineError> {
            Err(PipelineError::Prediction("artifact gone".to_string()))
        }
    }

    fn record(pairs: &[(&str, &str)]) -> RawRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn transport_day(day: u32) -> DayRecords {
        DayRecords {
            day,
            records: vec![record(&[
                ("weightUnit", "kg"),
                ("weightValue", "500"),
                ("distanceUnit", "km"),
                ("distanceValue", "1000"),
                ("transportMethod", "Truck"),
            ])],
        }
    }

    fn transport_encoder() -> CategoryEncoder {
        CategoryEncoder::new(["Plane", "Ship", "Truck"].map(String::from))
    }

    #[test]
    fn test_assemble_classifies_every_quantity() {
        let spec = Domain::Transport.spec();
        let results = assemble(
            &[transport_day(1)],
            spec,
            &transport_encoder(),
            &FeatureScaler::identity(3),
            &FixedPredictor(vec![450.0]),
        )
        .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].day, 1);
        assert_eq!(results[0].entity, "Truck");
        assert_eq!(results[0].observations.len(), 1);
        assert_eq!(results[0].observations[0].kind, "CO2 (kg)");
        assert_eq!(results[0].observations[0].value, 450.0);
        assert_eq!(results[0].observations[0].tier, RiskTier::Low);
    }

    #[test]
    fn test_assemble_keeps_encounter_order() {
        let spec = Domain::Explosives.spec();
        let day = DayRecords {
            day: 1,
            records: vec![
                record(&[("explosiveType", "TNT"), ("amount", "3000")]),
                record(&[("explosiveType", "Dynamite"), ("amount", "2000")]),
            ],
        };
        let encoder = CategoryEncoder::new(["Dynamite", "TNT"].map(String::from));
        let results = assemble(
            &[day],
            spec,
            &encoder,
            &FeatureScaler::identity(2),
            &FixedPredictor(vec![1050.0, 10.0, 10.0, 10.0, 10.0, 0.5, 500.0]),
        )
        .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].entity, "TNT");
        assert_eq!(results[1].entity, "Dynamite");
        // CO at 1050 sits past the last cut point
        assert_eq!(results[0].observations[0].tier, RiskTier::Severe);
    }

    #[test]
    fn test_assemble_failure_names_day_and_entity() {
        let spec = Domain::Transport.spec();
        let err = assemble(
            &[transport_day(42)],
            spec,
            &transport_encoder(),
            &FeatureScaler::identity(3),
            &FailingPredictor,
        )
        .unwrap_err();

        match err {
            PipelineError::Record { day, entity, .. } => {
                assert_eq!(day, 42);
                assert_eq!(entity, "Truck");
            }
            other => panic!("expected record-scoped error, got {other}"),
        }
    }

    #[test]
    fn test_assemble_rejects_arity_mismatch() {
        let spec = Domain::Fuel.spec();
        let day = DayRecords {
            day: 1,
            records: vec![record(&[("fuelType", "Diesel"), ("volume", "100")])],
        };
        let encoder = CategoryEncoder::new(["Diesel"].map(String::from));
        let err = assemble(
            &[day],
            spec,
            &encoder,
            &FeatureScaler::identity(2),
            &FixedPredictor(vec![1.0, 2.0]), // fuel expects 6 quantities
        )
        .unwrap_err();
        assert!(matches!(err, PipelineError::Record { .. }));
    }
}
