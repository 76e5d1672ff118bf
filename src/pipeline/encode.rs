//! Feature encoding: raw activity records → scaled numeric vectors.

use tracing::warn;

use crate::bundle::{CategoryCode, CategoryEncoder, FeatureScaler};
use crate::domains::{DomainSpec, FieldKind};
use crate::error::PipelineError;
use crate::records::RawRecord;

/// Encodes one raw record into the fixed-order, scaled feature vector the
/// predictor expects.
///
/// All schema fields must be present; the error names every missing one.
/// Categorical values missing from the fitted vocabulary are a soft
/// failure: they lower to the sentinel code and are logged, and the record
/// is still scored.
pub fn encode(
    record: &RawRecord,
    spec: &DomainSpec,
    encoder: &CategoryEncoder,
    scaler: &FeatureScaler,
) -> Result<Vec<f64>, PipelineError> {
    let missing: Vec<String> = spec
        .fields
        .iter()
        .filter(|f| !record.contains_key(f.name))
        .map(|f| f.name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(PipelineError::Schema { missing });
    }

    let mut features = Vec::with_capacity(spec.model_input_len());
    for field in spec.model_fields() {
        let raw = &record[field.name];
        let value = match field.kind {
            FieldKind::Categorical => {
                let code = encoder.encode(raw);
                if code == CategoryCode::OutOfVocabulary {
                    warn!(
                        field = field.name,
                        value = %raw,
                        "category not in fitted vocabulary, substituting sentinel code"
                    );
                }
                code.as_feature()
            }
            FieldKind::Numeric => {
                raw.trim()
                    .parse::<f64>()
                    .map_err(|_| PipelineError::BadNumericField {
                        field: field.name.to_string(),
                        value: raw.clone(),
                    })?
            }
        };
        features.push(value);
    }

    scaler.transform(&features)
}
