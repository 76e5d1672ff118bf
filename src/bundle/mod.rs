//! Fitted model artifacts: categorical encoder, numeric scaler, and the
//! regression model behind the [`Predictor`] trait.
//!
//! A [`ModelBundle`] is loaded once at startup from three JSON blobs and
//! treated as read-only for the life of the process. The pipeline only
//! depends on the behavioral contracts (encode / scale / predict), never
//! on the artifacts' internal representation.

mod encoder;
mod model;
mod scaler;

pub use encoder::{CategoryCode, CategoryEncoder, OOV_CODE};
pub use model::{LinearModel, Predictor};
pub use scaler::FeatureScaler;

use std::path::Path;

use crate::domains::DomainSpec;
use crate::error::PipelineError;
use tracing::info;

/// The three fitted artifacts a domain's pipeline runs against.
#[derive(Debug)]
pub struct ModelBundle {
    pub encoder: CategoryEncoder,
    pub scaler: FeatureScaler,
    pub model: LinearModel,
}

impl ModelBundle {
    /// Loads `encoder.json`, `scaler.json` and `model.json` from `dir` and
    /// validates their dimensions against the domain schema.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Artifact`] for a missing or malformed blob,
    /// or for dimensions that disagree with the schema.
    pub fn load(dir: &Path, spec: &DomainSpec) -> Result<Self, PipelineError> {
        let encoder = CategoryEncoder::from_file(&dir.join("encoder.json"))?;
        let scaler = FeatureScaler::from_file(&dir.join("scaler.json"))?;
        let model = LinearModel::from_file(&dir.join("model.json"))?;

        let n_inputs = spec.model_input_len();
        if scaler.len() != n_inputs {
            return Err(PipelineError::Artifact {
                name: "scaler.json".to_string(),
                reason: format!(
                    "scales {} features, schema has {}",
                    scaler.len(),
                    n_inputs
                ),
            });
        }
        if model.input_len() != n_inputs {
            return Err(PipelineError::Artifact {
                name: "model.json".to_string(),
                reason: format!(
                    "expects {} features, schema has {}",
                    model.input_len(),
                    n_inputs
                ),
            });
        }
        if model.output_len() != spec.kinds.len() {
            return Err(PipelineError::Artifact {
                name: "model.json".to_string(),
                reason: format!(
                    "emits {} quantities, domain has {} kinds",
                    model.output_len(),
                    spec.kinds.len()
                ),
            });
        }

        info!(
            domain = %spec.domain,
            vocabulary = encoder.len(),
            features = n_inputs,
            outputs = model.output_len(),
            "Model bundle loaded"
        );

        Ok(ModelBundle {
            encoder,
            scaler,
            model,
        })
    }
}
