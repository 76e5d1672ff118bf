//! The predictor boundary and its artifact-backed implementation.

use std::path::Path;

use serde::Deserialize;

use crate::error::PipelineError;

/// External prediction capability the pipeline consumes.
///
/// A single call returns the complete quantity vector (one value per
/// quantity kind, in the domain's fixed kind order) or fails the whole
/// record. Implementations must be deterministic for identical inputs.
pub trait Predictor {
    fn predict(&self, features: &[f64]) -> Result<Vec<f64>, PipelineError>;
}

/// Multi-output linear regression exported by the training pipeline:
/// `output[k] = coefficients[k] · features + intercepts[k]`.
#[derive(Debug, Deserialize)]
pub struct LinearModel {
    /// One coefficient row per output quantity.
    coefficients: Vec<Vec<f64>>,
    intercepts: Vec<f64>,
}

impl LinearModel {
    pub fn new(coefficients: Vec<Vec<f64>>, intercepts: Vec<f64>) -> Result<Self, PipelineError> {
        let model = LinearModel {
            coefficients,
            intercepts,
        };
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<(), PipelineError> {
        let invalid = |reason: String| PipelineError::Artifact {
            name: "model".to_string(),
            reason,
        };
        if self.coefficients.is_empty() {
            return Err(invalid("no coefficient rows".to_string()));
        }
        if self.coefficients.len() != self.intercepts.len() {
            return Err(invalid(format!(
                "{} coefficient rows, {} intercepts",
                self.coefficients.len(),
                self.intercepts.len()
            )));
        }
        let width = self.coefficients[0].len();
        if width == 0 {
            return Err(invalid("empty coefficient row".to_string()));
        }
        if self.coefficients.iter().any(|row| row.len() != width) {
            return Err(invalid("ragged coefficient rows".to_string()));
        }
        Ok(())
    }

    pub fn from_file(path: &Path) -> Result<Self, PipelineError> {
        let raw = std::fs::read_to_string(path).map_err(|e| PipelineError::Artifact {
            name: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let blob: LinearModel =
            serde_json::from_str(&raw).map_err(|e| PipelineError::Artifact {
                name: path.display().to_string(),
                reason: e.to_string(),
            })?;
        blob.validate()?;
        Ok(blob)
    }

    /// Number of features one prediction consumes.
    pub fn input_len(&self) -> usize {
        self.coefficients[0].len()
    }

    /// Number of quantities one prediction emits.
    pub fn output_len(&self) -> usize {
        self.coefficients.len()
    }
}

impl Predictor for LinearModel {
    fn predict(&self, features: &[f64]) -> Result<Vec<f64>, PipelineError> {
        if features.len() != self.input_len() {
            return Err(PipelineError::Prediction(format!(
                "got {} features, model expects {}",
                features.len(),
                self.input_len()
            )));
        }
        Ok(self
            .coefficients
            .iter()
            .zip(&self.intercepts)
            .map(|(row, b)| row.iter().zip(features).map(|(c, x)| c * x).sum::<f64>() + b)
            .collect())
    }
}
