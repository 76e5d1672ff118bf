//! Fitted linear feature scaler.

use std::path::Path;

use serde::Deserialize;

use crate::error::PipelineError;

/// Per-position standardization fitted at training time:
/// `scaled[i] = (x[i] - mean[i]) / scale[i]`. The scaler never refits.
#[derive(Debug, Deserialize)]
pub struct FeatureScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl FeatureScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, PipelineError> {
        if mean.len() != scale.len() {
            return Err(PipelineError::Artifact {
                name: "scaler".to_string(),
                reason: format!(
                    "mean has {} entries, scale has {}",
                    mean.len(),
                    scale.len()
                ),
            });
        }
        if scale.iter().any(|s| *s == 0.0 || !s.is_finite()) {
            return Err(PipelineError::Artifact {
                name: "scaler".to_string(),
                reason: "scale entries must be finite and non-zero".to_string(),
            });
        }
        Ok(FeatureScaler { mean, scale })
    }

    /// A pass-through scaler for domains fitted without standardization.
    pub fn identity(len: usize) -> Self {
        FeatureScaler {
            mean: vec![0.0; len],
            scale: vec![1.0; len],
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, PipelineError> {
        let raw = std::fs::read_to_string(path).map_err(|e| PipelineError::Artifact {
            name: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let blob: FeatureScaler =
            serde_json::from_str(&raw).map_err(|e| PipelineError::Artifact {
                name: path.display().to_string(),
                reason: e.to_string(),
            })?;
        FeatureScaler::new(blob.mean, blob.scale)
    }

    pub fn len(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    /// Scales a feature vector of the fitted width.
    pub fn transform(&self, features: &[f64]) -> Result<Vec<f64>, PipelineError> {
        if features.len() != self.mean.len() {
            return Err(PipelineError::Artifact {
                name: "scaler".to_string(),
                reason: format!(
                    "got {} features, fitted for {}",
                    features.len(),
                    self.mean.len()
                ),
            });
        }
        Ok(features
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (m, s))| (x - m) / s)
            .collect())
    }
}
