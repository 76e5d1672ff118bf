//! Fitted categorical encoder.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::PipelineError;

/// Sentinel feature value substituted for categories the encoder has never
/// seen. The predictor will score such an input anyway; callers are warned
/// through the log when it happens.
pub const OOV_CODE: f64 = -1.0;

/// Result of encoding one categorical value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryCode {
    /// The category was part of the fitted vocabulary.
    Known(i64),
    /// The category was never seen during fitting.
    OutOfVocabulary,
}

impl CategoryCode {
    /// Lowers the code to the numeric feature the predictor consumes.
    pub fn as_feature(self) -> f64 {
        match self {
            CategoryCode::Known(code) => code as f64,
            CategoryCode::OutOfVocabulary => OOV_CODE,
        }
    }
}

/// Vocabulary lookup fitted at training time. A category's code is its
/// position in the fitted class list; the encoder never refits.
#[derive(Debug)]
pub struct CategoryEncoder {
    codes: HashMap<String, i64>,
}

#[derive(Deserialize)]
struct EncoderBlob {
    classes: Vec<String>,
}

impl CategoryEncoder {
    pub fn new(classes: impl IntoIterator<Item = String>) -> Self {
        let codes = classes
            .into_iter()
            .enumerate()
            .map(|(i, class)| (class, i as i64))
            .collect();
        CategoryEncoder { codes }
    }

    pub fn from_file(path: &Path) -> Result<Self, PipelineError> {
        let raw = std::fs::read_to_string(path).map_err(|e| PipelineError::Artifact {
            name: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let blob: EncoderBlob =
            serde_json::from_str(&raw).map_err(|e| PipelineError::Artifact {
                name: path.display().to_string(),
                reason: e.to_string(),
            })?;
        Ok(CategoryEncoder::new(blob.classes))
    }

    /// Looks up a raw categorical value. A miss is not an error: it yields
    /// [`CategoryCode::OutOfVocabulary`], which lowers to [`OOV_CODE`].
    pub fn encode(&self, raw: &str) -> CategoryCode {
        match self.codes.get(raw) {
            Some(&code) => CategoryCode::Known(code),
            None => CategoryCode::OutOfVocabulary,
        }
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
