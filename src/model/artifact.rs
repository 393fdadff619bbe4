use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::model::ols::{Coefficients, OlsFit};

/// Serialized form of a fitted model: the named coefficients plus enough
/// fit metadata to judge whether the artifact is trustworthy. Stored as
/// JSON; the prediction stage only ever reads the coefficient names
/// `const, numeric_grade, sample_size, pollscore`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub coefficients: Coefficients,
    pub observations: usize,
    pub ill_conditioned: bool,
    pub fitted_at: DateTime<Utc>,
}

impl ModelArtifact {
    pub fn from_fit(fit: &OlsFit) -> Self {
        Self {
            coefficients: fit.coefficients,
            observations: fit.observations,
            ill_conditioned: fit.ill_conditioned,
            fitted_at: Utc::now(),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        crate::io::ensure_parent_dir(path)?;
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
