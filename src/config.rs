use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::constants;
use crate::error::{ForecastError, Result};

/// Runtime configuration, loadable from a TOML file. Every section has
/// defaults matching the reference analysis, so a config file is optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    pub candidates: CandidateConfig,
    pub cross_validation: CrossValidationConfig,
    pub simulation: SimulationConfig,
}

/// The two tracked candidate labels. The scaled vote share is
/// target / (target + comparison).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CandidateConfig {
    pub target: String,
    pub comparison: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrossValidationConfig {
    pub folds: usize,
    pub seed: u64,
}

/// Assumed predictor distributions for the Monte-Carlo simulation.
/// `sample_size` is log-normal (heavily right-skewed in practice); the
/// other two predictors are normal.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub draws: usize,
    pub seed: u64,
    pub numeric_grade_mean: f64,
    pub numeric_grade_std: f64,
    pub sample_size_median: f64,
    pub sample_size_log_std: f64,
    pub pollscore_mean: f64,
    pub pollscore_std: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            candidates: CandidateConfig::default(),
            cross_validation: CrossValidationConfig::default(),
            simulation: SimulationConfig::default(),
        }
    }
}

impl Default for CandidateConfig {
    fn default() -> Self {
        Self {
            target: constants::DEFAULT_TARGET_CANDIDATE.to_string(),
            comparison: constants::DEFAULT_COMPARISON_CANDIDATE.to_string(),
        }
    }
}

impl Default for CrossValidationConfig {
    fn default() -> Self {
        Self { folds: 8, seed: 1 }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            draws: 1000,
            seed: 42,
            numeric_grade_mean: 2.0,
            numeric_grade_std: 0.7,
            sample_size_median: 1800.0,
            sample_size_log_std: 1.2,
            pollscore_mean: -0.3,
            pollscore_std: 0.7,
        }
    }
}

impl ForecastConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ForecastError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: ForecastConfig = toml::from_str(&content)?;
        if config.candidates.target == config.candidates.comparison {
            return Err(ForecastError::Config(
                "target and comparison candidates must differ".to_string(),
            ));
        }
        Ok(config)
    }
}
