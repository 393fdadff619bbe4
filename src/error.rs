use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Config error: {0}")]
    Config(String),

    /// Target and predictor sequences out of step after filtering. This is a
    /// broken invariant, not bad input data, so it aborts the run.
    #[error("cleaned dataset invariant violated: {targets} targets vs {predictors} predictor rows")]
    SchemaMismatch { targets: usize, predictors: usize },

    #[error("not enough observations: {needed} required, {available} available")]
    InsufficientData { needed: usize, available: usize },

    #[error("invalid distribution parameters: {0}")]
    Distribution(String),
}

pub type Result<T> = std::result::Result<T, ForecastError>;
