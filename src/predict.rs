use crate::domain::CleanedObservation;
use crate::error::{ForecastError, Result};
use crate::model::ols::Coefficients;

/// Column-wise means of the three predictors, the "poll of polls" input
/// to the point prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictorMeans {
    pub numeric_grade: f64,
    pub sample_size: f64,
    pub pollscore: f64,
}

pub fn predictor_means(data: &[CleanedObservation]) -> Result<PredictorMeans> {
    if data.is_empty() {
        return Err(ForecastError::InsufficientData {
            needed: 1,
            available: 0,
        });
    }
    let n = data.len() as f64;
    Ok(PredictorMeans {
        numeric_grade: data.iter().map(|o| o.numeric_grade).sum::<f64>() / n,
        sample_size: data.iter().map(|o| o.sample_size).sum::<f64>() / n,
        pollscore: data.iter().map(|o| o.pollscore).sum::<f64>() / n,
    })
}

/// Applies the fitted coefficients to averaged predictor values. One
/// scalar out; no interval at this stage (the simulator covers spread).
pub fn point_prediction(coefficients: &Coefficients, means: &PredictorMeans) -> f64 {
    coefficients.predict(means.numeric_grade, means.sample_size, means.pollscore)
}
