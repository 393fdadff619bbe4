use crate::domain::CleanedObservation;
use crate::error::{ForecastError, Result};
use crate::pipeline::filter::Predictors;

/// Zips the filtered target and predictor sequences into the canonical
/// analysis schema. The sequences are equal-length by construction from
/// the validity filter; a mismatch here means a core invariant broke, so
/// it is fatal rather than recoverable.
pub fn assemble_dataset(
    targets: Vec<f64>,
    predictors: Vec<Predictors>,
) -> Result<Vec<CleanedObservation>> {
    if targets.len() != predictors.len() {
        return Err(ForecastError::SchemaMismatch {
            targets: targets.len(),
            predictors: predictors.len(),
        });
    }

    Ok(targets
        .into_iter()
        .zip(predictors)
        .map(
            |(scaled_trump_pct, [numeric_grade, sample_size, pollscore])| CleanedObservation {
                numeric_grade,
                sample_size,
                pollscore,
                scaled_trump_pct,
            },
        )
        .collect())
}
