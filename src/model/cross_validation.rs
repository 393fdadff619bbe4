use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::info;

use crate::domain::CleanedObservation;
use crate::error::{ForecastError, Result};
use crate::model::ols;

/// Held-out mean squared error for one fold.
#[derive(Debug, Clone)]
pub struct FoldScore {
    pub fold: usize,
    pub test_size: usize,
    pub mse: f64,
}

#[derive(Debug, Clone)]
pub struct CrossValidationReport {
    pub folds: Vec<FoldScore>,
    pub average_mse: f64,
}

pub fn mean_squared_error(actual: &[f64], predicted: &[f64]) -> f64 {
    debug_assert_eq!(actual.len(), predicted.len());
    if actual.is_empty() {
        return 0.0;
    }
    actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p) * (a - p))
        .sum::<f64>()
        / actual.len() as f64
}

/// Shuffled k-fold cross-validation of the polling model. The shuffle is
/// seeded, so the same seed always produces the same fold membership and
/// the same scores. Fold sizes differ by at most one row.
pub fn cross_validate(
    data: &[CleanedObservation],
    folds: usize,
    seed: u64,
) -> Result<CrossValidationReport> {
    if folds < 2 {
        return Err(ForecastError::Config(format!(
            "cross-validation requires at least 2 folds, got {}",
            folds
        )));
    }
    if data.len() < folds {
        return Err(ForecastError::InsufficientData {
            needed: folds,
            available: data.len(),
        });
    }

    let mut indices: Vec<usize> = (0..data.len()).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let base = data.len() / folds;
    let remainder = data.len() % folds;

    let mut scores = Vec::with_capacity(folds);
    let mut start = 0;
    for fold in 0..folds {
        let size = base + usize::from(fold < remainder);
        let test_indices = &indices[start..start + size];
        start += size;

        let train_data: Vec<CleanedObservation> = indices
            .iter()
            .copied()
            .filter(|i| !test_indices.contains(i))
            .map(|i| data[i].clone())
            .collect();
        let fit = ols::fit(&train_data)?;

        let actual: Vec<f64> = test_indices
            .iter()
            .map(|&i| data[i].scaled_trump_pct)
            .collect();
        let predicted: Vec<f64> = test_indices
            .iter()
            .map(|&i| fit.coefficients.predict_observation(&data[i]))
            .collect();
        let mse = mean_squared_error(&actual, &predicted);

        info!(fold = fold + 1, test_size = size, mse, "fold evaluated");
        scores.push(FoldScore {
            fold: fold + 1,
            test_size: size,
            mse,
        });
    }

    let average_mse = scores.iter().map(|s| s.mse).sum::<f64>() / scores.len() as f64;
    Ok(CrossValidationReport {
        folds: scores,
        average_mse,
    })
}
