use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::CleanedObservation;
use crate::error::{ForecastError, Result};

/// Number of poll-quality predictors in the fixed specification.
pub const PREDICTOR_COUNT: usize = 3;
/// Design-matrix width: intercept plus the three predictors.
const DESIGN_COLUMNS: usize = PREDICTOR_COUNT + 1;

/// Named coefficients of the fitted linear model. Serializes under the
/// persisted names `const, numeric_grade, sample_size, pollscore`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coefficients {
    #[serde(rename = "const")]
    pub intercept: f64,
    pub numeric_grade: f64,
    pub sample_size: f64,
    pub pollscore: f64,
}

impl Coefficients {
    pub fn predict(&self, numeric_grade: f64, sample_size: f64, pollscore: f64) -> f64 {
        self.intercept
            + self.numeric_grade * numeric_grade
            + self.sample_size * sample_size
            + self.pollscore * pollscore
    }

    pub fn predict_observation(&self, observation: &CleanedObservation) -> f64 {
        self.predict(
            observation.numeric_grade,
            observation.sample_size,
            observation.pollscore,
        )
    }
}

/// Result of an ordinary-least-squares fit.
#[derive(Debug, Clone)]
pub struct OlsFit {
    pub coefficients: Coefficients,
    /// Number of observations the model was fitted on
    pub observations: usize,
    /// True when the design matrix was near-singular (for instance a
    /// constant predictor column). Coefficients are still returned, with
    /// degenerate directions zeroed, so callers can decide what to do.
    pub ill_conditioned: bool,
}

/// Fits `scaled_trump_pct ~ 1 + numeric_grade + sample_size + pollscore`
/// by Householder QR of the design matrix. QR is used instead of the
/// normal equations because `sample_size` runs orders of magnitude larger
/// than the other predictors and squaring the matrix would double the
/// condition number.
pub fn fit(data: &[CleanedObservation]) -> Result<OlsFit> {
    if data.len() < DESIGN_COLUMNS {
        return Err(ForecastError::InsufficientData {
            needed: DESIGN_COLUMNS,
            available: data.len(),
        });
    }

    let n = data.len();
    let mut x = Array2::<f64>::zeros((n, DESIGN_COLUMNS));
    let mut y = Array1::<f64>::zeros(n);
    for (i, row) in data.iter().enumerate() {
        x[[i, 0]] = 1.0;
        x[[i, 1]] = row.numeric_grade;
        x[[i, 2]] = row.sample_size;
        x[[i, 3]] = row.pollscore;
        y[i] = row.scaled_trump_pct;
    }

    let (beta, ill_conditioned) = qr_solve(x, y);
    if ill_conditioned {
        warn!(
            observations = n,
            "design matrix is near-singular; coefficients are unreliable"
        );
    }

    Ok(OlsFit {
        coefficients: Coefficients {
            intercept: beta[0],
            numeric_grade: beta[1],
            sample_size: beta[2],
            pollscore: beta[3],
        },
        observations: n,
        ill_conditioned,
    })
}

/// Householder QR least-squares solve of `x beta = y` for a tall matrix.
/// Returns the solution and whether R's diagonal signalled rank
/// deficiency. Rank-deficient directions get a zero coefficient instead
/// of blowing up the back-substitution.
fn qr_solve(mut x: Array2<f64>, mut y: Array1<f64>) -> (Array1<f64>, bool) {
    let (n, p) = x.dim();
    debug_assert!(n >= p);

    for k in 0..p {
        let mut norm_sq = 0.0;
        for i in k..n {
            norm_sq += x[[i, k]] * x[[i, k]];
        }
        let norm = norm_sq.sqrt();
        if norm == 0.0 {
            continue;
        }

        // Reflector v = column - alpha * e1, with alpha chosen against the
        // pivot's sign to avoid cancellation
        let alpha = if x[[k, k]] > 0.0 { -norm } else { norm };
        let mut v = vec![0.0; n - k];
        v[0] = x[[k, k]] - alpha;
        for i in (k + 1)..n {
            v[i - k] = x[[i, k]];
        }
        let vtv: f64 = v.iter().map(|e| e * e).sum();
        if vtv == 0.0 {
            continue;
        }

        for j in k..p {
            let mut dot = 0.0;
            for i in k..n {
                dot += v[i - k] * x[[i, j]];
            }
            let scale = 2.0 * dot / vtv;
            for i in k..n {
                x[[i, j]] -= scale * v[i - k];
            }
        }
        let mut dot = 0.0;
        for i in k..n {
            dot += v[i - k] * y[i];
        }
        let scale = 2.0 * dot / vtv;
        for i in k..n {
            y[i] -= scale * v[i - k];
        }

        x[[k, k]] = alpha;
    }

    // Rank check on R's diagonal relative to its largest entry
    let max_diag = (0..p).map(|k| x[[k, k]].abs()).fold(0.0, f64::max);
    let tolerance = f64::EPSILON * n as f64 * max_diag;
    let ill_conditioned = (0..p).any(|k| x[[k, k]].abs() <= tolerance);

    let mut beta = Array1::<f64>::zeros(p);
    for k in (0..p).rev() {
        let mut sum = y[k];
        for j in (k + 1)..p {
            sum -= x[[k, j]] * beta[j];
        }
        beta[k] = if x[[k, k]].abs() <= tolerance {
            0.0
        } else {
            sum / x[[k, k]]
        };
    }

    (beta, ill_conditioned)
}
