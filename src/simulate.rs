use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, LogNormal, Normal};
use serde::Serialize;

use crate::config::SimulationConfig;
use crate::error::{ForecastError, Result};
use crate::model::ols::Coefficients;

/// One simulated draw: the sampled predictor values and the prediction
/// they produce under the fixed coefficients.
#[derive(Debug, Clone, Serialize)]
pub struct SimulatedDraw {
    pub numeric_grade: f64,
    pub sample_size: f64,
    pub pollscore: f64,
    pub predicted_trump_pct: f64,
}

#[derive(Debug, Clone)]
pub struct SimulationSummary {
    pub mean: f64,
    pub std_dev: f64,
    /// 95% confidence interval for the mean prediction
    pub ci_low: f64,
    pub ci_high: f64,
}

/// Monte-Carlo distribution of predictions from fixed coefficients and
/// assumed predictor distributions: normal for `numeric_grade` and
/// `pollscore`, log-normal for `sample_size`. Entirely independent of the
/// live cleaning pipeline; the draws stand in for plausible future polls.
pub fn simulate(
    coefficients: &Coefficients,
    config: &SimulationConfig,
) -> Result<(Vec<SimulatedDraw>, SimulationSummary)> {
    if config.draws == 0 {
        return Err(ForecastError::Distribution(
            "simulation needs at least one draw".to_string(),
        ));
    }

    // rand_distr accepts negative spreads and samples a sign-flipped
    // distribution, so the check has to happen here
    for (name, spread) in [
        ("numeric_grade_std", config.numeric_grade_std),
        ("sample_size_log_std", config.sample_size_log_std),
        ("pollscore_std", config.pollscore_std),
    ] {
        if !spread.is_finite() || spread < 0.0 {
            return Err(ForecastError::Distribution(format!(
                "{} must be non-negative, got {}",
                name, spread
            )));
        }
    }

    let grade_dist = Normal::new(config.numeric_grade_mean, config.numeric_grade_std)
        .map_err(|e| ForecastError::Distribution(format!("numeric_grade: {}", e)))?;
    let score_dist = Normal::new(config.pollscore_mean, config.pollscore_std)
        .map_err(|e| ForecastError::Distribution(format!("pollscore: {}", e)))?;
    if config.sample_size_median <= 0.0 {
        return Err(ForecastError::Distribution(
            "sample_size_median must be positive".to_string(),
        ));
    }
    let sample_dist = LogNormal::new(config.sample_size_median.ln(), config.sample_size_log_std)
        .map_err(|e| ForecastError::Distribution(format!("sample_size: {}", e)))?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let draws: Vec<SimulatedDraw> = (0..config.draws)
        .map(|_| {
            let numeric_grade = grade_dist.sample(&mut rng);
            let sample_size = sample_dist.sample(&mut rng);
            let pollscore = score_dist.sample(&mut rng);
            SimulatedDraw {
                numeric_grade,
                sample_size,
                pollscore,
                predicted_trump_pct: coefficients.predict(numeric_grade, sample_size, pollscore),
            }
        })
        .collect();

    let summary = summarize(&draws);
    Ok((draws, summary))
}

fn summarize(draws: &[SimulatedDraw]) -> SimulationSummary {
    let n = draws.len() as f64;
    let mean = draws.iter().map(|d| d.predicted_trump_pct).sum::<f64>() / n;
    let variance = draws
        .iter()
        .map(|d| {
            let diff = d.predicted_trump_pct - mean;
            diff * diff
        })
        .sum::<f64>()
        / (n - 1.0).max(1.0);
    let std_dev = variance.sqrt();
    let half_width = 1.96 * std_dev / n.sqrt();

    SimulationSummary {
        mean,
        std_dev,
        ci_low: mean - half_width,
        ci_high: mean + half_width,
    }
}
