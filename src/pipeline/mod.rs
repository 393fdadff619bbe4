// Cleaning pipeline: aggregation, share normalization, validity
// filtering, and final dataset assembly.

pub mod aggregate;
pub mod assemble;
pub mod filter;
pub mod normalize;

use tracing::info;

use crate::config::CandidateConfig;
use crate::domain::{CleanedObservation, RawPollRecord};
use crate::error::Result;

/// Runs the full cleaning stage: raw rows in, analysis rows out.
///
/// Each sub-stage owns its output outright; nothing is shared or mutated
/// across stage boundaries, so rerunning on the same input yields the
/// same dataset.
pub fn clean_polls(
    records: &[RawPollRecord],
    candidates: &CandidateConfig,
) -> Result<Vec<CleanedObservation>> {
    let observations = aggregate::aggregate_polls(records, candidates);
    info!(
        raw_rows = records.len(),
        polls = observations.len(),
        "aggregated raw rows into per-poll observations"
    );

    let targets: Vec<Option<f64>> = observations
        .iter()
        .map(normalize::normalize_observation)
        .collect();
    let predictors: Vec<filter::RawPredictors> = observations
        .iter()
        .map(|o| [o.numeric_grade, o.sample_size, o.pollscore])
        .collect();

    let (kept_targets, kept_predictors) = filter::retain_valid(&targets, &predictors);
    info!(
        retained = kept_targets.len(),
        dropped = observations.len() - kept_targets.len(),
        "filtered observations with missing target or predictors"
    );

    assemble::assemble_dataset(kept_targets, kept_predictors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RawPollRecord;

    fn record(
        poll_id: u64,
        candidate: &str,
        pct: f64,
        grade: f64,
        sample: f64,
        score: f64,
    ) -> RawPollRecord {
        RawPollRecord {
            poll_id,
            candidate_name: candidate.to_string(),
            pct: Some(pct),
            numeric_grade: Some(grade),
            sample_size: Some(sample),
            pollscore: Some(score),
        }
    }

    #[test]
    fn test_reference_poll_yields_expected_share() {
        let records = vec![
            record(1, "Donald Trump", 45.0, 2.0, 1000.0, -0.5),
            record(1, "Kamala Harris", 55.0, 2.0, 1000.0, -0.5),
        ];
        let cleaned = clean_polls(&records, &CandidateConfig::default()).unwrap();
        assert_eq!(cleaned.len(), 1);
        assert!((cleaned[0].scaled_trump_pct - 0.45).abs() < 1e-12);
        assert_eq!(cleaned[0].numeric_grade, 2.0);
        assert_eq!(cleaned[0].sample_size, 1000.0);
        assert_eq!(cleaned[0].pollscore, -0.5);
    }

    #[test]
    fn test_single_candidate_poll_is_dropped() {
        let records = vec![record(2, "Donald Trump", 50.0, 2.0, 1000.0, -0.5)];
        let cleaned = clean_polls(&records, &CandidateConfig::default()).unwrap();
        assert!(cleaned.is_empty());
    }

    #[test]
    fn test_zero_zero_poll_is_dropped() {
        let records = vec![
            record(3, "Donald Trump", 0.0, 2.0, 1000.0, -0.5),
            record(3, "Kamala Harris", 0.0, 2.0, 1000.0, -0.5),
        ];
        let cleaned = clean_polls(&records, &CandidateConfig::default()).unwrap();
        assert!(cleaned.is_empty());
    }

    #[test]
    fn test_cleaning_is_idempotent() {
        let records = vec![
            record(1, "Donald Trump", 45.0, 2.0, 1000.0, -0.5),
            record(1, "Kamala Harris", 55.0, 2.0, 1000.0, -0.5),
            record(2, "Donald Trump", 48.0, 1.5, 800.0, -0.2),
            record(2, "Kamala Harris", 32.0, 1.5, 800.0, -0.2),
        ];
        let first = clean_polls(&records, &CandidateConfig::default()).unwrap();
        let second = clean_polls(&records, &CandidateConfig::default()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }
}
