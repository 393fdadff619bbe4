use anyhow::Result;
use std::fs;
use tempfile::tempdir;

use pollcast::config::{CandidateConfig, ForecastConfig};
use pollcast::domain::RawPollRecord;
use pollcast::model::{self, ModelArtifact};
use pollcast::pipeline::clean_polls;
use pollcast::{io, predict, simulate};

fn record(poll_id: u64, candidate: &str, pct: f64) -> RawPollRecord {
    RawPollRecord {
        poll_id,
        candidate_name: candidate.to_string(),
        pct: Some(pct),
        numeric_grade: Some(2.0),
        sample_size: Some(1000.0),
        pollscore: Some(-0.5),
    }
}

#[test]
fn cleaning_matches_reference_examples() -> Result<()> {
    let candidates = CandidateConfig::default();

    // poll 1: both candidates present, retained with share 0.45
    // poll 2: Trump only, dropped
    // poll 3: both zero, 0/0 is undefined, dropped
    let records = vec![
        record(1, "Donald Trump", 45.0),
        record(1, "Kamala Harris", 55.0),
        record(2, "Donald Trump", 50.0),
        record(3, "Donald Trump", 0.0),
        record(3, "Kamala Harris", 0.0),
    ];

    let cleaned = clean_polls(&records, &candidates)?;
    assert_eq!(cleaned.len(), 1);
    assert!((cleaned[0].scaled_trump_pct - 0.45).abs() < 1e-12);
    Ok(())
}

#[test]
fn cleaned_dataset_preserves_poll_order() -> Result<()> {
    let candidates = CandidateConfig::default();
    let mut records = vec![
        record(10, "Donald Trump", 45.0),
        record(10, "Kamala Harris", 55.0),
        record(20, "Donald Trump", 60.0),
        record(20, "Kamala Harris", 40.0),
    ];
    // Vary the predictors so the two rows are distinguishable
    records[2].numeric_grade = Some(1.5);
    records[3].numeric_grade = Some(1.5);

    let cleaned = clean_polls(&records, &candidates)?;
    assert_eq!(cleaned.len(), 2);
    assert!((cleaned[0].scaled_trump_pct - 0.45).abs() < 1e-12);
    assert!((cleaned[1].scaled_trump_pct - 0.60).abs() < 1e-12);
    Ok(())
}

#[test]
fn csv_in_csv_out_full_cleaning_run() -> Result<()> {
    let dir = tempdir()?;
    let raw_path = dir.path().join("president_polls.csv");
    let cleaned_path = dir.path().join("analysis_data.csv");

    // Extra columns and messy cells, the way the real export looks
    fs::write(
        &raw_path,
        "poll_id,pollster,candidate_name,pct,numeric_grade,sample_size,pollscore\n\
         1,Acme,Donald Trump,45.0,2.0,1000,-0.5\n\
         1,Acme,Kamala Harris,55.0,2.0,1000,-0.5\n\
         2,Beta,Donald Trump,50.0,,900,\n\
         3,Gamma,Donald Trump,48.0,1.5,800,-0.2\n\
         3,Gamma,Kamala Harris,32.0,1.5,800,-0.2\n\
         3,Gamma,Jill Stein,4.0,1.5,800,-0.2\n",
    )?;

    let records = io::read_raw_polls(&raw_path)?;
    assert_eq!(records.len(), 6);

    let cleaned = clean_polls(&records, &CandidateConfig::default())?;
    // poll 2 has no Harris rows and is dropped; polls 1 and 3 survive
    assert_eq!(cleaned.len(), 2);
    assert!((cleaned[1].scaled_trump_pct - 0.60).abs() < 1e-12);

    io::write_cleaned_dataset(&cleaned_path, &cleaned)?;
    let reloaded = io::read_cleaned_dataset(&cleaned_path)?;
    assert_eq!(reloaded, cleaned);
    Ok(())
}

#[test]
fn observation_count_equals_distinct_poll_ids() -> Result<()> {
    let candidates = CandidateConfig::default();
    let records: Vec<RawPollRecord> = (0..50)
        .map(|i| record(i % 7, "Donald Trump", 40.0 + (i % 10) as f64))
        .collect();

    let observations = pollcast::pipeline::aggregate::aggregate_polls(&records, &candidates);
    assert_eq!(observations.len(), 7);
    Ok(())
}

#[test]
fn fit_predict_round_trip_through_artifact() -> Result<()> {
    let dir = tempdir()?;
    let model_path = dir.path().join("linear_model.json");

    // Synthetic polls around a known linear relationship plus wobble
    let truth = model::Coefficients {
        intercept: 0.53,
        numeric_grade: -0.016,
        sample_size: -2.3e-6,
        pollscore: -0.0064,
    };
    let dataset: Vec<pollcast::domain::CleanedObservation> = (0..40)
        .map(|i| {
            let grade = 1.0 + 0.25 * (i % 8) as f64;
            let sample = 500.0 + 211.0 * (i % 11) as f64;
            let score = -1.2 + 0.2 * (i % 9) as f64;
            pollcast::domain::CleanedObservation {
                numeric_grade: grade,
                sample_size: sample,
                pollscore: score,
                scaled_trump_pct: truth.predict(grade, sample, score)
                    + 0.005 * ((i * 3 % 7) as f64 - 3.0),
            }
        })
        .collect();

    let config = ForecastConfig::default();
    let report = model::cross_validate(
        &dataset,
        config.cross_validation.folds,
        config.cross_validation.seed,
    )?;
    assert_eq!(report.folds.len(), 8);
    assert!(report.average_mse < 0.01);

    let fit = model::fit(&dataset)?;
    assert!(!fit.ill_conditioned);
    ModelArtifact::from_fit(&fit).save(&model_path)?;

    let artifact = ModelArtifact::load(&model_path)?;
    let means = predict::predictor_means(&dataset)?;
    let predicted = predict::point_prediction(&artifact.coefficients, &means);
    assert!(predicted.is_finite());
    // The poll-of-polls prediction should land near the target's range
    assert!(predicted > 0.3 && predicted < 0.7);
    Ok(())
}

#[test]
fn simulation_draws_write_to_csv() -> Result<()> {
    let dir = tempdir()?;
    let output = dir.path().join("simulated_predictions.csv");

    let coefficients = model::Coefficients {
        intercept: 0.5324,
        numeric_grade: -0.016,
        sample_size: -2.28e-6,
        pollscore: -0.0064,
    };
    let mut sim_config = ForecastConfig::default().simulation;
    sim_config.draws = 100;

    let (draws, summary) = simulate::simulate(&coefficients, &sim_config)?;
    assert_eq!(draws.len(), 100);
    assert!(summary.std_dev > 0.0);

    io::write_simulated_draws(&output, &draws)?;
    let content = fs::read_to_string(&output)?;
    assert!(content.starts_with("numeric_grade,sample_size,pollscore,predicted_trump_pct"));
    assert_eq!(content.lines().count(), 101);
    Ok(())
}

#[test]
fn custom_candidate_labels_are_respected() -> Result<()> {
    let candidates = CandidateConfig {
        target: "Candidate A".to_string(),
        comparison: "Candidate B".to_string(),
    };
    let records = vec![
        record(1, "Candidate A", 30.0),
        record(1, "Candidate B", 60.0),
        record(1, "Donald Trump", 10.0),
    ];
    let cleaned = clean_polls(&records, &candidates)?;
    assert_eq!(cleaned.len(), 1);
    assert!((cleaned[0].scaled_trump_pct - 1.0 / 3.0).abs() < 1e-12);
    Ok(())
}
