use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use pollcast::config::ForecastConfig;
use pollcast::domain::CleanedObservation;
use pollcast::model::{self, ModelArtifact};
use pollcast::{io, logging, pipeline, predict, simulate};

#[derive(Parser)]
#[command(name = "pollcast")]
#[command(about = "US presidential election polling forecast pipeline")]
#[command(version = "0.1.0")]
struct Cli {
    /// Optional TOML config (candidate labels, CV folds, simulation assumptions)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean raw polling records into the analysis dataset
    Clean {
        /// Raw polling CSV (FiveThirtyEight president_polls export)
        #[arg(long, default_value = "data/raw_data/president_polls.csv")]
        input: PathBuf,
        /// Cleaned analysis CSV to write
        #[arg(long, default_value = "data/analysis_data/analysis_data.csv")]
        output: PathBuf,
    },
    /// Cross-validate and fit the linear model on a cleaned dataset
    Fit {
        #[arg(long, default_value = "data/analysis_data/analysis_data.csv")]
        input: PathBuf,
        /// Model artifact (JSON) to write
        #[arg(long, default_value = "models/linear_model.json")]
        model: PathBuf,
        /// Override the configured fold count
        #[arg(long)]
        folds: Option<usize>,
        /// Override the configured shuffle seed
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Produce the poll-of-polls point prediction from a fitted model
    Predict {
        #[arg(long, default_value = "models/linear_model.json")]
        model: PathBuf,
        #[arg(long, default_value = "data/analysis_data/analysis_data.csv")]
        input: PathBuf,
    },
    /// Monte-Carlo simulation of predictions from a fitted model
    Simulate {
        #[arg(long, default_value = "models/linear_model.json")]
        model: PathBuf,
        /// Simulated draws CSV to write (skipped when omitted)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Override the configured number of draws
        #[arg(long)]
        draws: Option<usize>,
        /// Override the configured simulation seed
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run clean, fit, and predict end to end
    Run {
        #[arg(long, default_value = "data/raw_data/president_polls.csv")]
        input: PathBuf,
        #[arg(long, default_value = "data/analysis_data/analysis_data.csv")]
        cleaned: PathBuf,
        #[arg(long, default_value = "models/linear_model.json")]
        model: PathBuf,
    },
}

fn main() -> Result<()> {
    logging::init_logging();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => ForecastConfig::load(path)?,
        None => ForecastConfig::default(),
    };

    match cli.command {
        Commands::Clean { input, output } => {
            run_clean(&config, &input, &output)?;
        }
        Commands::Fit {
            input,
            model,
            folds,
            seed,
        } => {
            let dataset = io::read_cleaned_dataset(&input)?;
            run_fit(&config, &dataset, &model, folds, seed)?;
        }
        Commands::Predict { model, input } => {
            let dataset = io::read_cleaned_dataset(&input)?;
            run_predict(&model, &dataset)?;
        }
        Commands::Simulate {
            model,
            output,
            draws,
            seed,
        } => {
            let artifact = ModelArtifact::load(&model)?;
            let mut sim_config = config.simulation.clone();
            if let Some(draws) = draws {
                sim_config.draws = draws;
            }
            if let Some(seed) = seed {
                sim_config.seed = seed;
            }

            let (draws, summary) = simulate::simulate(&artifact.coefficients, &sim_config)?;
            println!("\n🎲 Simulation over {} draws:", draws.len());
            println!("   Mean predicted Trump vote share: {:.3}", summary.mean);
            println!("   Standard deviation: {:.3}", summary.std_dev);
            println!(
                "   95% confidence interval: {:.3}, {:.3}",
                summary.ci_low, summary.ci_high
            );

            if let Some(output) = output {
                io::write_simulated_draws(&output, &draws)?;
                println!("   Output file: {}", output.display());
            }
        }
        Commands::Run {
            input,
            cleaned,
            model,
        } => {
            println!("🔄 Running full forecast pipeline...");
            let dataset = run_clean(&config, &input, &cleaned)?;
            run_fit(&config, &dataset, &model, None, None)?;
            run_predict(&model, &dataset)?;
        }
    }

    Ok(())
}

fn run_clean(
    config: &ForecastConfig,
    input: &Path,
    output: &Path,
) -> Result<Vec<CleanedObservation>> {
    let records = io::read_raw_polls(input)?;
    let dataset = pipeline::clean_polls(&records, &config.candidates)?;
    io::write_cleaned_dataset(output, &dataset)?;

    println!("\n📊 Cleaning results:");
    println!("   Raw rows: {}", records.len());
    println!("   Valid polls: {}", dataset.len());
    println!("   Output file: {}", output.display());
    Ok(dataset)
}

fn run_fit(
    config: &ForecastConfig,
    dataset: &[CleanedObservation],
    model_path: &Path,
    folds: Option<usize>,
    seed: Option<u64>,
) -> Result<()> {
    let folds = folds.unwrap_or(config.cross_validation.folds);
    let seed = seed.unwrap_or(config.cross_validation.seed);

    let report = model::cross_validate(dataset, folds, seed)?;
    println!("\n📈 Cross-validation ({} folds, seed {}):", folds, seed);
    for fold in &report.folds {
        println!("   Fold {}: MSE = {}", fold.fold, fold.mse);
    }
    println!("   Average MSE over {} folds: {}", folds, report.average_mse);

    let fit = model::fit(dataset)?;
    if fit.ill_conditioned {
        warn!("final fit is ill-conditioned");
        println!("⚠️  Design matrix is near-singular; treat coefficients with suspicion");
    }

    let artifact = ModelArtifact::from_fit(&fit);
    artifact.save(model_path)?;
    info!(path = %model_path.display(), observations = fit.observations, "saved model artifact");
    println!("   Final model saved to {}", model_path.display());
    Ok(())
}

fn run_predict(model_path: &Path, dataset: &[CleanedObservation]) -> Result<()> {
    let artifact = ModelArtifact::load(model_path)?;
    if artifact.ill_conditioned {
        println!("⚠️  Model artifact was flagged ill-conditioned when fitted");
    }

    let means = predict::predictor_means(dataset)?;
    let predicted = predict::point_prediction(&artifact.coefficients, &means);
    println!(
        "\nThe predicted scaled Trump vote share is: {:.3}",
        predicted
    );
    Ok(())
}
