//! Diabetes prediction CLI.
//!
//! Trains a random-forest regressor over the patient table named by the
//! settings file, reports held-out metrics, and prints one ad-hoc
//! prediction.

use anyhow::{Context, Result};
use clap::Parser;
use diabetes_predictor::{
    run_pipeline, AppSettings, CsvRowSource, ForestConfig, PatientRecord, PipelineOptions,
    SplitSeed, DB_CONNECTION, DEFAULT_SEED,
};
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "diabetes-predict")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Train and evaluate a diabetes risk regressor", long_about = None)]
struct Args {
    /// Settings file carrying the DbConnection connection string
    #[arg(short, long, default_value = "settings.json")]
    settings: PathBuf,

    /// Fraction of records held out for evaluation, in (0, 1)
    #[arg(long, default_value = "0.2")]
    test_fraction: f64,

    /// Split seed; fixed by default so runs are reproducible
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Draw the split from OS entropy instead of --seed
    #[arg(long)]
    no_seed: bool,

    /// Number of trees in the forest
    #[arg(long, default_value = "100")]
    trees: usize,

    /// Maximum tree depth
    #[arg(long, default_value = "8")]
    max_depth: usize,

    /// Minimum samples per leaf
    #[arg(long, default_value = "2")]
    min_samples_leaf: usize,

    /// JSON file with a patient record to predict; a fixed sample record
    /// is used when absent
    #[arg(long)]
    predict_record: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("Diabetes prediction pipeline v{}", env!("CARGO_PKG_VERSION"));

    let settings = AppSettings::from_file(&args.settings)
        .context("Failed to load settings")?;
    let connection = settings.connection_string(DB_CONNECTION)?.to_string();
    info!("Row source: {}", connection);

    let seed = if args.no_seed {
        SplitSeed::Entropy
    } else {
        SplitSeed::Fixed(args.seed)
    };

    let options = PipelineOptions {
        test_fraction: args.test_fraction,
        seed,
        forest: ForestConfig {
            trees: args.trees,
            max_depth: args.max_depth,
            min_samples_leaf: args.min_samples_leaf,
            seed: args.seed,
        },
    };

    let source = CsvRowSource::new(&connection);
    let report = run_pipeline(&source, &options)?;

    match report.metrics {
        Some(metrics) => {
            println!("*************************************************");
            println!("*       Model quality metrics evaluation");
            println!("*------------------------------------------------");
            println!("*       RSquared Score:      {:.2}", metrics.r_squared);
            println!("*       Root Mean Squared Error:      {:.2}", metrics.rmse);
            println!("*************************************************");
        }
        None => warn!("No metrics: the held-out subset was empty"),
    }

    let patient = match &args.predict_record {
        Some(path) => read_patient(path)?,
        None => sample_patient(),
    };

    let prediction = report.predictor.predict(&patient)?;
    println!("Predicted diabetes value: {:.4}", prediction);

    Ok(())
}

fn read_patient(path: &PathBuf) -> Result<PatientRecord> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read patient record {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse patient record {}", path.display()))
}

/// Fixed ad-hoc record used when no --predict-record is given.
fn sample_patient() -> PatientRecord {
    PatientRecord {
        id: 0,
        pregnancies: 1.0,
        glucose: 120.0,
        blood_pressure: 81.0,
        skin_thickness: 26.0,
        insulin: 100.0,
        bmi: 30.1,
        diabetes_pedigree: 0.987,
        age: 42.0,
        diabetes_value: 0.0,
    }
}
