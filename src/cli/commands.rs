// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Three subcommands:
//   train    — fit and persist the model from a CSV dataset
//   predict  — rank diseases for the given symptoms
//   symptoms — list the symptoms (or diseases) the model knows

use clap::{Args, Subcommand, ValueEnum};

use crate::application::train_use_case::TrainConfig;
use crate::ml::inferencer::DEFAULT_TOP_K;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the classifier on a labelled symptom dataset
    Train(TrainArgs),

    /// Rank likely diseases for a set of symptoms
    Predict(PredictArgs),

    /// List the symptoms (or diseases) known to a trained model
    Symptoms(SymptomsArgs),
}

#[derive(Args, Debug)]
pub struct TrainArgs {
    /// CSV file: first column disease, remaining columns symptoms
    #[arg(long, default_value = "cleaned_dataset.csv")]
    pub dataset: String,

    /// Directory to write the vectorizer, classifier and metadata to
    #[arg(long, default_value = "artifacts")]
    pub artifact_dir: String,

    /// Number of trees in the forest
    #[arg(long, default_value_t = 100)]
    pub n_estimators: usize,

    /// Seed for the train/eval split and the forest
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Share of rows held out for the accuracy report
    #[arg(long, default_value_t = 0.2)]
    pub eval_fraction: f64,

    /// Maximum tree depth (unlimited if omitted)
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Minimum samples a node needs before it may split
    #[arg(long, default_value_t = 2)]
    pub min_samples_split: usize,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            dataset_path: a.dataset,
            artifact_dir: a.artifact_dir,
            n_estimators: a.n_estimators,
            seed: a.seed,
            eval_fraction: a.eval_fraction,
            max_depth: a.max_depth,
            min_samples_split: a.min_samples_split,
        }
    }
}

#[derive(Args, Debug)]
pub struct PredictArgs {
    /// A symptom; repeat the flag for several (e.g. --symptom fever --symptom cough)
    #[arg(long = "symptom", short = 's', required = true)]
    pub symptoms: Vec<String>,

    /// Directory the model was trained into
    #[arg(long, default_value = "artifacts")]
    pub artifact_dir: String,

    /// How many diseases to list
    #[arg(long, default_value_t = DEFAULT_TOP_K)]
    pub top_k: usize,

    /// Also write a plain-text report to this path
    #[arg(long)]
    pub report: Option<String>,

    /// Patient name for the report
    #[arg(long, default_value = "")]
    pub name: String,

    /// Patient age for the report
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=120))]
    pub age: u8,

    /// Patient gender for the report
    #[arg(long, value_enum, default_value_t = Gender::Other)]
    pub gender: Gender,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Args, Debug)]
pub struct SymptomsArgs {
    /// Directory the model was trained into
    #[arg(long, default_value = "artifacts")]
    pub artifact_dir: String,

    /// List the diseases the model can rank instead of the symptoms
    #[arg(long)]
    pub diseases: bool,
}
