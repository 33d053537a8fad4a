// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and routes each subcommand to its
// use case. Printing happens here and nowhere else.
//
//   train    → TrainUseCase
//   predict  → PredictUseCase (+ optional text report)
//   symptoms → ArtifactStore::load_vocabulary (or engine classes)

pub mod commands;

pub mod report;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{Commands, PredictArgs, SymptomsArgs, TrainArgs};

use crate::application::{predict_use_case::PredictUseCase, train_use_case::TrainUseCase};
use crate::infra::checkpoint::ArtifactStore;
use crate::ml::inferencer::InferenceEngine;
use report::{render_report, write_report, PatientDetails};

#[derive(Parser, Debug)]
#[command(
    name = "symptom-checker",
    version,
    about = "Rank likely diseases from a set of symptoms. Informational only, not medical advice."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args) => run_train(args),
            Commands::Predict(args) => run_predict(args),
            Commands::Symptoms(args) => run_symptoms(args),
        }
    }
}

fn run_train(args: TrainArgs) -> Result<()> {
    tracing::info!("Starting training on dataset: {}", args.dataset);

    let artifact_dir = args.artifact_dir.clone();
    let report = TrainUseCase::new(args.into()).execute()?;

    match report.accuracy {
        Some(acc) => println!("Model Accuracy: {acc:.2}"),
        None => println!("Model Accuracy: n/a (no rows held out)"),
    }
    println!("Model & vectorizer saved to '{artifact_dir}'");
    Ok(())
}

fn run_predict(args: PredictArgs) -> Result<()> {
    let use_case = PredictUseCase::from_artifact_dir(&args.artifact_dir, args.top_k)?;
    let ranked = use_case.predict(&args.symptoms)?;

    println!("Possible Diseases (Ranked by Probability):");
    for r in &ranked {
        println!("  - {r}");
    }

    if let Some(path) = &args.report {
        let patient = PatientDetails {
            name: args.name.clone(),
            age: args.age,
            gender: args.gender,
        };
        let text = render_report(&patient, &args.symptoms, &ranked);
        write_report(path, &text)?;
        println!("Report saved to '{path}'");
    }

    println!("\nThis tool is for informational purposes only. Consult a doctor for medical advice.");
    Ok(())
}

fn run_symptoms(args: SymptomsArgs) -> Result<()> {
    let store = ArtifactStore::new(&args.artifact_dir);

    if args.diseases {
        let engine = InferenceEngine::try_load(&store).context("Cannot list diseases")?;
        for disease in engine.classes()? {
            println!("{disease}");
        }
        return Ok(());
    }

    let vocabulary = store.load_vocabulary().context("Cannot list symptoms")?;

    for symptom in vocabulary.iter() {
        println!("{symptom}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_repeated_symptoms() {
        let cli = Cli::try_parse_from([
            "symptom-checker",
            "predict",
            "-s",
            "fever",
            "--symptom",
            "cough",
            "--top-k",
            "2",
        ])
        .unwrap();
        match cli.command {
            Commands::Predict(args) => {
                assert_eq!(args.symptoms, vec!["fever", "cough"]);
                assert_eq!(args.top_k, 2);
                assert!(args.report.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_predict_requires_a_symptom() {
        assert!(Cli::try_parse_from(["symptom-checker", "predict"]).is_err());
    }

    #[test]
    fn test_symptoms_diseases_flag() {
        let cli = Cli::try_parse_from(["symptom-checker", "symptoms", "--diseases"]).unwrap();
        match cli.command {
            Commands::Symptoms(args) => {
                assert!(args.diseases);
                assert_eq!(args.artifact_dir, "artifacts");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_train_defaults() {
        let cli = Cli::try_parse_from(["symptom-checker", "train"]).unwrap();
        match cli.command {
            Commands::Train(args) => {
                let cfg: crate::application::train_use_case::TrainConfig = args.into();
                assert_eq!(cfg.n_estimators, 100);
                assert_eq!(cfg.seed, 42);
                assert_eq!(cfg.eval_fraction, 0.2);
                assert_eq!(cfg.max_depth, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
