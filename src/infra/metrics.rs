// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Appends one row per training run to a CSV file, so retraining
// on a changed dataset leaves a history of how the model did.
//
// Output file: artifacts/metrics.csv
//
// Example:
//   seed,n_estimators,train_rows,eval_rows,n_classes,n_features,accuracy
//   42,100,3936,984,41,172,1.000000
//   7,50,3936,984,41,172,0.998984
//
// An empty accuracy cell means nothing was held out.

use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use crate::error::Result;
use crate::ml::trainer::TrainingReport;

const HEADER: &str = "seed,n_estimators,train_rows,eval_rows,n_classes,n_features,accuracy";

/// Logs training-run metrics to a CSV file for later analysis.
pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create a logger for `dir`, writing the header if the file is new.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let csv_path = dir.join("metrics.csv");
        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)?;
            writeln!(f, "{HEADER}")?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    /// Append one run's metrics as a new row.
    pub fn log(&self, seed: u64, report: &TrainingReport) -> Result<()> {
        let mut f = OpenOptions::new().append(true).open(&self.csv_path)?;

        let accuracy = report
            .accuracy
            .map(|a| format!("{a:.6}"))
            .unwrap_or_default();

        writeln!(
            f,
            "{},{},{},{},{},{},{}",
            seed,
            report.n_trees,
            report.train_rows,
            report.eval_rows,
            report.n_classes,
            report.n_features,
            accuracy,
        )?;

        tracing::debug!("Logged training metrics to '{}'", self.csv_path.display());
        Ok(())
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}
