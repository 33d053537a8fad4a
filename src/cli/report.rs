// ============================================================
// Layer 1 — Plain-Text Report
// ============================================================
// A printable summary of one prediction: who asked, which
// symptoms they picked, and the ranked diseases. The core never
// sees any of this; the report is built purely from the ranked
// output plus the details typed on the command line.
//
// Layout:
//   title banner
//   Name / Age / Gender
//   Symptoms: comma separated
//   Disease | Confidence table (1 decimal)
//   disclaimer

use std::fmt::{self, Write as _};
use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::commands::Gender;
use crate::domain::prediction::RankedDisease;

const DISEASE_COL: usize = 40;
const CONFIDENCE_COL: usize = 12;
const DISCLAIMER: &str =
    "This tool is for informational purposes only. Consult a doctor for medical advice.";

#[derive(Debug, Clone)]
pub struct PatientDetails {
    pub name: String,
    pub age: u8,
    pub gender: Gender,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        };
        f.write_str(s)
    }
}

pub fn render_report(
    patient: &PatientDetails,
    symptoms: &[String],
    predictions: &[RankedDisease],
) -> String {
    let width = DISEASE_COL + CONFIDENCE_COL + 7;
    let rule = "=".repeat(width);
    let border = format!("+{}+{}+", "-".repeat(DISEASE_COL + 2), "-".repeat(CONFIDENCE_COL + 2));

    // fmt::Write into a String cannot fail
    let mut out = String::new();
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "{:^width$}", "AI Symptom Checker Report");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out);
    let _ = writeln!(out, "Name:   {}", patient.name);
    let _ = writeln!(out, "Age:    {}", patient.age);
    let _ = writeln!(out, "Gender: {}", patient.gender);
    let _ = writeln!(out);
    let _ = writeln!(out, "Symptoms:");
    let _ = writeln!(out, "{}", symptoms.join(", "));
    let _ = writeln!(out);
    let _ = writeln!(out, "Predicted Diseases:");
    let _ = writeln!(out, "{border}");
    let _ = writeln!(
        out,
        "| {:^dw$} | {:^cw$} |",
        "Disease",
        "Confidence",
        dw = DISEASE_COL,
        cw = CONFIDENCE_COL,
    );
    let _ = writeln!(out, "{border}");
    for p in predictions {
        let confidence = format!("{:.1}%", p.confidence);
        let _ = writeln!(
            out,
            "| {:<dw$} | {:^cw$} |",
            p.disease,
            confidence,
            dw = DISEASE_COL,
            cw = CONFIDENCE_COL,
        );
    }
    let _ = writeln!(out, "{border}");
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", DISCLAIMER);
    out
}

pub fn write_report(path: impl AsRef<Path>, contents: &str) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, contents)
        .with_context(|| format!("Cannot write report to '{}'", path.display()))?;
    tracing::info!("Report written to '{}'", path.display());
    Ok(())
}
