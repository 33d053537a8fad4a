// ============================================================
// Layer 4 — Dataset Loader
// ============================================================
// Reads the labelled symptom dataset from a CSV file.
//
// Expected layout (header row present):
//
//   Disease,Symptom_1,Symptom_2,Symptom_3
//   Flu,fever,cough,None
//   Cold,sneeze,None,None
//
//   - column 0   → disease label
//   - column 1.. → symptom slots, fixed width for every row
//
// Any deviation (ragged rows, no symptom columns, blank label)
// is a DataFormat error. The loader never returns a partial
// dataset: one bad row fails the whole load.
//
// Reference: csv crate documentation
//            Rust Book §9 (Error Handling)

use std::io::Read;
use std::path::PathBuf;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::data::preprocessor::normalize_token;
use crate::domain::record::DatasetRecord;
use crate::domain::traits::DatasetSource;
use crate::error::{Result, SymptomError};

/// Loads dataset records from a CSV file on disk.
pub struct CsvDatasetLoader {
    path: PathBuf,
}

impl CsvDatasetLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DatasetSource for CsvDatasetLoader {
    fn load_all(&self) -> Result<Vec<DatasetRecord>> {
        let file = std::fs::File::open(&self.path).map_err(|e| {
            SymptomError::data_format(format!(
                "cannot open dataset '{}': {e}",
                self.path.display()
            ))
        })?;

        let records = read_records(file)?;
        tracing::info!(
            "Loaded {} records from '{}'",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }
}

/// Parse dataset records from any CSV reader.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<DatasetRecord>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| SymptomError::data_format(format!("cannot read header row: {e}")))?
        .clone();
    validate_headers(&headers)?;

    let mut records = Vec::new();
    for (i, row) in csv_reader.records().enumerate() {
        // Header is line 1, so data row i sits on line i + 2
        let line = i + 2;
        let row = row.map_err(|e| {
            SymptomError::data_format(format!("line {line}: {e}"))
        })?;
        records.push(parse_row(&row, line)?);
    }

    if records.is_empty() {
        return Err(SymptomError::data_format("dataset has no data rows"));
    }

    Ok(records)
}

fn validate_headers(headers: &StringRecord) -> Result<()> {
    match headers.get(0) {
        None => Err(SymptomError::data_format("missing header row")),
        Some(label) if label.is_empty() => {
            Err(SymptomError::data_format("label column has no header"))
        }
        Some(_) if headers.len() < 2 => Err(SymptomError::data_format(
            "dataset needs a label column and at least one symptom column",
        )),
        Some(_) => Ok(()),
    }
}

fn parse_row(row: &StringRecord, line: usize) -> Result<DatasetRecord> {
    let disease = row.get(0).unwrap_or_default();
    if disease.is_empty() {
        return Err(SymptomError::data_format(format!(
            "line {line}: disease label is empty"
        )));
    }

    let symptoms = row.iter().skip(1).map(normalize_token).collect();
    Ok(DatasetRecord::new(disease, symptoms))
}
