// ============================================================
// Layer 3 — Dataset Record
// ============================================================
// One row of the training dataset: a disease label plus a
// fixed number of symptom slots. Slots that were empty or held
// a missing marker in the CSV are stored as "" so every record
// of a dataset has exactly the same width.
//
// Example row (4 slots):
//   Flu | fever | cough | "" | ""

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRecord {
    /// The disease label (first CSV column)
    pub disease: String,

    /// Normalised symptom slots, in CSV column order.
    /// Missing slots are empty strings, never the word "none".
    pub symptoms: Vec<String>,
}

impl DatasetRecord {
    pub fn new(disease: impl Into<String>, symptoms: Vec<String>) -> Self {
        Self {
            disease: disease.into(),
            symptoms,
        }
    }

    /// Number of symptom slots, including empty ones
    pub fn width(&self) -> usize {
        self.symptoms.len()
    }

    /// Iterate the slots that actually name a symptom
    pub fn present_symptoms(&self) -> impl Iterator<Item = &str> {
        self.symptoms
            .iter()
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_symptoms_skips_empty_slots() {
        let r = DatasetRecord::new(
            "Flu",
            vec!["fever".into(), "".into(), "cough".into(), "".into()],
        );
        assert_eq!(r.width(), 4);
        assert_eq!(r.present_symptoms().collect::<Vec<_>>(), vec!["fever", "cough"]);
    }
}
