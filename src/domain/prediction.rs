// ============================================================
// Layer 3 — Ranked Prediction
// ============================================================
// What the inference engine hands back to the presentation
// layer: a disease name and its probability as a percentage.
//
// Example:
//   RankedDisease { disease: "Flu", confidence: 87.0 }
//   → "Flu - 87% confidence"

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedDisease {
    /// A label from the closed set seen during training
    pub disease: String,

    /// Probability × 100, rounded to 2 decimal places. Range [0, 100].
    pub confidence: f64,
}

impl RankedDisease {
    /// Build an entry from a raw probability in [0, 1].
    pub fn from_probability(disease: impl Into<String>, probability: f64) -> Self {
        Self {
            disease: disease.into(),
            confidence: to_percent(probability),
        }
    }
}

impl fmt::Display for RankedDisease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}% confidence", self.disease, self.confidence)
    }
}

/// Convert a probability to a percentage with 2 decimals.
pub fn to_percent(probability: f64) -> f64 {
    (probability * 100.0 * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_rounds_to_two_decimals() {
        assert_eq!(to_percent(0.123456), 12.35);
        assert_eq!(to_percent(1.0), 100.0);
        assert_eq!(to_percent(0.0), 0.0);
    }

    #[test]
    fn test_display() {
        let r = RankedDisease::from_probability("Flu", 0.87);
        assert_eq!(r.to_string(), "Flu - 87% confidence");
    }
}
