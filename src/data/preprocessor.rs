// ============================================================
// Layer 4 — Symptom Encoding Convention
// ============================================================
// The one place that decides how a symptom set becomes text.
// The trainer and the inference engine both call into here,
// so a row in the CSV and a user's selection are turned into
// strings in exactly the same way before they reach the
// vectorizer.
//
// Conventions:
//   1. A slot holding a missing marker ("none", "nan", blank)
//      is no symptom at all, never the word "none".
//   2. Tokens are cleaned character by character: tabs,
//      non-breaking spaces and control characters become
//      spaces; runs of spaces collapse to one; edges trimmed;
//      everything lowercased.
//   3. Present symptoms are joined with a single space, in
//      the order given.
//
// Reference: Rust Book §8 (Strings in Rust)

/// Separator placed between symptoms when building the text
pub const JOINER: &str = " ";

/// Slot values that mean "no symptom" (compared after normalisation)
pub const MISSING_MARKERS: [&str; 3] = ["", "none", "nan"];

/// Normalise one raw symptom token.
///
/// Returns an empty string for missing markers, so callers
/// can drop the slot with a simple `is_empty()` check.
pub fn normalize_token(raw: &str) -> String {
    let mapped: String = raw
        .chars()
        .map(|c| match c {
            '\u{00A0}' | '\u{200B}' | '\u{FEFF}' => ' ',
            c if c.is_whitespace() || c.is_control() => ' ',
            c => c,
        })
        .collect();

    let collapsed = mapped
        .split(' ')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    if is_missing(&collapsed) {
        String::new()
    } else {
        collapsed
    }
}

/// True if an already-normalised value is a missing marker
pub fn is_missing(normalized: &str) -> bool {
    MISSING_MARKERS.contains(&normalized)
}

/// Join present symptoms into the text the vectorizer sees.
/// Empty slots are skipped so they never add stray separators.
pub fn join_symptoms<I, S>(symptoms: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    symptoms
        .into_iter()
        .filter(|s| !s.as_ref().is_empty())
        .map(|s| s.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(JOINER)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_markers_become_empty() {
        assert_eq!(normalize_token("None"), "");
        assert_eq!(normalize_token("  NONE "), "");
        assert_eq!(normalize_token("nan"), "");
        assert_eq!(normalize_token("   "), "");
    }

    #[test]
    fn test_normalises_case_and_whitespace() {
        assert_eq!(normalize_token("  Skin\tRash "), "skin rash");
        assert_eq!(normalize_token("high\u{00A0}\u{00A0}fever"), "high fever");
        assert_eq!(normalize_token("Cough"), "cough");
    }

    #[test]
    fn test_none_inside_a_token_is_kept() {
        assert_eq!(normalize_token("nonexistent_pain"), "nonexistent_pain");
    }

    #[test]
    fn test_join_skips_empty_slots() {
        let slots = vec!["fever", "", "cough", ""];
        assert_eq!(join_symptoms(slots), "fever cough");
    }

    #[test]
    fn test_join_empty_input() {
        let slots: Vec<String> = Vec::new();
        assert_eq!(join_symptoms(slots), "");
    }
}
