// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain structs and traits that define what the system talks
// about: dataset rows, ranked predictions, and the seams that
// other layers implement.
//
// Rules for this layer:
//   - NO file I/O
//   - NO model or vectorizer code
//   - Only plain Rust structs, enums, and traits

// One labelled row of the training dataset
pub mod record;

// A disease with its confidence percentage
pub mod prediction;

// Core abstractions (traits) that other layers implement
pub mod traits;
