// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers to accomplish one goal each.
//
// Rules for this layer:
//   - No model math here
//   - No printing here (that's Layer 1)
//   - Only workflow coordination and error context

// The offline training workflow
pub mod train_use_case;

// The symptom ranking workflow
pub mod predict_use_case;
