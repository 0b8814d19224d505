// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers for each command:
//
//   preprocess_use_case.rs : WTS annotations → LLaVA datasets
//   score_use_case.rs      : videos → plausibility scores
//
// Rules for this layer:
//   - No prompt formatting or HTTP details here
//   - No printing (that's Layer 1); return summaries instead
//   - Only workflow coordination and failure policy

// The dataset reformatting workflow
pub mod preprocess_use_case;

// The plausibility scoring workflow
pub mod score_use_case;
