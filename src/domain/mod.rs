// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs, enums and traits describing what the
// system works with: WTS scenes and their multiple-choice
// questions, LLaVA conversation records, and the video samples
// scored by the plausibility pipeline.
//
// Rules for this layer:
//   - NO file I/O or network calls
//   - NO serde_json/reqwest plumbing beyond derive macros
//   - Only data types, small pure helpers, and traits
//
// Everything that touches the disk or the network implements
// one of the traits in traits.rs from Layer 4 (data) or
// Layer 6 (infra).

// A parsed scene annotation and its raw MCQ records
pub mod scene;

// The two-turn LLaVA training record
pub mod conversation;

// Samples, results and request settings for the scoring pipeline
pub mod video_sample;
pub mod generation;

// Typed errors raised by domain validation
pub mod error;

// Core abstractions (traits) that other layers implement
pub mod traits;
