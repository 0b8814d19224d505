// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Disk and network concerns shared by the two pipelines:
//
//   dataset_store.rs   : Writes/reads the per-split LLaVA JSON
//                        files (4-space pretty JSON, overwrite).
//
//   prompt_config.rs   : Loads system/user prompts for scoring
//                        from YAML; a missing user prompt is
//                        fatal.
//
//   result_store.rs    : One JSON file per scored video; an
//                        existing file means "already done".
//
//   metadata_source.rs : Lists videos to score, either from a
//                        hosted dataset's rows endpoint or a
//                        local JSON-lines manifest.

/// Per-split dataset file persistence
pub mod dataset_store;

/// Scoring prompt configuration (YAML)
pub mod prompt_config;

/// Resumable per-video score results
pub mod result_store;

/// Video metadata for the scoring pipeline
pub mod metadata_source;
