// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between raw WTS annotation files and the list of
// LLaVA conversation records:
//
//   <split>/<scene>/environment/<scene>.json
//       │
//       ▼
//   AnnotationLoader   → parses scene records, skips missing files
//       │
//       ▼
//   format_question    → "<video> \n Q \n A: .. \n B: .. \n "
//       │
//       ▼
//   build_conversation → human/gpt turns + metadata
//       │
//       ▼
//   DatasetAssembler   → videos × questions, ordered, per subset
//
// Each step lives in its own module and is tested on its own.

/// Reads scene annotation files from a split directory
pub mod loader;

/// Renders one raw MCQ record as prompt text
pub mod formatter;

/// Wraps a prompt and answer into a conversation record
pub mod builder;

/// Iterates scenes and produces the ordered record list
pub mod assembler;
