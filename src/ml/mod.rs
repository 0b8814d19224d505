// ============================================================
// Layer 5 — Model Layer
// ============================================================
// The only layer that knows how a vision-language model is
// reached and how its answers are read.
//
//   engine.rs       : GenerationEngine backed by an
//                     OpenAI-compatible chat completions server
//                     (vLLM, SGLang, ...). Model loading, video
//                     decoding and batching all happen there.
//
//   score_parser.rs : Pulls the 1-5 plausibility score out of
//                     the generated text.

/// HTTP client for an OpenAI-compatible generation server
pub mod engine;

/// Score extraction from generated text
pub mod score_parser;
