// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The seams between the pipelines and the outside world.
// Application code only sees these traits, so tests can swap
// in fakes for the filesystem, the dataset hub and the model
// server without touching the orchestration logic.

use anyhow::Result;

use crate::domain::generation::GenerationRequest;
use crate::domain::scene::Scene;
use crate::domain::video_sample::VideoSample;

// ─── SceneSource ──────────────────────────────────────────────────────────────
/// Any component that can produce parsed WTS scenes.
///
/// Implementations:
///   - AnnotationLoader → reads `<root>/<scene>/environment/<scene>.json`
pub trait SceneSource {
    /// Load every available scene, in a stable order.
    fn load_all(&self) -> Result<Vec<Scene>>;
}

// ─── VideoMetadataSource ──────────────────────────────────────────────────────
/// Any component that can list videos to score with their ground truth.
///
/// Implementations:
///   - HubRowsSource → pages through a hosted dataset's rows endpoint
///   - JsonlSource   → reads a local JSON-lines manifest
pub trait VideoMetadataSource {
    fn load(&self) -> Result<Vec<VideoSample>>;
}

// ─── GenerationEngine ─────────────────────────────────────────────────────────
/// An opaque vision-language model: one prompt in, generated text out.
///
/// Implementations:
///   - OpenAiCompatEngine → an OpenAI-compatible chat completions server
pub trait GenerationEngine {
    fn generate(&self, request: &GenerationRequest<'_>) -> Result<String>;
}
