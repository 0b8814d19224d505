// ============================================================
// Layer 3 — Video Sample Types
// ============================================================
// Input and output records of the scoring pipeline: a video to
// score with its human rating, and the result written for it.

use serde::{Deserialize, Serialize};

/// A video to score, with its human-rated physical correctness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoSample {
    pub video_url:    String,
    pub ground_truth: f64,
}

impl VideoSample {
    pub fn new(video_url: impl Into<String>, ground_truth: f64) -> Self {
        Self { video_url: video_url.into(), ground_truth }
    }
}

/// Per-video output written by the scoring batch.
///
/// `pred_score` is `null` when no score could be extracted from
/// the generated text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub video_url:    String,
    pub ground_truth: f64,
    pub output_text:  String,
    pub pred_score:   Option<f64>,
}

impl ScoreResult {
    /// Absolute difference between prediction and ground truth
    pub fn abs_error(&self) -> Option<f64> {
        self.pred_score.map(|p| (p - self.ground_truth).abs())
    }
}
