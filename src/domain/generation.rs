// ============================================================
// Layer 3 — Generation Request Types
// ============================================================
// What the scoring pipeline hands to a GenerationEngine: the
// prompts, one video reference, and the vision/sampling knobs.
// The engine decides how to ship these over the wire.

use serde::{Deserialize, Serialize};

use crate::domain::error::SettingsError;

/// Default pixel budget for a whole video (8192 patches of 28x28)
pub const DEFAULT_TOTAL_PIXELS: u64 = 8192 * 28 * 28;

/// Frame sampling and resolution limits for video inputs.
/// Unset limits are left to the engine and are not serialised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisionSettings {
    pub fps: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pixels: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_pixels: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_frames: Option<u32>,
}

impl Default for VisionSettings {
    fn default() -> Self {
        Self {
            fps:          16.0,
            total_pixels: Some(DEFAULT_TOTAL_PIXELS),
            max_pixels:   None,
            max_frames:   None,
        }
    }
}

impl VisionSettings {
    /// Reject settings no engine could honour.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.fps.is_finite() && self.fps > 0.0) {
            return Err(SettingsError::InvalidVision(format!(
                "fps must be positive, got {}",
                self.fps
            )));
        }
        for (name, value) in [("total_pixels", self.total_pixels), ("max_pixels", self.max_pixels)] {
            if value == Some(0) {
                return Err(SettingsError::InvalidVision(format!("{name} must be positive")));
            }
        }
        if self.max_frames == Some(0) {
            return Err(SettingsError::InvalidVision("max_frames must be positive".into()));
        }
        Ok(())
    }
}

/// Decoding parameters. Defaults give deterministic greedy decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingSettings {
    pub seed:        u64,
    pub temperature: f64,
    pub max_tokens:  u32,
}

impl Default for SamplingSettings {
    fn default() -> Self {
        Self { seed: 1, temperature: 0.0, max_tokens: 2048 }
    }
}

/// One multimodal prompt: system + user text and a single video.
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    pub system_prompt: &'a str,
    pub user_prompt:   &'a str,
    pub video_url:     &'a str,
    pub vision:        &'a VisionSettings,
    pub sampling:      &'a SamplingSettings,
}
