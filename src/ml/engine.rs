// ============================================================
// Layer 5 — Generation Engine (OpenAI-compatible server)
// ============================================================
// The model itself runs out of process, e.g.
//
//   vllm serve nvidia/Cosmos-Reason2-2B --limit-mm-per-prompt '{"video": 1}'
//
// and this client sends one chat completion per video:
//
//   messages:
//     system: <system prompt>
//     user:   [ {type: video_url, video_url: {url}}, {type: text, text} ]
//   mm_processor_kwargs: { fps, total_pixels, ... }
//   temperature / seed / max_tokens from SamplingSettings
//
// The engine is created once per batch and reused for every video.

use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

use crate::domain::generation::GenerationRequest;
use crate::domain::traits::GenerationEngine;

/// Connection settings for an OpenAI-compatible chat endpoint
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Base URL including the API version, e.g. `http://localhost:8000/v1`
    pub base_url: String,
    pub model:    String,
    pub api_key:  Option<String>,
    pub timeout:  Duration,
}

pub struct OpenAiCompatEngine {
    config: EngineConfig,
    client: reqwest::blocking::Client,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiCompatEngine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to create HTTP client")?;

        tracing::info!("Using model {} at {}", config.model, config.base_url);
        Ok(Self { config, client })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    fn request_body(&self, req: &GenerationRequest<'_>) -> Value {
        json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": req.system_prompt },
                {
                    "role": "user",
                    "content": [
                        { "type": "video_url", "video_url": { "url": req.video_url } },
                        { "type": "text", "text": req.user_prompt }
                    ]
                }
            ],
            "temperature": req.sampling.temperature,
            "seed": req.sampling.seed,
            "max_tokens": req.sampling.max_tokens,
            "mm_processor_kwargs": req.vision,
        })
    }
}

impl GenerationEngine for OpenAiCompatEngine {
    fn generate(&self, request: &GenerationRequest<'_>) -> Result<String> {
        let mut http = self.client.post(self.endpoint()).json(&self.request_body(request));
        if let Some(key) = &self.config.api_key {
            http = http.bearer_auth(key);
        }

        let response = http
            .send()
            .with_context(|| format!("Request to {} failed", self.endpoint()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            bail!("Engine returned {status}: {body}");
        }

        let parsed: ChatResponse = response.json().context("Malformed chat completion")?;
        first_choice_text(parsed)
    }
}

/// Trimmed content of the first choice
fn first_choice_text(response: ChatResponse) -> Result<String> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("Chat completion has no choices"))?;

    Ok(choice.message.content.unwrap_or_default().trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::generation::{SamplingSettings, VisionSettings};

    fn engine() -> OpenAiCompatEngine {
        OpenAiCompatEngine::new(EngineConfig {
            base_url: "http://localhost:8000/v1/".into(),
            model:    "nvidia/Cosmos-Reason2-2B".into(),
            api_key:  None,
            timeout:  Duration::from_secs(5),
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_trims_slash() {
        assert_eq!(engine().endpoint(), "http://localhost:8000/v1/chat/completions");
    }

    #[test]
    fn test_request_body_shape() {
        let vision   = VisionSettings::default();
        let sampling = SamplingSettings::default();
        let req = GenerationRequest {
            system_prompt: "sys",
            user_prompt:   "rate it",
            video_url:     "https://h/v.mp4",
            vision:        &vision,
            sampling:      &sampling,
        };

        let body = engine().request_body(&req);
        assert_eq!(body["model"], "nvidia/Cosmos-Reason2-2B");
        assert_eq!(body["messages"][0]["content"], "sys");
        assert_eq!(body["messages"][1]["content"][0]["video_url"]["url"], "https://h/v.mp4");
        assert_eq!(body["messages"][1]["content"][1]["text"], "rate it");
        assert_eq!(body["temperature"], 0.0);
        assert_eq!(body["seed"], 1);
        assert_eq!(body["max_tokens"], 2048);
        assert_eq!(body["mm_processor_kwargs"]["fps"], 16.0);
        assert!(body["mm_processor_kwargs"].get("max_frames").is_none());
    }

    #[test]
    fn test_first_choice_text() {
        let resp: ChatResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant", "content": "  3\n"}}]}"#,
        )
        .unwrap();
        assert_eq!(first_choice_text(resp).unwrap(), "3");
    }

    #[test]
    fn test_no_choices_is_error() {
        let resp: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(first_choice_text(resp).is_err());
    }
}
