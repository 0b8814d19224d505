// ============================================================
// Layer 2 — ScoreUseCase
// ============================================================
// Scores every video of a dataset for physical plausibility:
//
//   Step 1: Load video metadata                  (infra - metadata source)
//   Step 2: Prepare output dir + prompt config   (infra, fatal on error)
//   Step 3: Validate vision settings             (domain)
//   Step 4: Acquire the generation engine        (ml)
//   Step 5: For each video i (1-based):
//             skip if <out>/<i>.json exists
//             generate → parse score → write result
//             on error: log and continue
//   Step 6: Release the engine, report summary
//
// The engine is owned by a ScoreBatch that lives only for the
// duration of Step 5, so it is released when the batch ends.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use crate::domain::generation::{GenerationRequest, SamplingSettings, VisionSettings};
use crate::domain::traits::{GenerationEngine, VideoMetadataSource};
use crate::domain::video_sample::{ScoreResult, VideoSample};
use crate::infra::metadata_source::{HubRowsSource, JsonlSource};
use crate::infra::prompt_config::{executable_dir, resolve_prompt_path, PromptConfig};
use crate::infra::result_store::ResultStore;
use crate::ml::engine::{EngineConfig, OpenAiCompatEngine};
use crate::ml::score_parser::parse_score;

// ─── Score Configuration ─────────────────────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreConfig {
    /// Hosted dataset name
    pub dataset: String,
    pub split:   String,

    /// Local JSON-lines manifest; replaces the hosted dataset when set
    pub manifest: Option<String>,

    pub model:      String,
    pub input_file: String,
    pub output_dir: String,

    pub engine_url: String,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub timeout_secs: u64,

    pub vision:   VisionSettings,
    pub sampling: SamplingSettings,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            dataset:      "videophysics/videophy2_test".to_string(),
            split:        "test".to_string(),
            manifest:     None,
            model:        "nvidia/Cosmos-Reason2-2B".to_string(),
            input_file:   "prompts/video_reward.yaml".to_string(),
            output_dir:   "outputs/videophy2_test".to_string(),
            engine_url:   "http://localhost:8000/v1".to_string(),
            api_key:      None,
            timeout_secs: 600,
            vision:       VisionSettings::default(),
            sampling:     SamplingSettings::default(),
        }
    }
}

/// Outcome counts for one batch run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreSummary {
    pub total:     usize,
    /// Results written during this run
    pub processed: usize,
    /// Already present from an earlier run
    pub skipped:   usize,
    pub failed:    usize,
    /// Results (new or from an earlier run) with an extractable score
    pub scored:    usize,
    /// Mean |pred - ground_truth| over `scored`
    pub mean_abs_error: Option<f64>,
    pub output_dir: PathBuf,
}

// ─── ScoreUseCase ────────────────────────────────────────────────────────────
pub struct ScoreUseCase {
    config: ScoreConfig,
}

impl ScoreUseCase {
    pub fn new(config: ScoreConfig) -> Self {
        Self { config }
    }

    /// Run against the configured metadata source and HTTP engine.
    pub fn execute(&self) -> Result<ScoreSummary> {
        let source: Box<dyn VideoMetadataSource> = match &self.config.manifest {
            Some(path) => Box::new(JsonlSource::new(path)),
            None => Box::new(HubRowsSource::new(&self.config.dataset, &self.config.split)?),
        };

        self.run_with(source.as_ref(), || {
            let engine = OpenAiCompatEngine::new(EngineConfig {
                base_url: self.config.engine_url.clone(),
                model:    self.config.model.clone(),
                api_key:  self.config.api_key.clone(),
                timeout:  Duration::from_secs(self.config.timeout_secs),
            })?;
            Ok(Box::new(engine) as Box<dyn GenerationEngine>)
        })
    }

    /// Run the batch with an explicit source and engine constructor.
    /// The engine is only built once everything before it succeeded.
    pub fn run_with<F>(&self, source: &dyn VideoMetadataSource, make_engine: F) -> Result<ScoreSummary>
    where
        F: FnOnce() -> Result<Box<dyn GenerationEngine>>,
    {
        let cfg = &self.config;

        // ── Step 1: Video metadata ───────────────────────────────────────────
        let samples = source.load()?;
        tracing::info!("Found {} videos to process", samples.len());

        let output_dir = PathBuf::from(&cfg.output_dir);
        if samples.is_empty() {
            tracing::warn!("No videos to process");
            return Ok(ScoreSummary { output_dir, ..Default::default() });
        }

        // ── Step 2: Output dir and prompts ───────────────────────────────────
        let store  = ResultStore::new(&output_dir)?;
        let prompt_path = resolve_prompt_path(Path::new(&cfg.input_file), executable_dir().as_deref());
        let prompt      = PromptConfig::load(&prompt_path)?;
        tracing::info!("Using output directory: {}", output_dir.display());

        // ── Step 3: Vision settings ──────────────────────────────────────────
        cfg.vision.validate()?;

        // ── Step 4–6: Engine lifetime is the batch lifetime ──────────────────
        let batch = ScoreBatch {
            engine:   make_engine()?,
            prompt,
            vision:   cfg.vision.clone(),
            sampling: cfg.sampling.clone(),
            store,
        };
        let mut summary = batch.run(&samples);
        summary.output_dir = output_dir;

        tracing::info!("Batch processing completed. Results saved to: {}", summary.output_dir.display());
        Ok(summary)
    }
}

// ─── ScoreBatch ──────────────────────────────────────────────────────────────
/// Everything needed to score videos, including the one engine instance.
struct ScoreBatch {
    engine:   Box<dyn GenerationEngine>,
    prompt:   PromptConfig,
    vision:   VisionSettings,
    sampling: SamplingSettings,
    store:    ResultStore,
}

impl ScoreBatch {
    fn run(self, samples: &[VideoSample]) -> ScoreSummary {
        let total = samples.len();
        let mut summary = ScoreSummary { total, ..Default::default() };
        let mut abs_error_sum = 0.0;

        for (i, sample) in samples.iter().enumerate() {
            let index = i + 1;

            if self.store.is_done(index) {
                tracing::info!("[{}/{}] Results already exist: {}.json. Skipping...", index, total, index);
                summary.skipped += 1;

                // Earlier results still count towards the error summary
                match self.store.load(index) {
                    Ok(earlier) => {
                        if let Some(err) = earlier.abs_error() {
                            summary.scored += 1;
                            abs_error_sum += err;
                        }
                    }
                    Err(e) => tracing::warn!("Cannot reread {}.json: {:#}", index, e),
                }
                continue;
            }

            tracing::info!("[{}/{}] Processing: {}", index, total, sample.video_url);

            match self.score_one(index, sample) {
                Ok(result) => {
                    summary.processed += 1;
                    match result.abs_error() {
                        Some(err) => {
                            summary.scored += 1;
                            abs_error_sum += err;
                            tracing::info!("Saved results (score: {:?}) to {}.json", result.pred_score, index);
                        }
                        None => {
                            let preview: String = result.output_text.chars().take(200).collect();
                            tracing::info!("Saved results to {}.json", index);
                            tracing::info!("   Output: {}...", preview);
                        }
                    }
                }
                Err(e) => {
                    summary.failed += 1;
                    tracing::error!("Error processing video {}: {:?}", sample.video_url, e);
                }
            }
        }

        if summary.scored > 0 {
            summary.mean_abs_error = Some(abs_error_sum / summary.scored as f64);
        }
        summary
    }

    fn score_one(&self, index: usize, sample: &VideoSample) -> Result<ScoreResult> {
        let request = GenerationRequest {
            system_prompt: &self.prompt.system_prompt,
            user_prompt:   &self.prompt.user_prompt,
            video_url:     &sample.video_url,
            vision:        &self.vision,
            sampling:      &self.sampling,
        };

        let output_text = self.engine.generate(&request)?;
        let result = ScoreResult {
            video_url:    sample.video_url.clone(),
            ground_truth: sample.ground_truth,
            pred_score:   parse_score(&output_text).map(f64::from),
            output_text,
        };

        self.store.save(index, &result)?;
        Ok(result)
    }
}
