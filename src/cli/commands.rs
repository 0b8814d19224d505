// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Two subcommands:
//   preprocess : WTS environment annotations → LLaVA JSON
//   score      : physical plausibility scoring of videos
//
// Engine connection flags can also come from the environment
// (VLM_ENGINE_URL, VLM_ENGINE_API_KEY).

use clap::{Args, Subcommand};

use crate::application::preprocess_use_case::PreprocessConfig;
use crate::application::score_use_case::ScoreConfig;
use crate::domain::generation::{SamplingSettings, VisionSettings, DEFAULT_TOTAL_PIXELS};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert WTS environment MCQ annotations into LLaVA conversations
    Preprocess(PreprocessArgs),

    /// Score videos for physical plausibility with a served VLM
    Score(ScoreArgs),
}

#[derive(Args, Debug)]
pub struct PreprocessArgs {
    /// Dataset root containing annotations/vqa/{train,val}; outputs are written here
    #[arg(long)]
    pub data_path: String,

    /// Skip scenes with malformed annotation files instead of aborting
    #[arg(long)]
    pub skip_invalid_scenes: bool,

    /// Abort when an answer letter has no matching option
    #[arg(long)]
    pub strict_labels: bool,
}

impl From<PreprocessArgs> for PreprocessConfig {
    fn from(a: PreprocessArgs) -> Self {
        PreprocessConfig {
            data_path:           a.data_path,
            skip_invalid_scenes: a.skip_invalid_scenes,
            strict_labels:       a.strict_labels,
        }
    }
}

#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Hosted dataset name
    #[arg(long, default_value = "videophysics/videophy2_test")]
    pub dataset: String,

    /// Dataset split
    #[arg(long, default_value = "test")]
    pub split: String,

    /// Local JSON-lines manifest ({"video_url", "pc"} per line) used instead of --dataset
    #[arg(long)]
    pub manifest: Option<String>,

    /// Model name served by the engine
    #[arg(long, default_value = "nvidia/Cosmos-Reason2-2B")]
    pub model: String,

    /// Prompt YAML with system_prompt / user_prompt. A relative path is
    /// tried in the working directory, then beside the executable and its parents
    #[arg(long, default_value = "prompts/video_reward.yaml")]
    pub input_file: String,

    /// Directory for per-video JSON results
    #[arg(long, default_value = "outputs/videophy2_test")]
    pub output_dir: String,

    /// OpenAI-compatible base URL of the generation engine
    #[arg(long, env = "VLM_ENGINE_URL", default_value = "http://localhost:8000/v1")]
    pub engine_url: String,

    #[arg(long, env = "VLM_ENGINE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 600)]
    pub timeout_secs: u64,

    /// Frames per second sampled from each video
    #[arg(long, default_value_t = 16.0)]
    pub fps: f64,

    /// Pixel budget for the whole video
    #[arg(long, default_value_t = DEFAULT_TOTAL_PIXELS)]
    pub total_pixels: u64,

    #[arg(long)]
    pub max_pixels: Option<u64>,

    #[arg(long)]
    pub max_frames: Option<u32>,

    #[arg(long, default_value_t = 2048)]
    pub max_tokens: u32,
}

impl From<ScoreArgs> for ScoreConfig {
    fn from(a: ScoreArgs) -> Self {
        ScoreConfig {
            dataset:      a.dataset,
            split:        a.split,
            manifest:     a.manifest,
            model:        a.model,
            input_file:   a.input_file,
            output_dir:   a.output_dir,
            engine_url:   a.engine_url,
            api_key:      a.api_key,
            timeout_secs: a.timeout_secs,
            vision: VisionSettings {
                fps:          a.fps,
                total_pixels: Some(a.total_pixels),
                max_pixels:   a.max_pixels,
                max_frames:   a.max_frames,
            },
            sampling: SamplingSettings {
                max_tokens: a.max_tokens,
                ..SamplingSettings::default()
            },
        }
    }
}
