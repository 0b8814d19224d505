// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap, hands a config to the matching
// use case, and prints the summary it returns. No business
// logic lives here.

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, PreprocessArgs, ScoreArgs};

#[derive(Parser, Debug)]
#[command(
    name = "vlm-dataset-tools",
    version,
    about = "Prepare WTS environment MCQ data for VLM fine-tuning and score videos for physical plausibility."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Preprocess(args) => run_preprocess(args),
            Commands::Score(args)      => run_score(args),
        }
    }
}

fn run_preprocess(args: PreprocessArgs) -> Result<()> {
    use crate::application::preprocess_use_case::PreprocessUseCase;

    let summary = PreprocessUseCase::new(args.into()).execute()?;

    println!("\n{}", "=".repeat(60));
    println!("WTS annotation processing complete");
    println!("{}", "=".repeat(60));
    for s in &summary.splits {
        println!("   {:<6} {:>8} records  → {}", s.split, s.records, s.path.display());
    }
    println!("   {:<6} {:>8} records", "total", summary.total());
    Ok(())
}

fn run_score(args: ScoreArgs) -> Result<()> {
    use crate::application::score_use_case::ScoreUseCase;

    tracing::info!("Scoring videos with model {}", args.model);
    let summary = ScoreUseCase::new(args.into()).execute()?;

    println!("\nBatch processing completed. Results saved to: {}", summary.output_dir.display());
    println!(
        "   {} videos: {} processed, {} skipped, {} failed, {} with a score",
        summary.total, summary.processed, summary.skipped, summary.failed, summary.scored
    );
    if let Some(mae) = summary.mean_abs_error {
        println!("   Mean absolute error vs ground truth: {mae:.3}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::score_use_case::ScoreConfig;

    #[test]
    fn test_preprocess_requires_data_path() {
        assert!(Cli::try_parse_from(["vlm-dataset-tools", "preprocess"]).is_err());

        let cli = Cli::try_parse_from([
            "vlm-dataset-tools", "preprocess", "--data-path", "/data/wts", "--strict-labels",
        ])
        .unwrap();
        match cli.command {
            Commands::Preprocess(args) => {
                assert_eq!(args.data_path, "/data/wts");
                assert!(args.strict_labels);
                assert!(!args.skip_invalid_scenes);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_score_defaults_map_to_config() {
        let cli = Cli::try_parse_from(["vlm-dataset-tools", "score", "--max-frames", "64"]).unwrap();
        let Commands::Score(args) = cli.command else {
            panic!("expected score command");
        };

        let cfg: ScoreConfig = args.into();
        assert_eq!(cfg.split, "test");
        assert_eq!(cfg.vision.fps, 16.0);
        assert_eq!(cfg.vision.total_pixels, Some(6_422_528));
        assert_eq!(cfg.vision.max_frames, Some(64));
        assert_eq!(cfg.sampling.seed, 1);
        assert_eq!(cfg.sampling.temperature, 0.0);
    }
}
