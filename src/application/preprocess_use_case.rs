// ============================================================
// Layer 2 — PreprocessUseCase
// ============================================================
// Builds the LLaVA environment-MCQ datasets for both splits:
//
//   for split in [train, val]:
//     Step 1: assemble <data>/annotations/vqa/<split>                (Subset::Main)
//     Step 2: assemble <data>/annotations/vqa/<split>/normal_trimmed (Subset::NormalTrimmed)
//     Step 3: concatenate and write environment_mcq_llava_<split>.json
//
// Output files land directly in <data> and replace any previous run.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::data::assembler::DatasetAssembler;
use crate::domain::conversation::ConversationRecord;
use crate::domain::scene::{Split, Subset, NORMAL_TRIMMED_DIR};
use crate::infra::dataset_store::DatasetStore;

// ─── Preprocess Configuration ────────────────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessConfig {
    /// Dataset root: holds `annotations/vqa/<split>` and receives the output files
    pub data_path: String,

    /// Warn and skip malformed scene files instead of aborting
    pub skip_invalid_scenes: bool,

    /// Abort on answers that reference a missing option
    pub strict_labels: bool,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            data_path:           "data/wts".to_string(),
            skip_invalid_scenes: false,
            strict_labels:       false,
        }
    }
}

/// Records written for one split
#[derive(Debug, Clone, PartialEq)]
pub struct SplitSummary {
    pub split:   Split,
    pub records: usize,
    pub path:    PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreprocessSummary {
    pub splits: Vec<SplitSummary>,
}

impl PreprocessSummary {
    pub fn total(&self) -> usize {
        self.splits.iter().map(|s| s.records).sum()
    }
}

// ─── PreprocessUseCase ───────────────────────────────────────────────────────
pub struct PreprocessUseCase {
    config: PreprocessConfig,
}

impl PreprocessUseCase {
    pub fn new(config: PreprocessConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<PreprocessSummary> {
        let cfg  = &self.config;
        let root = PathBuf::from(&cfg.data_path);

        fs::create_dir_all(&root)
            .with_context(|| format!("Cannot create data directory '{}'", root.display()))?;

        tracing::info!("Starting WTS annotations processing in '{}'", root.display());

        let assembler = DatasetAssembler::new(cfg.skip_invalid_scenes, cfg.strict_labels);
        let store     = DatasetStore::new(&root)?;
        let mut summary = PreprocessSummary::default();

        for split in Split::ALL {
            let records = self.build_split(&assembler, split)?;
            let path    = store.save(split, &records)?;

            tracing::info!("Saved {} split: {} records to '{}'", split, records.len(), path.display());
            summary.splits.push(SplitSummary { split, records: records.len(), path });
        }

        Ok(summary)
    }

    /// Main split directory followed by its nested trimmed subset
    fn build_split(
        &self,
        assembler: &DatasetAssembler,
        split:     Split,
    ) -> Result<Vec<ConversationRecord>> {
        let split_dir = PathBuf::from(&self.config.data_path)
            .join("annotations")
            .join("vqa")
            .join(split.as_str());

        let mut records = assembler.assemble(&split_dir, Subset::Main)?;
        records.extend(assembler.assemble(&split_dir.join(NORMAL_TRIMMED_DIR), Subset::NormalTrimmed)?);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_scene(split_dir: &Path, name: &str, videos: &[&str]) {
        let dir = split_dir.join(name).join("environment");
        fs::create_dir_all(&dir).unwrap();
        let body = json!([{
            "id": format!("{name}_wts"),
            "overhead_videos": videos,
            "environment": [
                {"question": "Weather?", "a": "sunny", "b": "rainy", "correct": "a"},
                {"question": "Light?", "a": "day", "b": "night", "correct": "b"}
            ]
        }]);
        fs::write(dir.join(format!("{name}.json")), body.to_string()).unwrap();
    }

    fn config(root: &Path) -> PreprocessConfig {
        PreprocessConfig {
            data_path: root.to_string_lossy().into_owned(),
            ..Default::default()
        }
    }

    #[test]
    fn test_both_splits_with_trimmed_subset() {
        let tmp   = TempDir::new().unwrap();
        let train = tmp.path().join("annotations/vqa/train");
        let val   = tmp.path().join("annotations/vqa/val");

        write_scene(&train, "scene_a", &["a1.mp4", "a2.mp4"]);
        write_scene(&train.join("normal_trimmed"), "trim_1", &["t.mp4"]);
        write_scene(&val, "scene_v", &["v.mp4"]);

        let summary = PreprocessUseCase::new(config(tmp.path())).execute().unwrap();
        assert_eq!(summary.splits[0].records, 6);
        assert_eq!(summary.splits[1].records, 2);
        assert_eq!(summary.total(), 8);

        let store = DatasetStore::new(tmp.path()).unwrap();
        let train_records = store.load(Split::Train).unwrap();
        assert_eq!(train_records[0].video, "scene_a/overhead_view/a1.mp4");
        assert_eq!(train_records[4].video, "normal_trimmed/trim_1/overhead_view/t.mp4");
        assert_eq!(train_records[4].wts_id, "trim_1_wts");

        let val_records = store.load(Split::Val).unwrap();
        assert_eq!(val_records[1].id, "v_1");
        assert_eq!(val_records[1].answer(), Some("B"));
    }

    #[test]
    fn test_missing_annotations_write_empty_datasets() {
        let tmp  = TempDir::new().unwrap();
        let root = tmp.path().join("fresh");

        let summary = PreprocessUseCase::new(config(&root)).execute().unwrap();
        assert_eq!(summary.total(), 0);
        assert!(root.join("environment_mcq_llava_train.json").exists());
        assert!(root.join("environment_mcq_llava_val.json").exists());
    }

    #[test]
    fn test_rerun_is_byte_identical() {
        let tmp = TempDir::new().unwrap();
        write_scene(&tmp.path().join("annotations/vqa/train"), "s", &["x.mp4"]);

        let use_case = PreprocessUseCase::new(config(tmp.path()));
        use_case.execute().unwrap();
        let first = fs::read(tmp.path().join("environment_mcq_llava_train.json")).unwrap();
        use_case.execute().unwrap();
        let second = fs::read(tmp.path().join("environment_mcq_llava_train.json")).unwrap();

        assert_eq!(first, second);
    }
}
