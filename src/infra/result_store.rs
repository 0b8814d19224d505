// ============================================================
// Layer 6 — Score Result Store
// ============================================================
// One JSON file per scored video, named by its 1-based position
// in the dataset:
//
//   <output_dir>/1.json, 2.json, ...
//
// A file that already exists marks its video as done. This is
// what makes an interrupted batch resumable.

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::domain::video_sample::ScoreResult;
use crate::infra::dataset_store::to_pretty_json;

const RESULT_INDENT: &[u8] = b"  ";

pub struct ResultStore {
    dir: PathBuf,
}

impl ResultStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create output directory '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn path_for(&self, index: usize) -> PathBuf {
        self.dir.join(format!("{index}.json"))
    }

    /// True if a result for this position was written by an earlier run
    pub fn is_done(&self, index: usize) -> bool {
        self.path_for(index).exists()
    }

    pub fn save(&self, index: usize, result: &ScoreResult) -> Result<PathBuf> {
        let path = self.path_for(index);
        fs::write(&path, to_pretty_json(result, RESULT_INDENT)?)
            .with_context(|| format!("Cannot write result '{}'", path.display()))?;
        Ok(path)
    }

    pub fn load(&self, index: usize) -> Result<ScoreResult> {
        let path = self.path_for(index);
        let text = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read result '{}'", path.display()))?;
        Ok(serde_json::from_str(&text)?)
    }
}
