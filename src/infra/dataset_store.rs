// ============================================================
// Layer 6 — Dataset Store
// ============================================================
// Writes assembled conversation records as one JSON array per
// split:
//
//   <data_path>/
//     environment_mcq_llava_train.json
//     environment_mcq_llava_val.json
//
// Files are pretty-printed with 4-space indentation and fully
// overwritten on every run. There is no incremental merge.

use anyhow::{Context, Result};
use serde::Serialize;
use std::{fs, path::PathBuf};

use crate::domain::conversation::ConversationRecord;
use crate::domain::scene::Split;

/// Indentation of dataset files
const DATASET_INDENT: &[u8] = b"    ";

/// Saves and loads per-split dataset files in one directory.
pub struct DatasetStore {
    dir: PathBuf,
}

impl DatasetStore {
    /// Create the store, creating `dir` (like `mkdir -p`) if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create output directory '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    /// `<dir>/environment_mcq_llava_<split>.json`
    pub fn output_path(&self, split: Split) -> PathBuf {
        self.dir.join(format!("environment_mcq_llava_{split}.json"))
    }

    /// Serialise `records` and overwrite the split's file.
    pub fn save(&self, split: Split, records: &[ConversationRecord]) -> Result<PathBuf> {
        let path  = self.output_path(split);
        let bytes = to_pretty_json(&records, DATASET_INDENT)?;

        fs::write(&path, bytes)
            .with_context(|| format!("Cannot write dataset to '{}'", path.display()))?;

        tracing::debug!("Wrote {} records to '{}'", records.len(), path.display());
        Ok(path)
    }

    /// Read a previously written split back.
    #[cfg(test)]
    pub fn load(&self, split: Split) -> Result<Vec<ConversationRecord>> {
        let path = self.output_path(split);
        let text = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read dataset '{}'", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Malformed dataset file '{}'", path.display()))
    }
}

/// Pretty-print `value` with a custom indent and no trailing newline.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T, indent: &[u8]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(buf)
}
