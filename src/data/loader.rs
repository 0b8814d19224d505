// ============================================================
// Layer 4 — Annotation Loader
// ============================================================
// Loads WTS environment annotations from a split directory.
//
// Expected layout:
//
//   <root>/
//     <scene>/
//       environment/<scene>.json    ← read
//       overhead_view/<video>.mp4   ← only referenced, never opened
//     normal_trimmed/               ← nested subset, skipped here
//
// Scene directories are visited in sorted order so repeated runs
// over the same tree produce identical datasets.
//
// Failure policy:
//   - missing root directory       → warn, no scenes
//   - missing annotation file      → warn, skip scene
//   - malformed / incomplete JSON  → error (or warn + skip when
//                                    skip_invalid is set)

use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::domain::error::AnnotationError;
use crate::domain::scene::{Scene, SceneRecord, NORMAL_TRIMMED_DIR};
use crate::domain::traits::SceneSource;

/// Loads every scene under one split directory.
pub struct AnnotationLoader {
    root:         PathBuf,
    skip_invalid: bool,
}

impl AnnotationLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), skip_invalid: false }
    }

    /// Treat structurally invalid scene files as skippable instead of fatal
    pub fn skip_invalid(mut self, skip: bool) -> Self {
        self.skip_invalid = skip;
        self
    }

    /// Sorted names of candidate scene directories
    fn scene_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();

        for entry in fs::read_dir(&self.root)
            .with_context(|| format!("Cannot read directory '{}'", self.root.display()))?
        {
            let entry = entry?;
            if !entry.path().is_dir() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            if name.contains(NORMAL_TRIMMED_DIR) {
                continue;
            }
            names.push(name);
        }

        names.sort();
        Ok(names)
    }
}

impl SceneSource for AnnotationLoader {
    fn load_all(&self) -> Result<Vec<Scene>> {
        if !self.root.is_dir() {
            tracing::warn!(
                "Annotation directory '{}' does not exist, no scenes loaded",
                self.root.display()
            );
            return Ok(Vec::new());
        }

        let mut scenes = Vec::new();

        for name in self.scene_names()? {
            let path = annotation_path(&self.root, &name);

            if !path.exists() {
                tracing::warn!("Environment file not found for {}", name);
                continue;
            }

            match load_scene_file(&path) {
                Ok(record) => {
                    tracing::debug!(
                        "Loaded scene {} ({} videos, {} questions)",
                        name,
                        record.overhead_videos.len(),
                        record.environment.len()
                    );
                    scenes.push(Scene { name, record });
                }
                Err(e) if self.skip_invalid => {
                    tracing::warn!("Skipping scene '{}': {:#}", name, e);
                }
                Err(e) => return Err(e),
            }
        }

        tracing::info!(
            "Loaded {} scenes from '{}'",
            scenes.len(),
            self.root.display()
        );
        Ok(scenes)
    }
}

/// `<root>/<name>/environment/<name>.json`
pub fn annotation_path(root: &Path, name: &str) -> PathBuf {
    root.join(name).join("environment").join(format!("{name}.json"))
}

/// Parse one annotation file. Only the first array element is read;
/// anything after it is ignored without being validated.
fn load_scene_file(path: &Path) -> Result<SceneRecord> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Cannot read '{}'", path.display()))?;

    let elements: Vec<serde_json::Value> = serde_json::from_str(&text)
        .with_context(|| format!("Malformed annotation JSON in '{}'", path.display()))?;

    let first = elements
        .into_iter()
        .next()
        .ok_or_else(|| AnnotationError::EmptyAnnotation { path: path.to_path_buf() })?;

    serde_json::from_value(first)
        .with_context(|| format!("Incomplete scene record in '{}'", path.display()))
}
