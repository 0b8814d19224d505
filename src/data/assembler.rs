// ============================================================
// Layer 4 — Dataset Assembler
// ============================================================
// Flattens scenes into an ordered list of conversation records:
//
//   for scene in scenes (sorted by directory name)
//     for video in scene.overhead_videos
//       for (cnt, question) in scene.environment   ← cnt restarts per video
//         id    = "<video stem>_<cnt>"
//         video = "[normal_trimmed/]<scene>/overhead_view/<video>"
//         record(type = "environment", phase = "full_video")
//
// Writing the result to disk is left to the caller.

use anyhow::Result;
use std::path::Path;

use crate::data::builder::build_conversation;
use crate::data::formatter::format_question;
use crate::data::loader::AnnotationLoader;
use crate::domain::conversation::ConversationRecord;
use crate::domain::error::AnnotationError;
use crate::domain::scene::{Scene, Subset};
use crate::domain::traits::SceneSource;

pub const ENVIRONMENT_TYPE: &str = "environment";
pub const FULL_VIDEO_PHASE: &str = "full_video";

/// Builds environment MCQ conversations for one split directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct DatasetAssembler {
    /// Skip scenes whose annotation file is malformed instead of failing
    pub skip_invalid_scenes: bool,

    /// Reject questions whose answer letter has no option text
    pub strict_labels: bool,
}

impl DatasetAssembler {
    pub fn new(skip_invalid_scenes: bool, strict_labels: bool) -> Self {
        Self { skip_invalid_scenes, strict_labels }
    }

    /// Load scenes from `root` and assemble them.
    pub fn assemble(&self, root: &Path, subset: Subset) -> Result<Vec<ConversationRecord>> {
        let loader = AnnotationLoader::new(root).skip_invalid(self.skip_invalid_scenes);
        self.assemble_from(&loader, subset)
    }

    /// Assemble records for every scene produced by `source`.
    pub fn assemble_from(
        &self,
        source: &dyn SceneSource,
        subset: Subset,
    ) -> Result<Vec<ConversationRecord>> {
        let mut dataset = Vec::new();

        for scene in source.load_all()? {
            let records = self.scene_conversations(&scene, subset)?;
            dataset.extend(records);
        }

        tracing::info!("Assembled {} conversation records", dataset.len());
        Ok(dataset)
    }

    /// Records for one scene: videos × questions, in annotation order.
    pub fn scene_conversations(
        &self,
        scene:  &Scene,
        subset: Subset,
    ) -> Result<Vec<ConversationRecord>> {
        self.check_labels(scene)?;

        let record = &scene.record;
        // Prompts are identical for every video of the scene
        let prompts: Vec<String> = record.environment.iter().map(format_question).collect();
        let mut out = Vec::with_capacity(record.overhead_videos.len() * prompts.len());

        for video in &record.overhead_videos {
            let stem = video_stem(video);
            let path = video_path(&scene.name, video, subset);

            for (cnt, (row, prompt)) in record.environment.iter().zip(&prompts).enumerate() {
                out.push(build_conversation(
                    format!("{stem}_{cnt}"),
                    path.as_str(),
                    prompt,
                    &row.correct,
                    ENVIRONMENT_TYPE,
                    FULL_VIDEO_PHASE,
                    record.id.as_str(),
                ));
            }
        }

        Ok(out)
    }

    /// Flag (or, in strict mode, reject) answers with no matching option.
    fn check_labels(&self, scene: &Scene) -> Result<()> {
        for (index, row) in scene.record.environment.iter().enumerate() {
            if row.answer_has_option() {
                continue;
            }

            if self.strict_labels {
                return Err(AnnotationError::AnswerWithoutOption {
                    scene:  scene.name.clone(),
                    index,
                    answer: row.correct.clone(),
                }
                .into());
            }

            tracing::warn!(
                "Scene {} question {}: answer '{}' has no matching option",
                scene.name,
                index,
                row.correct
            );
        }
        Ok(())
    }
}

/// Video filename without its extension
fn video_stem(video: &str) -> &str {
    Path::new(video)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(video)
}

/// Path of a video relative to the split directory, always `/`-separated
fn video_path(scene: &str, video: &str, subset: Subset) -> String {
    match subset.video_prefix() {
        Some(prefix) => format!("{prefix}/{scene}/overhead_view/{video}"),
        None => format!("{scene}/overhead_view/{video}"),
    }
}
