// ============================================================
// Layer 3 — Scene Domain Types
// ============================================================
// A WTS scene annotation file looks like:
//
//   [
//     {
//       "id": "20230707_12_SN17_T1",
//       "overhead_videos": ["cam1.mp4", "cam2.mp4"],
//       "environment": [
//         { "question": "Weather?", "a": "sunny", "b": "rainy", "correct": "a" },
//         ...
//       ]
//     }
//   ]
//
// Only the first array element is meaningful. Every question
// in `environment` applies to every overhead video of the scene.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Option letters in the order they are always emitted.
pub const OPTION_LETTERS: [char; 4] = ['a', 'b', 'c', 'd'];

/// Directory name (and video path prefix) of the trimmed subset.
pub const NORMAL_TRIMMED_DIR: &str = "normal_trimmed";

/// First element of a scene annotation file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneRecord {
    /// WTS scene identifier, copied into every record as `wts_id`
    pub id: String,

    /// Overhead camera video filenames, in annotation order
    pub overhead_videos: Vec<String>,

    /// Environment questions shared by all videos of the scene
    pub environment: Vec<RawQuestion>,
}

/// A scene record together with the directory it was loaded from.
/// The directory name (not the record id) is used to build video paths.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub name:   String,
    pub record: SceneRecord,
}

/// One raw multiple-choice question.
///
/// Question and option texts are kept as JSON values: annotators
/// occasionally write numbers or booleans instead of strings. An
/// option key that is present counts as an option even when its
/// value is `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawQuestion {
    pub question: Value,

    /// Letter of the correct option, usually lowercase
    pub correct: String,

    #[serde(default, deserialize_with = "present_key", skip_serializing_if = "Option::is_none")]
    pub a: Option<Value>,
    #[serde(default, deserialize_with = "present_key", skip_serializing_if = "Option::is_none")]
    pub b: Option<Value>,
    #[serde(default, deserialize_with = "present_key", skip_serializing_if = "Option::is_none")]
    pub c: Option<Value>,
    #[serde(default, deserialize_with = "present_key", skip_serializing_if = "Option::is_none")]
    pub d: Option<Value>,
}

/// `Some` for every key in the input, `null` included. Missing keys
/// fall back to `None` through `#[serde(default)]`.
fn present_key<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Text form of an annotation value: strings verbatim, `null` as
/// `None`, booleans as `True`/`False`, anything else as JSON text.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        other => other.to_string(),
    }
}

impl RawQuestion {
    pub fn question_text(&self) -> String {
        render_value(&self.question)
    }

    /// Rendered text of the option for `letter`, if its key is present.
    pub fn option(&self, letter: char) -> Option<String> {
        let value = match letter.to_ascii_lowercase() {
            'a' => self.a.as_ref(),
            'b' => self.b.as_ref(),
            'c' => self.c.as_ref(),
            'd' => self.d.as_ref(),
            _ => None,
        }?;
        Some(render_value(value))
    }

    /// Present options as `(letter, text)` in a, b, c, d order.
    pub fn present_options(&self) -> impl Iterator<Item = (char, String)> + '_ {
        OPTION_LETTERS
            .iter()
            .filter_map(move |&letter| self.option(letter).map(|text| (letter, text)))
    }

    /// True when `correct` is a single option letter whose key is present.
    pub fn answer_has_option(&self) -> bool {
        let mut chars = self.correct.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => self.option(letter).is_some(),
            _ => false,
        }
    }
}

/// Which partition of a split is being assembled.
///
/// The trimmed subset lives in a nested directory and its video
/// references carry an extra path prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subset {
    Main,
    NormalTrimmed,
}

impl Subset {
    /// Prefix prepended to every video path of this subset.
    pub fn video_prefix(self) -> Option<&'static str> {
        match self {
            Subset::Main => None,
            Subset::NormalTrimmed => Some(NORMAL_TRIMMED_DIR),
        }
    }
}

/// Output splits written by the preprocessing command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Split {
    Train,
    Val,
}

impl Split {
    pub const ALL: [Split; 2] = [Split::Train, Split::Val];

    pub fn as_str(self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Val => "val",
        }
    }
}

impl std::fmt::Display for Split {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}
