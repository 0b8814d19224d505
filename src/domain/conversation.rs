// ============================================================
// Layer 3 — Conversation Domain Type
// ============================================================
// The LLaVA training unit. Serialised field order matters to
// downstream consumers, so the struct fields are declared in
// the exact order they appear in the output JSON:
//
//   {
//     "id": "cam1_0",
//     "wts_id": "20230707_12_SN17_T1",
//     "video": "scene/overhead_view/cam1.mp4",
//     "type": "environment",
//     "phase": "full_video",
//     "conversations": [
//       { "from": "human", "value": "<video> \n ..." },
//       { "from": "gpt",   "value": "A" }
//     ]
//   }

use serde::{Deserialize, Serialize};

/// Who is speaking in a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Human,
    Gpt,
}

/// One turn of a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    #[serde(rename = "from")]
    pub speaker: Speaker,
    pub value:   String,
}

impl Turn {
    pub fn new(speaker: Speaker, value: impl Into<String>) -> Self {
        Self { speaker, value: value.into() }
    }
}

/// A single question/answer training record tied to one video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationRecord {
    /// `<video stem>_<question index>`, unique within a scene
    pub id: String,

    /// WTS scene identifier
    pub wts_id: String,

    /// Video path relative to the split directory
    pub video: String,

    /// Question category tag
    #[serde(rename = "type")]
    pub qtype: String,

    /// Which portion of the video the question refers to
    pub phase: String,

    /// Human prompt followed by the gpt answer
    pub conversations: Vec<Turn>,
}

#[cfg(test)]
impl ConversationRecord {
    /// Text of the human (asker) turn
    pub fn prompt(&self) -> Option<&str> {
        self.turn(Speaker::Human)
    }

    /// Text of the gpt (responder) turn
    pub fn answer(&self) -> Option<&str> {
        self.turn(Speaker::Gpt)
    }

    fn turn(&self, speaker: Speaker) -> Option<&str> {
        self.conversations
            .iter()
            .find(|t| t.speaker == speaker)
            .map(|t| t.value.as_str())
    }
}
