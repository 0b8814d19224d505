// ============================================================
// Layer 4 — Conversation Builder
// ============================================================
// Wraps a formatted prompt and its answer into a LLaVA record.
// The human turn gets a fixed instruction line appended; the
// gpt turn is the answer letter in uppercase.

use crate::domain::conversation::{ConversationRecord, Speaker, Turn};

/// Instruction appended (on its own line) to every MCQ prompt
pub const ANSWER_INSTRUCTION: &str =
    "Answer with the option's letter from the given choices directly.";

/// Build one conversation record.
///
/// `answer` is upper-cased and otherwise passed through as is;
/// checking it against the emitted options is the caller's job.
pub fn build_conversation(
    id:       impl Into<String>,
    video:    impl Into<String>,
    question: &str,
    answer:   &str,
    qtype:    impl Into<String>,
    phase:    impl Into<String>,
    wts_id:   impl Into<String>,
) -> ConversationRecord {
    ConversationRecord {
        id:     id.into(),
        wts_id: wts_id.into(),
        video:  video.into(),
        qtype:  qtype.into(),
        phase:  phase.into(),
        conversations: vec![
            Turn::new(Speaker::Human, format!("{question}\n{ANSWER_INSTRUCTION}")),
            Turn::new(Speaker::Gpt, answer.to_uppercase()),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turns_and_metadata() {
        let rec = build_conversation("v_0", "s/overhead_view/v.mp4", "<video> \n Q \n ", "b", "environment", "full_video", "S");

        assert_eq!(rec.id, "v_0");
        assert_eq!(rec.wts_id, "S");
        assert_eq!(rec.qtype, "environment");
        assert_eq!(rec.phase, "full_video");
        assert_eq!(
            rec.prompt(),
            Some("<video> \n Q \n \nAnswer with the option's letter from the given choices directly.")
        );
        assert_eq!(rec.answer(), Some("B"));
    }

    #[test]
    fn test_unknown_answer_passed_through() {
        let rec = build_conversation("v_0", "v.mp4", "Q", "z", "environment", "full_video", "S");
        assert_eq!(rec.answer(), Some("Z"));
    }

    #[test]
    fn test_serialised_field_names() {
        let rec = build_conversation("v_0", "v.mp4", "Q", "a", "environment", "full_video", "S");
        let json = serde_json::to_value(&rec).unwrap();

        assert_eq!(json["type"], "environment");
        assert_eq!(json["conversations"][0]["from"], "human");
        assert_eq!(json["conversations"][1]["from"], "gpt");
        assert_eq!(json["conversations"][1]["value"], "A");
        assert_eq!(json["wts_id"], "S");
    }
}
