// ============================================================
// Layer 4 — Question Formatter
// ============================================================
// Turns one raw MCQ record into the prompt text seen by the model:
//
//   "<video> \n Weather? \n A: sunny \n B: rainy \n "
//
// Options are always emitted in a, b, c, d order. A key that is
// present is emitted even when its value is null; missing keys
// are skipped. The trailing " \n " after the last option is part
// of the format and is never trimmed.

use crate::domain::scene::RawQuestion;

/// Placeholder the VLM processor replaces with video tokens
pub const VIDEO_PLACEHOLDER: &str = "<video>";

/// Separator placed after the question and after every option
const LINE_SEP: &str = " \n ";

/// Format a raw question into the MCQ prompt.
pub fn format_question(row: &RawQuestion) -> String {
    let mut prompt = format!("{VIDEO_PLACEHOLDER}{LINE_SEP}{}{LINE_SEP}", row.question_text());

    for (letter, text) in row.present_options() {
        prompt.push(letter.to_ascii_uppercase());
        prompt.push_str(": ");
        prompt.push_str(&text);
        prompt.push_str(LINE_SEP);
    }

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn question(value: serde_json::Value) -> RawQuestion {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_two_options() {
        let q = question(json!({"question": "Weather?", "a": "sunny", "b": "rainy", "correct": "a"}));
        assert_eq!(format_question(&q), "<video> \n Weather? \n A: sunny \n B: rainy \n ");
    }

    #[test]
    fn test_all_four_options_in_order() {
        let q = question(json!({
            "question": "Road surface?",
            "d": "icy", "b": "wet", "a": "dry", "c": "snowy",
            "correct": "b"
        }));
        assert_eq!(
            format_question(&q),
            "<video> \n Road surface? \n A: dry \n B: wet \n C: snowy \n D: icy \n "
        );
    }

    #[test]
    fn test_gaps_are_skipped_not_padded() {
        let q = question(json!({"question": "Q", "b": "two", "d": "four", "correct": "d"}));
        let prompt = format_question(&q);

        let option_lines: Vec<&str> = prompt
            .split(" \n ")
            .filter(|part| part.len() > 2 && part.as_bytes()[1] == b':')
            .collect();
        assert_eq!(option_lines, vec!["B: two", "D: four"]);
    }

    #[test]
    fn test_null_and_boolean_options_emitted() {
        let q = question(json!({"question": "Q", "a": null, "b": true, "correct": "a"}));
        assert_eq!(format_question(&q), "<video> \n Q \n A: None \n B: True \n ");
    }

    #[test]
    fn test_numeric_question_text() {
        let q = question(json!({"question": 42, "a": "yes", "correct": "a"}));
        assert_eq!(format_question(&q), "<video> \n 42 \n A: yes \n ");
    }

    #[test]
    fn test_no_options() {
        let q = question(json!({"question": "Q", "correct": "a"}));
        assert_eq!(format_question(&q), "<video> \n Q \n ");
    }
}
