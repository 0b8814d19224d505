// ============================================================
// Layer 5 — Score Extraction
// ============================================================
// The model answers in free text. Accepted shapes include:
//
//   "3"
//   "[Score between 1 and 5.]\n\n4"
//   "2.\n\nThe ball falls upward, which is implausible."
//
// The score is the first line that, once trimmed, is a single
// digit 1-5 with at most one trailing period.

/// Extract a plausibility score in 1..=5 from generated text.
pub fn parse_score(text: &str) -> Option<u8> {
    text.trim().lines().find_map(|line| score_line(line.trim()))
}

fn score_line(line: &str) -> Option<u8> {
    let digits = line.strip_suffix('.').unwrap_or(line);
    match digits.as_bytes() {
        [d @ b'1'..=b'5'] => Some(d - b'0'),
        _ => None,
    }
}
