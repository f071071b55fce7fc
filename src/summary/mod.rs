//! Short markdown reports shown next to the planner inputs.
//!
//! Neither summarizer interprets its input. The context report quotes fixed sentences of the
//! briefing and insights verbatim; the data report averages two roster columns. Both always
//! return displayable text and fall back to a placeholder when the input is unusable.

mod context;
mod data;

pub use context::*;
pub use data::*;

/// Splits `text` into trimmed sentences. A sentence ends at a `.` that is followed by
/// whitespace or by the end of the text, so decimals such as `4.7%` stay intact.
pub fn sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut begin = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        let boundary = c == '.' && chars.peek().is_none_or(|(_, next)| next.is_whitespace());
        if boundary {
            push_sentence(&mut out, &text[begin..i]);
            begin = i + c.len_utf8();
        }
    }
    push_sentence(&mut out, &text[begin..]);
    out
}

fn push_sentence<'a>(out: &mut Vec<&'a str>, fragment: &'a str) {
    let fragment = fragment.trim();
    if !fragment.is_empty() {
        out.push(fragment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentences_keep_decimal_points() {
        let parts = sentences("WhatsApp converted 4.7% into repurchase. ROI was 5.3x.");
        assert_eq!(parts, vec!["WhatsApp converted 4.7% into repurchase", "ROI was 5.3x"]);
    }

    #[test]
    fn test_sentences_of_blank_text_is_empty() {
        assert!(sentences("  \n").is_empty());
        assert_eq!(sentences("no period"), vec!["no period"]);
    }
}
