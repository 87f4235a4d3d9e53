//! Summarizer: word-count truncation for space-constrained layouts.
//!
//! Not sentence-aware: keeps the first N whitespace-delimited words and
//! appends the ellipsis directly to the last one, so re-summarizing with the
//! same limit is a no-op.

pub const ELLIPSIS: &str = "...";

/// Returns `text` unchanged when it has at most `max_words` words, otherwise
/// the first `max_words` words joined by single spaces plus [`ELLIPSIS`].
pub fn summarize(text: &str, max_words: usize) -> String {
    let mut words = text.split_whitespace();
    let kept: Vec<&str> = words.by_ref().take(max_words).collect();
    if words.next().is_none() {
        return text.to_string();
    }
    let mut out = kept.join(" ");
    out.push_str(ELLIPSIS);
    out
}
