// Output formatting: terminal display of classification results.

pub mod terminal;

/// Shorten a URL, title or topic for a fixed-width column, marking the cut
/// with "...". Counts characters, so accented titles never split mid-byte.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
