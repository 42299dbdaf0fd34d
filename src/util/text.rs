// src/util/text.rs
use html_escape::decode_html_entities;
use regex::Regex;
use std::sync::LazyLock;

static BLOCK_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?(p|div|br|li|h[1-6])[^>]*>").expect("valid block tag pattern"));
static ANY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag pattern"));

/// One-line plain-text preview of a note body for terminal listings.
///
/// Markup is stripped, entities decoded, and the first non-empty line is kept.
/// Previews longer than `max_chars` are cut and end with `…`.
///
/// # Examples
///
/// ```
/// use notesboard::util::text::preview;
///
/// assert_eq!(preview("<p>Buy milk</p><p>and eggs</p>", 40), "Buy milk");
/// assert_eq!(preview("abcdef", 4), "abc…");
/// ```
pub fn preview(body: &str, max_chars: usize) -> String {
    let decoded = decode_html_entities(body).to_string();
    let with_newlines = BLOCK_TAG.replace_all(&decoded, "\n");
    let plain = ANY_TAG.replace_all(&with_newlines, "");

    let line = plain
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("");

    if line.chars().count() <= max_chars {
        return line.to_string();
    }
    let mut cut: String = line.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
