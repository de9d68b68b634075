//! Heading name cleanup and identity

/// Decorative glyphs stripped from both ends of a heading
const HEADING_MARKERS: &[char] = &['#', '*', '→', '►', '▼', '¶', '§', '🔗'];

/// Case-folds and collapses whitespace; two names are the same node iff
/// their normalized forms are equal
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Cleans raw heading text into a display name
///
/// Strips a leading section number (`1.`, `2.3`, `4.1.2)`), decorative
/// markers at either end and permalink glyphs, collapses whitespace and
/// truncates to `max_len` characters. May return an empty string.
pub fn clean_heading(text: &str, max_len: usize) -> String {
    let text = text.trim_matches(|c: char| c.is_whitespace() || HEADING_MARKERS.contains(&c));
    let text = strip_section_number(text);
    let text = text.trim_matches(|c: char| c.is_whitespace() || HEADING_MARKERS.contains(&c));

    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_len {
        return collapsed;
    }

    collapsed.chars().take(max_len).collect::<String>().trim_end().to_string()
}

/// Removes a leading numbering token followed by whitespace
fn strip_section_number(text: &str) -> &str {
    let token_end = text
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == ')'))
        .unwrap_or(text.len());
    let token = &text[..token_end];

    let is_number = token.starts_with(|c: char| c.is_ascii_digit());
    let followed_by_space = text[token_end..].starts_with(char::is_whitespace);

    if is_number && followed_by_space {
        text[token_end..].trim_start()
    } else {
        text
    }
}
