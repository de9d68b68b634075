//! Sentence splitting and candidate filtering

/// Characters that may trail sentence-ending punctuation
const CLOSING_CHARS: &[char] = &['"', '\'', ')', ']', '”', '’'];

/// Prefixes of UI and navigation text, compared case-insensitively
const NAVIGATION_PREFIXES: &[&str] = &["click ", "select ", "go to ", "navigate to", "menu:", "menu :"];

/// Whole-sentence navigation labels
const NAVIGATION_LABELS: &[&str] = &["home", "back", "next", "previous"];

/// A sentence and its index in the buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    pub index: usize,
    pub text: String,
}

/// Splits whitespace-normalized text into sentences
///
/// A sentence ends at `.`, `!` or `?` (plus any closing quotes or brackets)
/// followed by whitespace. Text after the last terminator forms a final
/// sentence. Sentence text is a verbatim slice of the normalized input.
pub fn split_sentences(text: &str) -> Vec<Sentence> {
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = normalized.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }

        let mut end = i + c.len_utf8();
        while let Some(&(j, next)) = chars.peek() {
            if matches!(next, '.' | '!' | '?') || CLOSING_CHARS.contains(&next) {
                end = j + next.len_utf8();
                chars.next();
            } else {
                break;
            }
        }

        if chars.peek().is_some_and(|&(_, next)| next == ' ') {
            push_sentence(&mut sentences, &normalized[start..end]);
            start = end;
        }
    }

    push_sentence(&mut sentences, &normalized[start..]);
    sentences
}

fn push_sentence(sentences: &mut Vec<Sentence>, text: &str) {
    let text = text.trim();
    if !text.is_empty() {
        sentences.push(Sentence {
            index: sentences.len(),
            text: text.to_string(),
        });
    }
}

/// Returns true for UI or navigation text such as "Click here" or "Home"
pub fn is_navigation(sentence: &str) -> bool {
    let lower = sentence.trim().to_lowercase();

    if NAVIGATION_PREFIXES.iter().any(|prefix| lower.starts_with(prefix)) {
        return true;
    }

    let label = lower.trim_end_matches(|c: char| c.is_ascii_punctuation());
    if NAVIGATION_LABELS.contains(&label) {
        return true;
    }

    // "Section → Page" breadcrumbs
    lower.contains(" → ")
}
