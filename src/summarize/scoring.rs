//! Term-frequency sentence scoring and redundancy measure

use std::collections::{HashMap, HashSet};

/// Words ignored when weighting and comparing sentences
const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "all", "also", "am", "an", "and", "any", "are", "as",
    "at", "be", "because", "been", "before", "being", "below", "between", "both", "but", "by",
    "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for", "from",
    "further", "had", "has", "have", "having", "he", "her", "here", "hers", "him", "his", "how",
    "i", "if", "in", "into", "is", "it", "its", "itself", "just", "may", "me", "more", "most",
    "must", "my", "no", "nor", "not", "now", "of", "off", "on", "once", "only", "or", "other",
    "our", "out", "over", "own", "same", "she", "should", "so", "some", "such", "than", "that",
    "the", "their", "them", "then", "there", "these", "they", "this", "those", "through", "to",
    "too", "under", "until", "up", "use", "used", "using", "very", "was", "we", "were", "what",
    "when", "where", "which", "while", "who", "whom", "why", "will", "with", "would", "you",
    "your",
];

/// Lowercased content words of a text, stopwords removed
pub fn content_words(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_' || c == '-'))
        .map(|word| word.trim_matches('-').to_lowercase())
        .filter(|word| word.chars().count() > 1 && !STOPWORDS.contains(&word.as_str()))
        .collect()
}

/// Word frequency distribution of a whole buffer
#[derive(Debug, Clone, Default)]
pub struct TermFrequencies {
    counts: HashMap<String, usize>,
    max_count: usize,
}

impl TermFrequencies {
    pub fn from_text(text: &str) -> Self {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for word in content_words(text) {
            *counts.entry(word).or_default() += 1;
        }
        let max_count = counts.values().copied().max().unwrap_or(0);
        Self { counts, max_count }
    }

    /// Frequency of a word relative to the most frequent word, in [0, 1]
    pub fn weight(&self, word: &str) -> f64 {
        if self.max_count == 0 {
            return 0.0;
        }
        self.counts.get(word).copied().unwrap_or(0) as f64 / self.max_count as f64
    }
}

/// Scores a sentence: mean term weight of its content words plus a bonus
/// that decays linearly from `position_weight` for the first sentence to
/// zero past the last
pub fn score_sentence(
    words: &[String],
    index: usize,
    total: usize,
    frequencies: &TermFrequencies,
    position_weight: f64,
) -> f64 {
    let term_score = if words.is_empty() {
        0.0
    } else {
        words.iter().map(|word| frequencies.weight(word)).sum::<f64>() / words.len() as f64
    };

    let position_score = if total == 0 {
        0.0
    } else {
        position_weight * (1.0 - index as f64 / total as f64)
    };

    term_score + position_score
}

/// Jaccard similarity of two word sets; 0 when both are empty
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}
