//! Extractive summarization
//!
//! Descriptions are built only from sentences of the source buffer,
//! so every description appears verbatim in its source text.

mod scoring;
mod sentences;

pub use scoring::{content_words, jaccard, score_sentence, TermFrequencies};
pub use sentences::{is_navigation, split_sentences, Sentence};

use crate::config::SummarizerConfig;
use crate::inference::ExtractionResult;
use std::collections::HashSet;

/// Deterministic extractive summarizer
#[derive(Debug, Clone, Default)]
pub struct Summarizer {
    config: SummarizerConfig,
}

struct Candidate {
    sentence: Sentence,
    words: HashSet<String>,
    score: f64,
}

impl Summarizer {
    pub fn new(config: SummarizerConfig) -> Self {
        Self { config }
    }

    /// Summarizes a text buffer into a description
    ///
    /// Selects up to `max_sentences` of the highest-scoring candidate
    /// sentences within the `max_chars` budget, rejecting any that is too
    /// similar to one already chosen, and emits them in source order. An
    /// empty buffer yields an empty description.
    pub fn summarize(&self, text: &str) -> String {
        let sentences = split_sentences(text);
        if sentences.is_empty() {
            return String::new();
        }

        let frequencies = TermFrequencies::from_text(text);
        let mut candidates = self.candidates(&sentences, &frequencies);
        candidates.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then(a.sentence.index.cmp(&b.sentence.index))
        });

        let mut selected: Vec<&Candidate> = Vec::new();
        let mut length = 0;

        for candidate in &candidates {
            if selected.len() >= self.config.max_sentences {
                break;
            }

            let is_redundant = selected.iter().any(|chosen| {
                jaccard(&chosen.words, &candidate.words) >= self.config.similarity_threshold
            });
            if is_redundant {
                continue;
            }

            let separator = usize::from(!selected.is_empty());
            let added = separator + candidate.sentence.text.chars().count();
            if length + added > self.config.max_chars {
                continue;
            }

            length += added;
            selected.push(candidate);
        }

        if selected.is_empty() {
            return truncate_at_word(&sentences[0].text, self.config.max_chars);
        }

        selected.sort_by_key(|candidate| candidate.sentence.index);
        selected
            .iter()
            .map(|candidate| candidate.sentence.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Fills in the description of every module and submodule
    pub fn describe(&self, result: &mut ExtractionResult) {
        for module in &mut result.modules {
            module.description = self.summarize(module.text());
            for submodule in &mut module.submodules {
                submodule.description = self.summarize(submodule.text());
            }
        }
    }

    fn candidates(&self, sentences: &[Sentence], frequencies: &TermFrequencies) -> Vec<Candidate> {
        let total = sentences.len();

        sentences
            .iter()
            .filter(|sentence| {
                let length = sentence.text.chars().count();
                length >= self.config.min_sentence_length
                    && length <= self.config.max_sentence_length
                    && !is_navigation(&sentence.text)
            })
            .map(|sentence| {
                let words = content_words(&sentence.text);
                let score = score_sentence(
                    &words,
                    sentence.index,
                    total,
                    frequencies,
                    self.config.position_weight,
                );
                Candidate {
                    sentence: sentence.clone(),
                    words: words.into_iter().collect(),
                    score,
                }
            })
            .collect()
    }
}

/// Keeps whole words of `text` up to `max_chars` characters
///
/// A first word longer than `max_chars` is cut on a char boundary instead.
fn truncate_at_word(text: &str, max_chars: usize) -> String {
    let mut out = String::new();
    let mut length = 0;

    for word in text.split(' ') {
        let added = usize::from(!out.is_empty()) + word.chars().count();
        if length + added > max_chars {
            break;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
        length += added;
    }

    if out.is_empty() {
        return text.chars().take(max_chars).collect();
    }

    out
}
