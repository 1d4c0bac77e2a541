//! Stopword filtering and text statistics
//!
//! Stopword lists come from the `stop-words` crate. Membership is
//! case-insensitive and ignores punctuation glued to a word ("The," is "the").

use std::collections::HashSet;
use std::sync::Arc;

use nlp_examples_shared::TextStats;
use stop_words::{get, LANGUAGE};

use super::TextCleaner;

const VOWELS: &str = "aeiouAEIOU";

/// A case-insensitive set of stopwords
#[derive(Debug, Clone)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    pub fn english() -> Self {
        Self {
            words: get(LANGUAGE::English)
                .iter()
                .map(|w| w.to_lowercase())
                .collect(),
        }
    }

    pub fn from_list(words: &[&str]) -> Self {
        Self {
            words: words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Strip punctuation around a whitespace separated word
pub(crate) fn bare_word(word: &str) -> &str {
    word.trim_matches(|c: char| !c.is_alphanumeric())
}

/// Drop every punctuation or symbol character except in-word apostrophes and hyphens
fn strip_punctuation(word: &str) -> String {
    let kept: String = word
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '\'' || *c == '-')
        .collect();
    kept.trim_matches(|c| c == '\'' || c == '-').to_string()
}

#[derive(Debug, Clone)]
pub struct StopwordCleaner {
    stopwords: Arc<StopwordSet>,
}

impl StopwordCleaner {
    pub fn new(stopwords: Arc<StopwordSet>) -> Self {
        Self { stopwords }
    }

    fn stopword_tokens<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        text.split_whitespace()
            .map(bare_word)
            .filter(move |w| !w.is_empty() && self.stopwords.contains(w))
    }
}

impl TextCleaner for StopwordCleaner {
    fn word_stats(&self, text: &str) -> TextStats {
        let mut stats = TextStats {
            length_of_text: text.chars().count(),
            ..TextStats::default()
        };

        for c in text.chars() {
            if VOWELS.contains(c) {
                stats.num_of_vowels += 1;
            } else if c.is_ascii_alphabetic() {
                stats.num_of_consonants += 1;
            }
        }

        stats.num_of_stopwords = self.stopword_tokens(text).count();
        stats
    }

    fn remove_stopwords(&self, text: &str) -> String {
        text.split_whitespace()
            .filter(|word| {
                let bare = bare_word(word);
                !bare.is_empty() && !self.stopwords.contains(bare)
            })
            .map(strip_punctuation)
            .filter(|word| !word.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn extract_stopwords(&self, text: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut found = Vec::new();

        for word in self.stopword_tokens(text) {
            if seen.insert(word.to_lowercase()) {
                found.push(word.to_string());
            }
        }

        found
    }
}
