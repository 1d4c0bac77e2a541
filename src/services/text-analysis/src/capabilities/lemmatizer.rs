//! Tokens and lemmas from the nlprule English tokenizer
//!
//! The tokenizer binary is built into `OUT_DIR` by `build.rs` and embedded
//! in the executable. It is parsed once per process and shared afterwards.
//! Whitespace is never a token; punctuation marks are.

use std::sync::{Arc, OnceLock};

use nlp_examples_shared::TokenLemma;
use nlprule::types::Token;
use nlprule::Tokenizer;
use tracing::info;

use super::Lemmatizer;
use crate::error::CapabilityError;

const EN_TOKENIZER: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/en_tokenizer.bin"));

static ENGLISH: OnceLock<Arc<Tokenizer>> = OnceLock::new();

#[derive(Clone)]
pub struct NlpruleLemmatizer {
    tokenizer: Arc<Tokenizer>,
}

impl NlpruleLemmatizer {
    pub fn english() -> Result<Self, CapabilityError> {
        if let Some(tokenizer) = ENGLISH.get() {
            return Ok(Self {
                tokenizer: tokenizer.clone(),
            });
        }

        let tokenizer = Tokenizer::from_reader(EN_TOKENIZER).map_err(|e| {
            CapabilityError::Unavailable(format!("failed to load English tokenizer: {}", e))
        })?;
        info!("English tokenizer loaded ({} bytes)", EN_TOKENIZER.len());

        Ok(Self {
            tokenizer: ENGLISH.get_or_init(|| Arc::new(tokenizer)).clone(),
        })
    }
}

/// Dictionary form of a token.
///
/// A word can carry several tags (`used` is both `VBD use` and `JJ used`);
/// the first lemma that differs from the lowercase surface form wins so that
/// inflected forms reduce. Untagged tokens fall back to lowercase.
fn lemma_of(token: &Token) -> String {
    let lower = token.word().text().as_str().to_lowercase();
    let lemmas: Vec<&str> = token
        .word()
        .tags()
        .iter()
        .map(|data| data.lemma().as_str())
        .filter(|lemma| !lemma.is_empty())
        .collect();

    lemmas
        .iter()
        .find(|lemma| lemma.to_lowercase() != lower)
        .or_else(|| lemmas.first())
        .map(|lemma| lemma.to_string())
        .unwrap_or(lower)
}

impl Lemmatizer for NlpruleLemmatizer {
    fn analyse(&self, text: &str) -> Vec<TokenLemma> {
        let mut tokens = Vec::new();

        for sentence in self.tokenizer.pipe(text) {
            for token in sentence.iter() {
                let surface = token.word().text().as_str();
                if surface.trim().is_empty() {
                    continue;
                }
                tokens.push(TokenLemma::new(surface, lemma_of(token)));
            }
        }

        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lemmatizer() -> NlpruleLemmatizer {
        NlpruleLemmatizer::english().unwrap()
    }

    fn lemma(word: &str) -> String {
        let tokens = lemmatizer().analyse(word);
        assert_eq!(tokens.len(), 1, "{:?}", tokens);
        tokens[0].lemma.clone()
    }

    #[test]
    fn test_running_dogs() {
        let tokens = lemmatizer().analyse("running dogs");
        assert_eq!(
            tokens,
            vec![
                TokenLemma::new("running", "run"),
                TokenLemma::new("dogs", "dog"),
            ]
        );
    }

    #[test]
    fn test_regular_verbs_keep_their_stem() {
        for (word, expected) in [
            ("used", "use"),
            ("changed", "change"),
            ("caused", "cause"),
            ("released", "release"),
        ] {
            assert_eq!(lemma(word), expected, "lemma of {}", word);
        }
    }

    #[test]
    fn test_irregular_forms() {
        assert_eq!(lemma("went"), "go");
        assert_eq!(lemma("children"), "child");
        assert_eq!(lemma("was"), "be");
    }

    #[test]
    fn test_punctuation_is_a_token() {
        let tokens = lemmatizer().analyse("Hello, world!");
        let surface: Vec<&str> = tokens.iter().map(|t| t.token.as_str()).collect();
        assert_eq!(surface, vec!["Hello", ",", "world", "!"]);
        assert_eq!(tokens[1].lemma, ",");
    }

    #[test]
    fn test_tokens_keep_text_order_across_sentences() {
        let tokens = lemmatizer().analyse("Cats sleep.  Dogs bark.");
        let surface: Vec<&str> = tokens.iter().map(|t| t.token.as_str()).collect();
        assert_eq!(surface, vec!["Cats", "sleep", ".", "Dogs", "bark", "."]);
        assert_eq!(tokens[0].lemma, "cat");
        assert_eq!(tokens[3].lemma, "dog");
    }

    #[test]
    fn test_tokenizer_is_shared() {
        let a = lemmatizer();
        let b = lemmatizer();
        assert!(Arc::ptr_eq(&a.tokenizer, &b.tokenizer));
    }
}
