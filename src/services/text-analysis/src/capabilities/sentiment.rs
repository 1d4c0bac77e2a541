//! Lexicon based sentiment scoring
//!
//! Every word found in the lexicon contributes a (polarity, subjectivity)
//! assessment. An intensifier right before a sentiment word scales it, a
//! negation inverts and halves its polarity. Modifiers are reset at
//! punctuation. The text score is the mean of all assessments.

use std::collections::HashMap;

use nlp_examples_shared::SentimentScore;
use unicode_segmentation::UnicodeSegmentation;

use super::SentimentAnalyzer;

const NEGATION_FACTOR: f64 = -0.5;

/// (word, polarity, subjectivity)
const LEXICON: &[(&str, f64, f64)] = &[
    // positive
    ("good", 0.7, 0.6),
    ("great", 0.8, 0.75),
    ("excellent", 1.0, 1.0),
    ("wonderful", 1.0, 1.0),
    ("amazing", 0.6, 0.9),
    ("awesome", 1.0, 1.0),
    ("fantastic", 0.4, 0.9),
    ("brilliant", 0.9, 1.0),
    ("perfect", 1.0, 1.0),
    ("best", 1.0, 0.3),
    ("better", 0.5, 0.5),
    ("nice", 0.6, 1.0),
    ("beautiful", 0.85, 1.0),
    ("lovely", 0.5, 0.75),
    ("love", 0.5, 0.6),
    ("loved", 0.7, 0.8),
    ("like", 0.2, 0.4),
    ("enjoy", 0.4, 0.5),
    ("enjoyed", 0.4, 0.5),
    ("happy", 0.8, 1.0),
    ("glad", 0.5, 1.0),
    ("pleased", 0.5, 0.8),
    ("delighted", 0.7, 0.9),
    ("fun", 0.3, 0.2),
    ("interesting", 0.5, 0.5),
    ("pleasant", 0.7, 0.9),
    ("positive", 0.2, 0.5),
    ("success", 0.3, 0.0),
    ("successful", 0.75, 0.95),
    ("helpful", 0.5, 0.5),
    ("kind", 0.6, 0.9),
    ("friendly", 0.4, 0.5),
    ("easy", 0.4, 0.8),
    ("fast", 0.2, 0.6),
    ("clean", 0.4, 0.7),
    ("fine", 0.4, 0.5),
    ("right", 0.3, 0.5),
    ("correct", 0.3, 0.4),
    ("recommend", 0.4, 0.5),
    ("impressive", 1.0, 1.0),
    ("superb", 1.0, 1.0),
    ("incredible", 0.9, 0.9),
    ("outstanding", 0.5, 0.5),
    ("cool", 0.35, 0.65),
    ("calm", 0.3, 0.75),
    ("safe", 0.5, 0.5),
    ("fresh", 0.3, 0.5),
    ("funny", 0.25, 1.0),
    ("exciting", 0.3, 0.8),
    ("grateful", 0.6, 0.8),
    // negative
    ("bad", -0.7, 0.67),
    ("poor", -0.4, 0.6),
    ("terrible", -1.0, 1.0),
    ("horrible", -1.0, 1.0),
    ("awful", -1.0, 1.0),
    ("worst", -1.0, 1.0),
    ("worse", -0.4, 0.6),
    ("hate", -0.8, 0.9),
    ("hated", -0.9, 0.7),
    ("dislike", -0.5, 0.6),
    ("sad", -0.5, 1.0),
    ("angry", -0.5, 1.0),
    ("annoying", -0.8, 0.9),
    ("boring", -1.0, 1.0),
    ("ugly", -0.7, 1.0),
    ("stupid", -0.8, 1.0),
    ("wrong", -0.5, 0.9),
    ("broken", -0.4, 0.4),
    ("slow", -0.3, 0.4),
    ("difficult", -0.5, 1.0),
    ("hard", -0.3, 0.55),
    ("dirty", -0.6, 0.8),
    ("dangerous", -0.6, 0.9),
    ("disappointing", -0.6, 0.7),
    ("disappointed", -0.75, 0.75),
    ("fail", -0.5, 0.3),
    ("failed", -0.5, 0.3),
    ("failure", -0.3, 0.3),
    ("problem", -0.2, 0.2),
    ("negative", -0.3, 0.4),
    ("useless", -0.5, 0.2),
    ("painful", -0.7, 0.9),
    ("scary", -0.5, 1.0),
    ("unhappy", -0.6, 0.9),
    ("mediocre", -0.4, 0.6),
    ("disgusting", -1.0, 1.0),
    ("pathetic", -1.0, 1.0),
    ("tired", -0.4, 0.7),
    ("lonely", -0.25, 0.6),
    ("sick", -0.7, 0.9),
];

/// Multipliers applied to the next sentiment word
const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("so", 1.2),
    ("too", 1.2),
    ("extremely", 1.5),
    ("incredibly", 1.5),
    ("absolutely", 1.5),
    ("totally", 1.4),
    ("completely", 1.4),
    ("highly", 1.3),
    ("quite", 1.1),
    ("pretty", 1.1),
    ("somewhat", 0.7),
    ("slightly", 0.5),
    ("barely", 0.5),
];

const NEGATIONS: &[&str] = &["not", "never", "no", "cannot", "nothing", "neither", "nor"];

#[derive(Debug, Clone)]
pub struct LexiconSentimentAnalyzer {
    words: HashMap<&'static str, (f64, f64)>,
    intensifiers: HashMap<&'static str, f64>,
}

impl Default for LexiconSentimentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconSentimentAnalyzer {
    pub fn new() -> Self {
        Self {
            words: LEXICON
                .iter()
                .map(|(word, polarity, subjectivity)| (*word, (*polarity, *subjectivity)))
                .collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
        }
    }

    fn is_negation(word: &str) -> bool {
        NEGATIONS.contains(&word) || word.ends_with("n't")
    }
}

impl SentimentAnalyzer for LexiconSentimentAnalyzer {
    fn score(&self, text: &str) -> SentimentScore {
        let mut assessments: Vec<(f64, f64)> = Vec::new();
        let mut intensity = 1.0;
        let mut negated = false;

        for token in text.split_word_bounds() {
            if token.trim().is_empty() {
                continue;
            }

            if !token.chars().any(char::is_alphanumeric) {
                intensity = 1.0;
                negated = false;
                continue;
            }

            let word = token.to_lowercase();

            if Self::is_negation(&word) {
                negated = true;
                continue;
            }

            if let Some(factor) = self.intensifiers.get(word.as_str()) {
                intensity *= factor;
                continue;
            }

            if let Some(&(polarity, subjectivity)) = self.words.get(word.as_str()) {
                let mut polarity = polarity * intensity;
                if negated {
                    polarity *= NEGATION_FACTOR;
                }
                assessments.push((
                    polarity.clamp(-1.0, 1.0),
                    (subjectivity * intensity).min(1.0),
                ));
                intensity = 1.0;
                negated = false;
            }
        }

        if assessments.is_empty() {
            return SentimentScore::neutral();
        }

        let n = assessments.len() as f64;
        let polarity = assessments.iter().map(|(p, _)| p).sum::<f64>() / n;
        let subjectivity = assessments.iter().map(|(_, s)| s).sum::<f64>() / n;

        SentimentScore {
            polarity: polarity.clamp(-1.0, 1.0),
            subjectivity: subjectivity.clamp(0.0, 1.0),
        }
    }
}
