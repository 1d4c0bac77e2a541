//! Text analysis request and result model
//!
//! An [`AnalysisRequest`] names exactly one [`Operation`]; the handler answers
//! with one or more [`AnalysisResult`] values for display.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::language::TargetLanguage;

/// One user-triggered action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operation {
    TokenLemma,
    Stopwords,
    Wordcloud,
    Summarize,
    Translate,
    Sentiment,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::TokenLemma,
        Operation::Stopwords,
        Operation::Wordcloud,
        Operation::Summarize,
        Operation::Translate,
        Operation::Sentiment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::TokenLemma => "TOKEN_LEMMA",
            Operation::Stopwords => "STOPWORDS",
            Operation::Wordcloud => "WORDCLOUD",
            Operation::Summarize => "SUMMARIZE",
            Operation::Translate => "TRANSLATE",
            Operation::Sentiment => "SENTIMENT",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub raw_text: String,
    pub operation: Operation,
    #[serde(default)]
    pub target_language: Option<TargetLanguage>,
}

impl AnalysisRequest {
    pub fn new(raw_text: impl Into<String>, operation: Operation) -> Self {
        Self {
            raw_text: raw_text.into(),
            operation,
            target_language: None,
        }
    }

    pub fn translate(raw_text: impl Into<String>, target: TargetLanguage) -> Self {
        Self {
            raw_text: raw_text.into(),
            operation: Operation::Translate,
            target_language: Some(target),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenLemma {
    pub token: String,
    pub lemma: String,
}

impl TokenLemma {
    pub fn new(token: impl Into<String>, lemma: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            lemma: lemma.into(),
        }
    }
}

/// Basic character and stopword counts of the submitted text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStats {
    pub length_of_text: usize,
    pub num_of_vowels: usize,
    pub num_of_consonants: usize,
    pub num_of_stopwords: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    /// -1.0 (negative) to 1.0 (positive)
    pub polarity: f64,
    /// 0.0 (objective) to 1.0 (subjective)
    pub subjectivity: f64,
}

impl SentimentScore {
    pub fn neutral() -> Self {
        Self {
            polarity: 0.0,
            subjectivity: 0.0,
        }
    }

    pub fn label(&self) -> &'static str {
        if self.polarity > 0.0 {
            "positive"
        } else if self.polarity < 0.0 {
            "negative"
        } else {
            "neutral"
        }
    }
}

/// A word as laid out on the word cloud canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedWord {
    pub word: String,
    pub frequency: usize,
    pub font_size: u32,
    pub x: u32,
    pub y: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordCloudImage {
    pub width: u32,
    pub height: u32,
    pub format: String,
    /// Encoded image, base64 (standard alphabet)
    pub data_base64: String,
    pub words: Vec<PlacedWord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AnalysisResult {
    TokenLemmaList(Vec<TokenLemma>),
    StopwordList(Vec<String>),
    ProcessedText(String),
    TextStats(TextStats),
    WordCloudImage(WordCloudImage),
    SummaryText(String),
    TranslatedText(String),
    SentimentScore(SentimentScore),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_wire_names() {
        let json = serde_json::to_string(&Operation::TokenLemma).unwrap();
        assert_eq!(json, "\"TOKEN_LEMMA\"");

        let op: Operation = serde_json::from_str("\"WORDCLOUD\"").unwrap();
        assert_eq!(op, Operation::Wordcloud);
        assert_eq!(op.to_string(), "WORDCLOUD");
    }

    #[test]
    fn test_request_target_language_is_optional() {
        let request: AnalysisRequest =
            serde_json::from_str(r#"{"raw_text": "hello", "operation": "SENTIMENT"}"#).unwrap();
        assert!(request.target_language.is_none());

        let request: AnalysisRequest = serde_json::from_str(
            r#"{"raw_text": "hello", "operation": "TRANSLATE", "target_language": "German"}"#,
        )
        .unwrap();
        assert_eq!(request.target_language, Some(TargetLanguage::German));
    }

    #[test]
    fn test_result_is_tagged() {
        let result = AnalysisResult::SummaryText("short".to_string());
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["kind"], "summary_text");
        assert_eq!(value["value"], "short");
    }

    #[test]
    fn test_sentiment_label() {
        let score = SentimentScore {
            polarity: -0.4,
            subjectivity: 0.6,
        };
        assert_eq!(score.label(), "negative");
        assert_eq!(SentimentScore::neutral().label(), "neutral");
    }
}
