//! NLP capabilities
//!
//! The handler never computes anything itself: each operation is delegated to
//! one of the traits below. The default implementations in the submodules can
//! be swapped for any other provider without touching the handler.

pub mod glyphs;
pub mod lemmatizer;
pub mod sentiment;
pub mod stopwords;
pub mod summarizer;
pub mod translator;
pub mod wordcloud;

use async_trait::async_trait;
use std::sync::Arc;

use nlp_examples_shared::{SentimentScore, TextStats, TokenLemma, WordCloudImage};

use crate::config::Config;
use crate::error::{CapabilityError, Result};

pub use lemmatizer::NlpruleLemmatizer;
pub use sentiment::LexiconSentimentAnalyzer;
pub use stopwords::{StopwordCleaner, StopwordSet};
pub use summarizer::TextRankSummarizer;
pub use translator::GoogleTranslator;
pub use wordcloud::BitmapWordCloud;

#[cfg(test)]
use mockall::automock;

/// Splits text into tokens and gives each its dictionary form
#[cfg_attr(test, automock)]
pub trait Lemmatizer: Send + Sync {
    fn analyse(&self, text: &str) -> Vec<TokenLemma>;
}

/// Stopword based cleaning and counting
#[cfg_attr(test, automock)]
pub trait TextCleaner: Send + Sync {
    fn word_stats(&self, text: &str) -> TextStats;

    /// Text with stopwords and punctuation removed
    fn remove_stopwords(&self, text: &str) -> String;

    /// Stopwords found in the text, unique, in order of first appearance
    fn extract_stopwords(&self, text: &str) -> Vec<String>;
}

/// Extractive summarizer; fails when the text cannot be summarized
#[cfg_attr(test, automock)]
pub trait Summarizer: Send + Sync {
    fn summarize(&self, text: &str, ratio: f64) -> std::result::Result<String, CapabilityError>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> std::result::Result<String, CapabilityError>;
}

#[cfg_attr(test, automock)]
pub trait SentimentAnalyzer: Send + Sync {
    fn score(&self, text: &str) -> SentimentScore;
}

#[cfg_attr(test, automock)]
pub trait WordCloudRenderer: Send + Sync {
    fn render(&self, text: &str) -> std::result::Result<WordCloudImage, CapabilityError>;
}

/// The set of capabilities one handler works with
#[derive(Clone)]
pub struct Capabilities {
    pub lemmatizer: Arc<dyn Lemmatizer>,
    pub cleaner: Arc<dyn TextCleaner>,
    pub summarizer: Arc<dyn Summarizer>,
    pub translator: Arc<dyn Translator>,
    pub sentiment: Arc<dyn SentimentAnalyzer>,
    pub word_cloud: Arc<dyn WordCloudRenderer>,
}

impl Capabilities {
    /// Default providers, configured from the service configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let stopwords = Arc::new(StopwordSet::english());

        Ok(Self {
            lemmatizer: Arc::new(NlpruleLemmatizer::english()?),
            cleaner: Arc::new(StopwordCleaner::new(stopwords.clone())),
            summarizer: Arc::new(TextRankSummarizer::new(stopwords.clone())),
            translator: Arc::new(GoogleTranslator::new(&config.translation)?),
            sentiment: Arc::new(LexiconSentimentAnalyzer::new()),
            word_cloud: Arc::new(BitmapWordCloud::new(config.word_cloud.clone(), stopwords)),
        })
    }
}
