//! Text analysis request handler
//!
//! Turns one user action into a [`ScreenResponse`]. Input checks happen here,
//! before any capability is called; capability failures are caught and shown
//! as warnings. Only malformed requests become an [`AppError`].

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use nlp_examples_shared::{
    AnalysisRequest, AnalysisResult, CacheStats, Operation, OperationOutput, ScreenResponse,
    SentimentScore, TargetLanguage, TextAnalysisReport, TokenLemma, UserWarning, WordCloudImage,
    AUTO_DETECT, MSG_LONGER_TEXT,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::cache::LemmaCache;
use crate::capabilities::Capabilities;
use crate::error::{AppError, CapabilityError, Result};

/// Share of sentences kept by the summarizer
pub const SUMMARY_RATIO: f64 = 0.4;
/// Shortest text sent to the translator
pub const MIN_TRANSLATION_CHARS: usize = 3;

#[derive(Clone)]
pub struct TextAnalysisHandler {
    capabilities: Capabilities,
    cache: Arc<LemmaCache>,
    max_translation_chars: usize,
}

impl TextAnalysisHandler {
    pub fn new(
        capabilities: Capabilities,
        cache: Arc<LemmaCache>,
        max_translation_chars: usize,
    ) -> Self {
        Self {
            capabilities,
            cache,
            max_translation_chars,
        }
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn max_translation_chars(&self) -> usize {
        self.max_translation_chars
    }

    /// Run a single operation
    pub async fn handle(&self, request: &AnalysisRequest) -> Result<ScreenResponse<OperationOutput>> {
        let text = request.raw_text.as_str();
        info!(
            "Handling {} request ({} chars)",
            request.operation,
            text.chars().count()
        );

        // a missing target is a malformed request even when the text is empty
        if request.operation == Operation::Translate && request.target_language.is_none() {
            return Err(missing_target());
        }

        if text.is_empty() {
            return Ok(ScreenResponse::warning(UserWarning::empty_text()));
        }

        let started = Instant::now();

        match request.operation {
            Operation::TokenLemma => {
                let tokens = self.lemmas(text).await?;
                Ok(ok_output(
                    Operation::TokenLemma,
                    vec![AnalysisResult::TokenLemmaList(tokens.as_ref().clone())],
                    started,
                ))
            }
            Operation::Stopwords => {
                let cleaner = &self.capabilities.cleaner;
                Ok(ok_output(
                    Operation::Stopwords,
                    vec![
                        AnalysisResult::TextStats(cleaner.word_stats(text)),
                        AnalysisResult::ProcessedText(cleaner.remove_stopwords(text)),
                        AnalysisResult::StopwordList(cleaner.extract_stopwords(text)),
                    ],
                    started,
                ))
            }
            Operation::Wordcloud => match self.word_cloud(text).await? {
                Ok(image) => Ok(ok_output(
                    Operation::Wordcloud,
                    vec![AnalysisResult::WordCloudImage(image)],
                    started,
                )),
                Err(e) => Ok(ScreenResponse::warning(word_cloud_warning(&e))),
            },
            Operation::Summarize => match self.summary(text).await? {
                Some(summary) => Ok(ok_output(
                    Operation::Summarize,
                    vec![AnalysisResult::SummaryText(summary)],
                    started,
                )),
                None => Ok(ScreenResponse::warning(UserWarning::input_too_short(
                    MSG_LONGER_TEXT,
                ))),
            },
            Operation::Translate => match request.target_language {
                Some(target) => self.translate(text, target).await,
                None => Err(missing_target()),
            },
            Operation::Sentiment => self.sentiment(text).await,
        }
    }

    /// The Text Analysis screen: every panel computed from one submission
    pub async fn analyse_text(&self, text: &str) -> Result<ScreenResponse<TextAnalysisReport>> {
        info!("Analysing text ({} chars)", text.chars().count());

        if text.is_empty() {
            return Ok(ScreenResponse::warning(UserWarning::empty_text()));
        }

        let started = Instant::now();
        let cleaner = &self.capabilities.cleaner;
        let stats = cleaner.word_stats(text);
        let processed_text = cleaner.remove_stopwords(text);
        let stopwords = cleaner.extract_stopwords(text);

        let (tokens, word_cloud, summary) =
            tokio::join!(self.lemmas(text), self.word_cloud(text), self.summary(text));

        let mut warnings = Vec::new();

        let word_cloud = match word_cloud? {
            Ok(image) => Some(image),
            Err(e) => {
                warnings.push(word_cloud_warning(&e));
                None
            }
        };

        let summary = summary?;
        if summary.is_none() {
            warnings.push(UserWarning::input_too_short(MSG_LONGER_TEXT));
        }

        let report = TextAnalysisReport {
            id: Uuid::new_v4(),
            stats,
            processed_text,
            stopwords,
            word_cloud,
            tokens: tokens?.as_ref().clone(),
            summary,
            warnings,
            processing_time_ms: started.elapsed().as_millis() as u64,
            created_at: Utc::now(),
        };

        debug!(
            "Text analysis finished in {}ms with {} warnings",
            report.processing_time_ms,
            report.warnings.len()
        );

        Ok(ScreenResponse::ok(report))
    }

    /// The Translation screen
    pub async fn translate(
        &self,
        text: &str,
        target: TargetLanguage,
    ) -> Result<ScreenResponse<OperationOutput>> {
        if let Some(warning) = self.check_translation_input(text, MIN_TRANSLATION_CHARS) {
            return Ok(ScreenResponse::warning(warning));
        }

        let started = Instant::now();

        match self
            .capabilities
            .translator
            .translate(text, AUTO_DETECT, target.code())
            .await
        {
            Ok(translated) => Ok(ok_output(
                Operation::Translate,
                vec![AnalysisResult::TranslatedText(translated)],
                started,
            )),
            Err(e) => {
                warn!("Translation to {} failed: {}", target.code(), e);
                Ok(ScreenResponse::warning(translation_warning(&e)))
            }
        }
    }

    /// The Sentiment Analysis screen: translate to English, then score
    pub async fn sentiment(&self, text: &str) -> Result<ScreenResponse<OperationOutput>> {
        if let Some(warning) = self.check_translation_input(text, 1) {
            return Ok(ScreenResponse::warning(warning));
        }

        let started = Instant::now();

        let english = match self
            .capabilities
            .translator
            .translate(text, AUTO_DETECT, TargetLanguage::English.code())
            .await
        {
            Ok(english) => english,
            Err(e) => {
                warn!("Translation before sentiment scoring failed: {}", e);
                return Ok(ScreenResponse::warning(translation_warning(&e)));
            }
        };

        let score: SentimentScore = self.capabilities.sentiment.score(&english);
        debug!(
            "Sentiment {} (polarity={:.3} subjectivity={:.3})",
            score.label(),
            score.polarity,
            score.subjectivity
        );

        Ok(ok_output(
            Operation::Sentiment,
            vec![AnalysisResult::SentimentScore(score)],
            started,
        ))
    }

    fn check_translation_input(&self, text: &str, min_chars: usize) -> Option<UserWarning> {
        let length = text.chars().count();

        if length == 0 {
            Some(UserWarning::empty_text())
        } else if length < min_chars {
            Some(UserWarning::input_too_short(format!(
                "Please insert at least {} characters to translate...",
                min_chars
            )))
        } else if length > self.max_translation_chars {
            Some(UserWarning::input_too_long(format!(
                "Text is too long to translate ({} characters, maximum {})",
                length, self.max_translation_chars
            )))
        } else {
            None
        }
    }

    async fn lemmas(&self, text: &str) -> Result<Arc<Vec<TokenLemma>>> {
        if let Some(tokens) = self.cache.get(text) {
            debug!("Lemma cache hit");
            return Ok(tokens);
        }

        let lemmatizer = self.capabilities.lemmatizer.clone();
        let owned = text.to_string();
        let tokens = tokio::task::spawn_blocking(move || lemmatizer.analyse(&owned)).await?;

        let tokens = Arc::new(tokens);
        self.cache.insert(text, tokens.clone());
        Ok(tokens)
    }

    /// `None` when there is nothing to show, whatever the reason
    async fn summary(&self, text: &str) -> Result<Option<String>> {
        let summarizer = self.capabilities.summarizer.clone();
        let owned = text.to_string();
        let result =
            tokio::task::spawn_blocking(move || summarizer.summarize(&owned, SUMMARY_RATIO))
                .await?;

        match result {
            Ok(summary) if !summary.trim().is_empty() => Ok(Some(summary)),
            Ok(_) => Ok(None),
            Err(e) => {
                debug!("Summarizer declined the text: {}", e);
                Ok(None)
            }
        }
    }

    async fn word_cloud(
        &self,
        text: &str,
    ) -> Result<std::result::Result<WordCloudImage, CapabilityError>> {
        let renderer = self.capabilities.word_cloud.clone();
        let owned = text.to_string();
        let result = tokio::task::spawn_blocking(move || renderer.render(&owned)).await?;

        if let Err(e) = &result {
            warn!("Word cloud rendering failed: {}", e);
        }
        Ok(result)
    }
}

fn ok_output(
    operation: Operation,
    results: Vec<AnalysisResult>,
    started: Instant,
) -> ScreenResponse<OperationOutput> {
    ScreenResponse::ok(OperationOutput {
        id: Uuid::new_v4(),
        operation,
        results,
        processing_time_ms: started.elapsed().as_millis() as u64,
        created_at: Utc::now(),
    })
}

fn missing_target() -> AppError {
    AppError::ValidationError("target_language is required for TRANSLATE".to_string())
}

fn word_cloud_warning(err: &CapabilityError) -> UserWarning {
    UserWarning::capability_failure(format!("Word cloud could not be generated: {}", err))
}

fn translation_warning(err: &CapabilityError) -> UserWarning {
    match err {
        CapabilityError::TooShort(_) => UserWarning::input_too_short(err.to_string()),
        CapabilityError::TooLong(_) => UserWarning::input_too_long(err.to_string()),
        _ => UserWarning::capability_failure(format!("Translation failed: {}", err)),
    }
}
