//! Shared type definitions for the NLP examples
//!
//! Request, result and display types used by the text analysis service and
//! its clients.

pub mod analysis;
pub mod api;
pub mod language;
pub mod screen;

pub use analysis::{
    AnalysisRequest, AnalysisResult, Operation, PlacedWord, SentimentScore, TextStats, TokenLemma,
    WordCloudImage,
};
pub use api::{
    AboutResponse, AnalyseTextRequest, Author, CacheStats, CapabilitiesResponse, HealthStatus, Limits,
    SentimentRequest, SessionSnapshot, TranslateRequest,
};
pub use language::{language_table, LanguageOption, TargetLanguage, UnsupportedLanguage, AUTO_DETECT};
pub use screen::{
    OperationOutput, Screen, ScreenResponse, TextAnalysisReport, UserWarning, WarningKind,
    MSG_ENTER_TEXT, MSG_LONGER_TEXT,
};
