//! HTTP request and response bodies for the text analysis service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::analysis::Operation;
use super::language::{LanguageOption, TargetLanguage};
use super::screen::{OperationOutput, Screen, ScreenResponse, TextAnalysisReport};

// =============================================================================
// Requests
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyseTextRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    pub target_language: TargetLanguage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentRequest {
    pub text: String,
}

// =============================================================================
// Responses
// =============================================================================

/// What a session currently displays on each screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub text_analysis: Option<ScreenResponse<TextAnalysisReport>>,
    pub translation: Option<ScreenResponse<OperationOutput>>,
    pub sentiment: Option<ScreenResponse<OperationOutput>>,
    pub last_operation: Option<ScreenResponse<OperationOutput>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub uptime_seconds: u64,
    pub active_sessions: usize,
    pub lemma_cache: CacheStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Limits {
    pub min_translation_chars: usize,
    pub max_translation_chars: usize,
    pub summary_ratio: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilitiesResponse {
    pub service: String,
    pub version: String,
    pub menu: Vec<Screen>,
    pub operations: Vec<Operation>,
    pub languages: Vec<LanguageOption>,
    pub limits: Limits,
}

/// Credit line on the About page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub url: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AboutResponse {
    pub title: String,
    pub description: String,
    pub capabilities: Vec<String>,
    pub authors: Vec<Author>,
    pub version: String,
}
