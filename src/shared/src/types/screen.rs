//! Display payloads
//!
//! Every user action ends in a [`ScreenResponse`]: either data to show or a
//! single user-facing warning. Warnings are not errors; they are what the
//! screen displays instead of a result.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::analysis::{AnalysisResult, Operation, TextStats, TokenLemma, WordCloudImage};

pub const MSG_ENTER_TEXT: &str = "Enter a text...";
pub const MSG_LONGER_TEXT: &str = "Please insert a longer text...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningKind {
    InputTooShort,
    InputTooLong,
    ExternalCapabilityFailure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserWarning {
    pub kind: WarningKind,
    pub message: String,
}

impl UserWarning {
    pub fn input_too_short(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::InputTooShort,
            message: message.into(),
        }
    }

    pub fn input_too_long(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::InputTooLong,
            message: message.into(),
        }
    }

    pub fn capability_failure(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::ExternalCapabilityFailure,
            message: message.into(),
        }
    }

    /// Warning shown for any action submitted with an empty text box
    pub fn empty_text() -> Self {
        Self::input_too_short(MSG_ENTER_TEXT)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScreenResponse<T> {
    Ok { data: T },
    Warning { warning: UserWarning },
}

impl<T> ScreenResponse<T> {
    pub fn ok(data: T) -> Self {
        ScreenResponse::Ok { data }
    }

    pub fn warning(warning: UserWarning) -> Self {
        ScreenResponse::Warning { warning }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, ScreenResponse::Ok { .. })
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ScreenResponse::Ok { data } => Some(data),
            ScreenResponse::Warning { .. } => None,
        }
    }

    pub fn warning_ref(&self) -> Option<&UserWarning> {
        match self {
            ScreenResponse::Ok { .. } => None,
            ScreenResponse::Warning { warning } => Some(warning),
        }
    }
}

/// Result of a single operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationOutput {
    pub id: Uuid,
    pub operation: Operation,
    pub results: Vec<AnalysisResult>,
    pub processing_time_ms: u64,
    pub created_at: DateTime<Utc>,
}

/// Everything the "Analyse" action of the Text Analysis screen shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAnalysisReport {
    pub id: Uuid,
    pub stats: TextStats,
    pub processed_text: String,
    pub stopwords: Vec<String>,
    pub word_cloud: Option<WordCloudImage>,
    pub tokens: Vec<TokenLemma>,
    pub summary: Option<String>,
    /// Panels that could not render (summary too short, nothing to plot)
    pub warnings: Vec<UserWarning>,
    pub processing_time_ms: u64,
    pub created_at: DateTime<Utc>,
}

/// Menu entries of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    #[serde(rename = "Text Analysis")]
    TextAnalysis,
    #[serde(rename = "Translation")]
    Translation,
    #[serde(rename = "Sentiment Analysis")]
    SentimentAnalysis,
    #[serde(rename = "About")]
    About,
}

impl Screen {
    pub const MENU: [Screen; 4] = [
        Screen::TextAnalysis,
        Screen::Translation,
        Screen::SentimentAnalysis,
        Screen::About,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_response_shape() {
        let response: ScreenResponse<OperationOutput> =
            ScreenResponse::warning(UserWarning::empty_text());
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["status"], "warning");
        assert_eq!(value["warning"]["kind"], "INPUT_TOO_SHORT");
        assert_eq!(value["warning"]["message"], MSG_ENTER_TEXT);
        assert!(!response.is_ok());
        assert!(response.data().is_none());
    }

    #[test]
    fn test_ok_response_shape() {
        let response = ScreenResponse::ok(vec![1, 2, 3]);
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["status"], "ok");
        assert_eq!(value["data"], serde_json::json!([1, 2, 3]));
        assert_eq!(response.data(), Some(&vec![1, 2, 3]));
    }

    #[test]
    fn test_menu_names() {
        let names: Vec<String> = Screen::MENU
            .iter()
            .map(|s| serde_json::to_value(s).unwrap().as_str().unwrap().to_string())
            .collect();
        assert_eq!(
            names,
            vec!["Text Analysis", "Translation", "Sentiment Analysis", "About"]
        );
    }
}
