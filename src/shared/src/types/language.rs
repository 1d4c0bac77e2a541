//! Translation target languages
//!
//! The translation screen only offers a fixed set of targets. Each entry maps
//! the name shown in the menu to the code sent to the translation provider.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Source language passed to the translation provider (auto-detect).
pub const AUTO_DETECT: &str = "auto";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TargetLanguage {
    Chinese,
    English,
    German,
    Italian,
    Russian,
    Spanish,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported target language: {0}")]
pub struct UnsupportedLanguage(pub String);

impl TargetLanguage {
    pub const ALL: [TargetLanguage; 6] = [
        TargetLanguage::Chinese,
        TargetLanguage::English,
        TargetLanguage::German,
        TargetLanguage::Italian,
        TargetLanguage::Russian,
        TargetLanguage::Spanish,
    ];

    /// Code understood by the translation provider
    pub fn code(&self) -> &'static str {
        match self {
            TargetLanguage::Chinese => "zh-CN",
            TargetLanguage::English => "en",
            TargetLanguage::German => "de",
            TargetLanguage::Italian => "it",
            TargetLanguage::Russian => "ru",
            TargetLanguage::Spanish => "es",
        }
    }

    /// Name shown in the language selector
    pub fn display_name(&self) -> &'static str {
        match self {
            TargetLanguage::Chinese => "Chinese",
            TargetLanguage::English => "English",
            TargetLanguage::German => "German",
            TargetLanguage::Italian => "Italian",
            TargetLanguage::Russian => "Russian",
            TargetLanguage::Spanish => "Spanish",
        }
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Accepts either the display name (case-insensitive) or the provider code.
impl FromStr for TargetLanguage {
    type Err = UnsupportedLanguage;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        TargetLanguage::ALL
            .into_iter()
            .find(|lang| {
                lang.display_name().eq_ignore_ascii_case(trimmed)
                    || lang.code().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| UnsupportedLanguage(value.to_string()))
    }
}

impl TryFrom<String> for TargetLanguage {
    type Error = UnsupportedLanguage;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TargetLanguage> for String {
    fn from(lang: TargetLanguage) -> Self {
        lang.code().to_string()
    }
}

/// Entry of the language table returned to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LanguageOption {
    pub name: String,
    pub code: String,
}

impl From<TargetLanguage> for LanguageOption {
    fn from(lang: TargetLanguage) -> Self {
        Self {
            name: lang.display_name().to_string(),
            code: lang.code().to_string(),
        }
    }
}

pub fn language_table() -> Vec<LanguageOption> {
    TargetLanguage::ALL.into_iter().map(LanguageOption::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_match_selector_table() {
        let codes: Vec<&str> = TargetLanguage::ALL.iter().map(|l| l.code()).collect();
        assert_eq!(codes, vec!["zh-CN", "en", "de", "it", "ru", "es"]);
    }

    #[test]
    fn test_parse_by_name_or_code() {
        assert_eq!("german".parse::<TargetLanguage>().unwrap(), TargetLanguage::German);
        assert_eq!("zh-cn".parse::<TargetLanguage>().unwrap(), TargetLanguage::Chinese);
        assert_eq!(" Spanish ".parse::<TargetLanguage>().unwrap(), TargetLanguage::Spanish);
        assert!("French".parse::<TargetLanguage>().is_err());
    }

    #[test]
    fn test_serde_uses_codes() {
        let json = serde_json::to_string(&TargetLanguage::Italian).unwrap();
        assert_eq!(json, "\"it\"");

        let lang: TargetLanguage = serde_json::from_str("\"Russian\"").unwrap();
        assert_eq!(lang, TargetLanguage::Russian);

        assert!(serde_json::from_str::<TargetLanguage>("\"klingon\"").is_err());
    }
}
