//! Google Translate client (public `gtx` endpoint)

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::Translator;
use crate::config::TranslationConfig;
use crate::error::{CapabilityError, Result};

#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    client: reqwest::Client,
    api_url: String,
    max_text_length: usize,
}

impl GoogleTranslator {
    pub fn new(config: &TranslationConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("text-analysis/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            max_text_length: config.max_text_length,
        })
    }
}

/// Join the translated chunks of a `translate_a/single` response.
///
/// The body is a nested array whose first element lists
/// `[translated, original, ...]` pairs, one per input segment.
fn parse_translation(body: &Value) -> std::result::Result<String, CapabilityError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| CapabilityError::InvalidResponse("missing translation segments".into()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.is_empty() {
        return Err(CapabilityError::InvalidResponse(
            "translation response contained no text".into(),
        ));
    }

    Ok(translated)
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> std::result::Result<String, CapabilityError> {
        let length = text.chars().count();
        if length > self.max_text_length {
            return Err(CapabilityError::TooLong(format!(
                "{} characters, limit is {}",
                length, self.max_text_length
            )));
        }

        debug!("Translating {} characters {} -> {}", length, source, target);

        let response = self
            .client
            .get(format!("{}/translate_a/single", self.api_url))
            .query(&[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(CapabilityError::Unavailable(format!(
                "translation API error {}: {}",
                status, error_text
            )));
        }

        let body: Value = response.json().await?;
        parse_translation(&body)
    }
}
