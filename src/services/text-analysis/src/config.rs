//! Service configuration
//!
//! Settings are layered with the `config` crate: built-in defaults, then an
//! optional file (`config/text-analysis.{yaml,toml,json}` or an explicit
//! path), then `NLP_`-prefixed environment variables using `__` between
//! sections, e.g. `NLP_SERVER__PORT=8805` or `NLP_TRANSLATION__API_URL=...`.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{AppError, Result};

pub const DEFAULT_CONFIG_FILE: &str = "config/text-analysis";
const ENV_PREFIX: &str = "NLP";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub environment: String,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub translation: TranslationConfig,
    pub word_cloud: WordCloudConfig,
    pub cache: CacheConfig,
    pub sessions: SessionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Emit JSON lines instead of human readable output
    pub json: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    /// Base URL of the Google Translate compatible endpoint
    pub api_url: String,
    pub timeout_seconds: u64,
    pub max_text_length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WordCloudConfig {
    pub width: u32,
    pub height: u32,
    pub max_words: usize,
    pub min_font_size: u32,
    /// Weight of relative frequency in font size (0 = rank only, 1 = frequency only)
    pub relative_scaling: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub lemma_capacity: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub ttl_seconds: u64,
    pub sweep_interval_seconds: u64,
    pub max_sessions: usize,
}

impl Config {
    /// Load configuration. An explicit `path` must exist; otherwise the
    /// default file is optional.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let builder = config::Config::builder();

        let builder = match path {
            Some(path) => builder.add_source(config::File::from(Path::new(path)).required(true)),
            None => {
                builder.add_source(config::File::with_name(DEFAULT_CONFIG_FILE).required(false))
            }
        };

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_seconds)
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            return Err(AppError::ConfigurationError(
                "Host cannot be empty".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(AppError::ConfigurationError(format!(
                "Invalid port: {}",
                self.server.port
            )));
        }

        if self.server.request_timeout_seconds == 0 {
            return Err(AppError::ConfigurationError(
                "request_timeout_seconds must be greater than 0".to_string(),
            ));
        }

        self.translation.validate()?;
        self.word_cloud.validate()?;

        if self.cache.lemma_capacity == 0 {
            return Err(AppError::ConfigurationError(
                "cache.lemma_capacity must be greater than 0".to_string(),
            ));
        }

        if self.sessions.ttl_seconds == 0 || self.sessions.sweep_interval_seconds == 0 {
            return Err(AppError::ConfigurationError(
                "Session ttl and sweep interval must be greater than 0".to_string(),
            ));
        }

        if self.sessions.max_sessions == 0 {
            return Err(AppError::ConfigurationError(
                "sessions.max_sessions must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl TranslationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(AppError::ConfigurationError(format!(
                "Translation API URL must be http(s): {}",
                self.api_url
            )));
        }

        if self.timeout_seconds == 0 {
            return Err(AppError::ConfigurationError(
                "translation.timeout_seconds must be greater than 0".to_string(),
            ));
        }

        if self.max_text_length < 3 {
            return Err(AppError::ConfigurationError(format!(
                "Invalid translation.max_text_length: {} (must be at least 3)",
                self.max_text_length
            )));
        }

        Ok(())
    }
}

impl WordCloudConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if !(50..=4096).contains(&value) {
                return Err(AppError::ConfigurationError(format!(
                    "Invalid word_cloud.{}: {} (must be 50-4096)",
                    name, value
                )));
            }
        }

        if self.max_words == 0 {
            return Err(AppError::ConfigurationError(
                "word_cloud.max_words must be greater than 0".to_string(),
            ));
        }

        if self.min_font_size == 0 {
            return Err(AppError::ConfigurationError(
                "word_cloud.min_font_size must be greater than 0".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.relative_scaling) {
            return Err(AppError::ConfigurationError(format!(
                "Invalid word_cloud.relative_scaling: {} (must be 0.0-1.0)",
                self.relative_scaling
            )));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            translation: TranslationConfig::default(),
            word_cloud: WordCloudConfig::default(),
            cache: CacheConfig::default(),
            sessions: SessionConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8805,
            request_timeout_seconds: 60,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            api_url: "https://translate.googleapis.com".to_string(),
            timeout_seconds: 30,
            max_text_length: 5000,
        }
    }
}

impl Default for WordCloudConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 200,
            max_words: 200,
            min_font_size: 7,
            relative_scaling: 0.5,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            lemma_capacity: 128,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: 1800,
            sweep_interval_seconds: 60,
            max_sessions: 10_000,
        }
    }
}
