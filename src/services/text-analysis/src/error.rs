use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, AppError>;

/// Service-level errors. These reach the client as an HTTP error; anything a
/// user can cause by typing (empty or short text, a failed capability) is a
/// warning instead and never becomes an `AppError`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Timeout error: {0}")]
    TimeoutError(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub code: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::ConfigurationError(_) => "CONFIGURATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::ExternalServiceError(_) => "EXTERNAL_SERVICE_ERROR",
            AppError::TimeoutError(_) => "TIMEOUT_ERROR",
            AppError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            AppError::ParseError(_) => "PARSE_ERROR",
            AppError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::ParseError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::TimeoutError(_) => StatusCode::REQUEST_TIMEOUT,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::ExternalServiceError(_) => StatusCode::BAD_GATEWAY,
            AppError::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }

    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        let error_response = ErrorResponse {
            error: self.error_code().to_string(),
            message: self.to_string(),
            code: format!("{}", status_code.as_u16()),
            timestamp: chrono::Utc::now(),
        };

        match &self {
            AppError::InternalServerError(_) | AppError::ConfigurationError(_) => {
                tracing::error!("Server error: {:?}", self);
            }
            AppError::ExternalServiceError(_)
            | AppError::ServiceUnavailable(_)
            | AppError::TimeoutError(_) => {
                tracing::warn!("External service error: {:?}", self);
            }
            AppError::BadRequest(_) | AppError::ValidationError(_) | AppError::ParseError(_) => {
                tracing::info!("Client error: {:?}", self);
            }
            AppError::NotFound(_) => {
                tracing::debug!("Error: {:?}", self);
            }
        }

        (status_code, Json(error_response)).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::TimeoutError(format!("HTTP request timeout: {}", err))
        } else if err.is_connect() {
            AppError::ServiceUnavailable(format!("Connection failed: {}", err))
        } else {
            AppError::ExternalServiceError(format!("Request failed: {}", err))
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::ParseError(format!("JSON parsing failed: {}", err))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigurationError(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::InternalServerError(format!("Background task failed: {}", err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => AppError::NotFound(format!("File not found: {}", err)),
            std::io::ErrorKind::TimedOut => AppError::TimeoutError(format!("I/O timeout: {}", err)),
            std::io::ErrorKind::AddrInUse | std::io::ErrorKind::AddrNotAvailable => {
                AppError::ConfigurationError(format!("Cannot bind address: {}", err))
            }
            _ => AppError::InternalServerError(format!("I/O error: {}", err)),
        }
    }
}

/// Failure of one of the NLP capabilities. The handler turns these into user
/// warnings; they only become an `AppError` when a provider cannot be built
/// at startup.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CapabilityError {
    #[error("Input too short: {0}")]
    TooShort(String),

    #[error("Input too long: {0}")]
    TooLong(String),

    #[error("Capability unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid response from capability: {0}")]
    InvalidResponse(String),

    #[error("Rendering failed: {0}")]
    Rendering(String),
}

impl From<reqwest::Error> for CapabilityError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CapabilityError::InvalidResponse(err.to_string())
        } else {
            CapabilityError::Unavailable(err.to_string())
        }
    }
}

impl From<image::ImageError> for CapabilityError {
    fn from(err: image::ImageError) -> Self {
        CapabilityError::Rendering(err.to_string())
    }
}

impl From<CapabilityError> for AppError {
    fn from(err: CapabilityError) -> Self {
        match err {
            CapabilityError::TooShort(msg) | CapabilityError::TooLong(msg) => {
                AppError::ValidationError(msg)
            }
            CapabilityError::Unavailable(msg) => AppError::ServiceUnavailable(msg),
            CapabilityError::InvalidResponse(msg) => AppError::ExternalServiceError(msg),
            CapabilityError::Rendering(msg) => AppError::InternalServerError(msg),
        }
    }
}

pub fn bad_request<T>(msg: impl Into<String>) -> Result<T> {
    Err(AppError::BadRequest(msg.into()))
}

pub fn not_found<T>(msg: impl Into<String>) -> Result<T> {
    Err(AppError::NotFound(msg.into()))
}
