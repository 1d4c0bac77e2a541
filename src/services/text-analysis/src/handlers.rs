//! HTTP endpoints, one per user action

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use nlp_examples_shared::{
    language_table, AboutResponse, AnalyseTextRequest, AnalysisRequest, Author,
    CapabilitiesResponse, HealthStatus, LanguageOption, Limits, Operation, Screen,
    SentimentRequest, SessionSnapshot, TranslateRequest,
};
use tracing::debug;
use uuid::Uuid;

use crate::error::{bad_request, not_found, AppError, Result};
use crate::handler::{MIN_TRANSLATION_CHARS, SUMMARY_RATIO};
use crate::state::AppState;

pub const SESSION_HEADER: &str = "x-session-id";
const SERVICE_NAME: &str = "text-analysis";

/// Session named by the request header, if the store knows it
fn session_from_headers(state: &AppState, headers: &HeaderMap) -> Option<Uuid> {
    let raw = headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok());
    state.sessions.find(raw)
}

fn with_session(session_id: Option<Uuid>, body: impl IntoResponse) -> Response {
    let mut response = body.into_response();
    if let Some(value) = session_id.and_then(|id| HeaderValue::from_str(&id.to_string()).ok()) {
        response.headers_mut().insert(SESSION_HEADER, value);
    }
    response
}

fn json_body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

fn parse_session_id(raw: &str) -> Result<Uuid> {
    match Uuid::parse_str(raw) {
        Ok(id) => Ok(id),
        Err(_) => bad_request(format!("Invalid session id: {}", raw)),
    }
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        uptime_seconds: state.uptime_seconds(),
        active_sessions: state.sessions.len(),
        lemma_cache: state.handler.cache_stats(),
    })
}

pub async fn get_capabilities(State(state): State<AppState>) -> Json<CapabilitiesResponse> {
    Json(CapabilitiesResponse {
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        menu: Screen::MENU.to_vec(),
        operations: Operation::ALL.to_vec(),
        languages: language_table(),
        limits: Limits {
            min_translation_chars: MIN_TRANSLATION_CHARS,
            max_translation_chars: state.handler.max_translation_chars(),
            summary_ratio: SUMMARY_RATIO,
        },
    })
}

pub async fn about() -> Json<AboutResponse> {
    Json(AboutResponse {
        title: "NLP Simple Examples".to_string(),
        description: "A small demo of natural language processing tasks: submit a text and \
            look at its tokens and lemmas, stopwords, a word cloud, an extractive summary, \
            a translation and a sentiment score."
            .to_string(),
        capabilities: vec![
            "Tokenization and lemmatization".to_string(),
            "Stopword removal and text statistics".to_string(),
            "Word cloud".to_string(),
            "Extractive summarization".to_string(),
            "Translation".to_string(),
            "Sentiment analysis".to_string(),
        ],
        authors: vec![Author {
            name: "Rosario Moscato LAB".to_string(),
            url: Some("https://www.youtube.com/channel/UCDn-FahQNJQOekLrOcR7-7Q".to_string()),
            email: Some("rosariomoscatolab@gmail.com".to_string()),
        }],
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn list_languages() -> Json<Vec<LanguageOption>> {
    Json(language_table())
}

/// Text Analysis screen
pub async fn analyze_text(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: std::result::Result<Json<AnalyseTextRequest>, JsonRejection>,
) -> Result<Response> {
    let request = json_body(payload)?;
    let session_id = session_from_headers(&state, &headers);

    let response = state.handler.analyse_text(&request.text).await?;
    if let Some(id) = session_id {
        state.sessions.record_text_analysis(id, response.clone());
    }

    Ok(with_session(session_id, Json(response)))
}

pub async fn run_operation(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: std::result::Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Response> {
    let request = json_body(payload)?;
    let session_id = session_from_headers(&state, &headers);

    let response = state.handler.handle(&request).await?;
    if let Some(id) = session_id {
        state
            .sessions
            .record_operation(id, request.operation, response.clone());
    }

    Ok(with_session(session_id, Json(response)))
}

/// Translation screen
pub async fn translate(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: std::result::Result<Json<TranslateRequest>, JsonRejection>,
) -> Result<Response> {
    let request = json_body(payload)?;
    let session_id = session_from_headers(&state, &headers);

    let response = state
        .handler
        .translate(&request.text, request.target_language)
        .await?;
    if let Some(id) = session_id {
        state
            .sessions
            .record_operation(id, Operation::Translate, response.clone());
    }

    Ok(with_session(session_id, Json(response)))
}

/// Sentiment Analysis screen
pub async fn sentiment(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: std::result::Result<Json<SentimentRequest>, JsonRejection>,
) -> Result<Response> {
    let request = json_body(payload)?;
    let session_id = session_from_headers(&state, &headers);

    let response = state.handler.sentiment(&request.text).await?;
    if let Some(id) = session_id {
        state
            .sessions
            .record_operation(id, Operation::Sentiment, response.clone());
    }

    Ok(with_session(session_id, Json(response)))
}

/// Start a session; results of later actions carrying its id are kept in it
pub async fn create_session(State(state): State<AppState>) -> Result<Response> {
    let id = state.sessions.create();
    match state.sessions.snapshot(id) {
        Some(snapshot) => Ok(with_session(Some(id), (StatusCode::CREATED, Json(snapshot)))),
        None => not_found(format!("Session {} not found", id)),
    }
}

pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionSnapshot>> {
    let id = parse_session_id(&session_id)?;
    match state.sessions.snapshot(id) {
        Some(snapshot) => Ok(Json(snapshot)),
        None => not_found(format!("Session {} not found", id)),
    }
}

pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode> {
    let id = parse_session_id(&session_id)?;
    if state.sessions.remove(id) {
        debug!("Session {} deleted", id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        not_found(format!("Session {} not found", id))
    }
}
