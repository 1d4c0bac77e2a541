//! Integration tests for the Text Analysis Service
//!
//! The router is driven in-process with `oneshot`; the translation provider is
//! replaced by a wiremock server.

use axum::{
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode},
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use text_analysis_service::{build_router, AppState, Config};

const SESSION_HEADER: &str = "x-session-id";

fn create_test_app(translation_url: &str) -> axum::Router {
    let mut config = Config::default();
    config.environment = "test".to_string();
    config.translation.api_url = translation_url.to_string();
    config.translation.timeout_seconds = 5;

    let state = AppState::new(config).expect("Failed to create test state");
    build_router(state)
}

/// App whose translator points at a closed port
fn create_offline_app() -> axum::Router {
    create_test_app("http://127.0.0.1:9")
}

async fn make_request(
    app: &axum::Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    session_id: Option<&str>,
) -> (StatusCode, HeaderMap, Value) {
    let mut request_builder = Request::builder().method(method).uri(uri);

    if let Some(session_id) = session_id {
        request_builder = request_builder.header(SESSION_HEADER, session_id);
    }

    let request = if let Some(body) = body {
        request_builder
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap()
    } else {
        request_builder.body(Body::empty()).unwrap()
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let body_json: Value = if body_bytes.is_empty() {
        json!({})
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(json!({}))
    };

    (status, headers, body_json)
}

async fn mount_translation(server: &MockServer, target: &str, translated: &str, calls: u64) {
    Mock::given(method("GET"))
        .and(path("/translate_a/single"))
        .and(query_param("sl", "auto"))
        .and(query_param("tl", target))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([[[translated, "source", null]], null, "xx"])),
        )
        .expect(calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_offline_app();

    let (status, _, body) = make_request(&app, Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "text-analysis");
    assert_eq!(body["lemma_cache"]["capacity"], 128);
}

#[tokio::test]
async fn test_capabilities_and_languages() {
    let app = create_offline_app();

    let (status, _, body) = make_request(&app, Method::GET, "/v1/capabilities", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["menu"],
        json!(["Text Analysis", "Translation", "Sentiment Analysis", "About"])
    );
    assert_eq!(body["operations"].as_array().unwrap().len(), 6);
    assert_eq!(body["limits"]["min_translation_chars"], 3);
    assert_eq!(body["limits"]["max_translation_chars"], 5000);
    assert_eq!(body["limits"]["summary_ratio"], 0.4);

    let (status, _, body) = make_request(&app, Method::GET, "/v1/languages", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let languages = body.as_array().unwrap();
    assert_eq!(languages.len(), 6);
    assert!(languages.contains(&json!({"name": "Chinese", "code": "zh-CN"})));

    let (status, _, body) = make_request(&app, Method::GET, "/v1/about", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "NLP Simple Examples");
    assert_eq!(body["authors"][0]["name"], "Rosario Moscato LAB");
    assert_eq!(body["authors"][0]["email"], "rosariomoscatolab@gmail.com");
}

#[tokio::test]
async fn test_token_lemma_operation() {
    let app = create_offline_app();

    let (status, headers, body) = make_request(
        &app,
        Method::POST,
        "/v1/operations",
        Some(json!({"raw_text": "running dogs", "operation": "TOKEN_LEMMA"})),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(!headers.contains_key(SESSION_HEADER));
    assert_eq!(body["status"], "ok");

    let result = &body["data"]["results"][0];
    assert_eq!(result["kind"], "token_lemma_list");
    assert_eq!(
        result["value"],
        json!([
            {"token": "running", "lemma": "run"},
            {"token": "dogs", "lemma": "dog"}
        ])
    );
}

#[tokio::test]
async fn test_empty_text_warns_for_every_operation() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let app = create_test_app(&server.uri());

    for operation in ["TOKEN_LEMMA", "STOPWORDS", "WORDCLOUD", "SUMMARIZE", "SENTIMENT"] {
        let (status, _, body) = make_request(
            &app,
            Method::POST,
            "/v1/operations",
            Some(json!({"raw_text": "", "operation": operation})),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK, "{}", operation);
        assert_eq!(body["status"], "warning");
        assert_eq!(body["warning"]["kind"], "INPUT_TOO_SHORT");
        assert_eq!(body["warning"]["message"], "Enter a text...");
    }

    let (_, _, body) = make_request(
        &app,
        Method::POST,
        "/v1/translate",
        Some(json!({"text": "", "target_language": "Spanish"})),
        None,
    )
    .await;
    assert_eq!(body["warning"]["kind"], "INPUT_TOO_SHORT");

    let (_, _, body) =
        make_request(&app, Method::POST, "/v1/analyze", Some(json!({"text": ""})), None).await;
    assert_eq!(body["warning"]["message"], "Enter a text...");
}

#[tokio::test]
async fn test_translate_endpoint() {
    let server = MockServer::start().await;
    mount_translation(&server, "de", "Guten Morgen", 1).await;
    let app = create_test_app(&server.uri());

    let (status, _, body) = make_request(
        &app,
        Method::POST,
        "/v1/translate",
        Some(json!({"text": "Good morning", "target_language": "German"})),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["operation"], "TRANSLATE");
    assert_eq!(body["data"]["results"][0]["kind"], "translated_text");
    assert_eq!(body["data"]["results"][0]["value"], "Guten Morgen");
}

#[tokio::test]
async fn test_short_translation_is_not_sent() {
    let server = MockServer::start().await;
    mount_translation(&server, "it", "ciao", 0).await;
    let app = create_test_app(&server.uri());

    let (status, _, body) = make_request(
        &app,
        Method::POST,
        "/v1/operations",
        Some(json!({"raw_text": "hi", "operation": "TRANSLATE", "target_language": "it"})),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "warning");
    assert_eq!(body["warning"]["kind"], "INPUT_TOO_SHORT");
}

#[tokio::test]
async fn test_translate_request_errors() {
    let app = create_offline_app();

    let (status, _, body) = make_request(
        &app,
        Method::POST,
        "/v1/translate",
        Some(json!({"text": "Good morning", "target_language": "French"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BAD_REQUEST");

    let (status, _, body) = make_request(
        &app,
        Method::POST,
        "/v1/operations",
        Some(json!({"raw_text": "Good morning", "operation": "TRANSLATE"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_sentiment_endpoint() {
    let server = MockServer::start().await;
    mount_translation(&server, "en", "I love this, it is wonderful", 1).await;
    let app = create_test_app(&server.uri());

    let (status, _, body) = make_request(
        &app,
        Method::POST,
        "/v1/sentiment",
        Some(json!({"text": "Ich liebe das, es ist wunderbar"})),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let score = &body["data"]["results"][0];
    assert_eq!(score["kind"], "sentiment_score");
    assert!(score["value"]["polarity"].as_f64().unwrap() > 0.0);
    assert!(score["value"]["subjectivity"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn test_negative_sentiment() {
    let server = MockServer::start().await;
    mount_translation(&server, "en", "This is a terrible and awful movie", 1).await;
    let app = create_test_app(&server.uri());

    let (_, _, body) = make_request(
        &app,
        Method::POST,
        "/v1/operations",
        Some(json!({"raw_text": "This is a terrible and awful movie", "operation": "SENTIMENT"})),
        None,
    )
    .await;

    assert!(body["data"]["results"][0]["value"]["polarity"].as_f64().unwrap() < 0.0);
}

#[tokio::test]
async fn test_translator_failure_is_a_warning() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let app = create_test_app(&server.uri());

    let (status, _, body) = make_request(
        &app,
        Method::POST,
        "/v1/sentiment",
        Some(json!({"text": "Ich liebe das"})),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "warning");
    assert_eq!(body["warning"]["kind"], "EXTERNAL_CAPABILITY_FAILURE");
}

#[tokio::test]
async fn test_summarize_single_sentence() {
    let app = create_offline_app();

    let (status, _, body) = make_request(
        &app,
        Method::POST,
        "/v1/operations",
        Some(json!({"raw_text": "Only one sentence here.", "operation": "SUMMARIZE"})),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["warning"]["message"], "Please insert a longer text...");
}

#[tokio::test]
async fn test_analyze_and_session_lifecycle() {
    let app = create_offline_app();
    let text = "Rust is a systems programming language. \
        The Rust compiler checks memory safety at compile time. \
        Memory safety without garbage collection makes Rust programs fast. \
        Cats sleep most of the day. \
        Rust programs avoid data races through ownership and memory safety.";

    let (status, headers, created) =
        make_request(&app, Method::POST, "/v1/sessions", None, None).await;
    assert_eq!(status, StatusCode::CREATED);
    let session_id = headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap()
        .to_string();
    assert_eq!(created["session_id"], session_id.as_str());

    let (status, headers, body) = make_request(
        &app,
        Method::POST,
        "/v1/analyze",
        Some(json!({"text": text})),
        Some(&session_id),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers.get(SESSION_HEADER).unwrap(), session_id.as_str());
    let report = &body["data"];
    assert_eq!(report["stats"]["length_of_text"], text.chars().count());
    assert!(report["stopwords"].as_array().unwrap().len() > 0);
    assert_eq!(report["word_cloud"]["format"], "png");
    assert_eq!(report["summary"].as_str().unwrap().lines().count(), 2);
    assert!(report["tokens"].as_array().unwrap().len() > 30);
    assert_eq!(report["warnings"], json!([]));

    let (_, headers, _) = make_request(
        &app,
        Method::POST,
        "/v1/operations",
        Some(json!({"raw_text": "running dogs", "operation": "TOKEN_LEMMA"})),
        Some(&session_id),
    )
    .await;
    assert_eq!(headers.get(SESSION_HEADER).unwrap(), session_id.as_str());

    let uri = format!("/v1/sessions/{}", session_id);
    let (status, _, snapshot) = make_request(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["session_id"], session_id.as_str());
    assert_eq!(snapshot["text_analysis"]["status"], "ok");
    assert_eq!(snapshot["last_operation"]["data"]["operation"], "TOKEN_LEMMA");
    assert_eq!(snapshot["translation"], Value::Null);

    let (status, _, _) = make_request(&app, Method::DELETE, &uri, None, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _, body) = make_request(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_requests_without_a_session_keep_sessions_intact() {
    let mut config = Config::default();
    config.sessions.max_sessions = 1;
    config.translation.api_url = "http://127.0.0.1:9".to_string();
    let app = build_router(AppState::new(config).unwrap());

    let (_, headers, _) = make_request(&app, Method::POST, "/v1/sessions", None, None).await;
    let session_id = headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap()
        .to_string();

    for unknown in [None, Some("not-a-uuid"), Some("6f1c1a52-3f0e-4a34-9d1b-0c9b2f1e7a10")] {
        let (status, headers, _) = make_request(
            &app,
            Method::POST,
            "/v1/operations",
            Some(json!({"raw_text": "cats", "operation": "TOKEN_LEMMA"})),
            unknown,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(!headers.contains_key(SESSION_HEADER));
    }

    let uri = format!("/v1/sessions/{}", session_id);
    let (status, _, snapshot) = make_request(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["last_operation"], Value::Null);
}

#[tokio::test]
async fn test_invalid_requests() {
    let app = create_offline_app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/v1/operations")
        .header("Content-Type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (status, _, _) = make_request(
        &app,
        Method::POST,
        "/v1/operations",
        Some(json!({"raw_text": "hello", "operation": "SHOUT"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) =
        make_request(&app, Method::GET, "/v1/sessions/not-a-uuid", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = make_request(&app, Method::GET, "/v1/unknown", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
