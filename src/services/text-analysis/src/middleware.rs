//! Request logging middleware

use axum::{
    body::Body,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{error, info, warn, Instrument};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Log every request with its matched route, request id, status and duration
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start_time = Instant::now();
    let method = request.method().clone();

    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched_path| matched_path.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|header| header.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let span = tracing::info_span!(
        "http_request",
        method = %method,
        path = %path,
        request_id = %request_id,
        status = tracing::field::Empty,
        duration_ms = tracing::field::Empty,
    );

    span.in_scope(|| info!(method = %method, path = %path, "Request started"));

    let response = next.run(request).instrument(span.clone()).await;

    let duration = start_time.elapsed();
    let status = response.status();

    span.record("status", status.as_u16());
    span.record("duration_ms", duration.as_millis() as u64);
    let _guard = span.enter();

    match status {
        status if status.is_server_error() => {
            error!(
                method = %method,
                path = %path,
                status = %status,
                duration_ms = duration.as_millis() as u64,
                "Request completed with server error"
            );
        }
        status if status.is_client_error() => {
            warn!(
                method = %method,
                path = %path,
                status = %status,
                duration_ms = duration.as_millis() as u64,
                "Request completed with client error"
            );
        }
        _ => {
            info!(
                method = %method,
                path = %path,
                status = %status,
                duration_ms = duration.as_millis() as u64,
                "Request completed successfully"
            );
        }
    }

    response
}
