//! Text Analysis Service
//!
//! Tokens and lemmas, stopwords, word cloud, summary, translation and
//! sentiment for a submitted text. The NLP work is done by the capabilities
//! in [`capabilities`]; [`handler::TextAnalysisHandler`] maps every user
//! action to a result or a user-facing warning.

pub mod cache;
pub mod capabilities;
pub mod config;
pub mod error;
pub mod handler;
pub mod handlers;
pub mod middleware;
pub mod session;
pub mod state;
pub mod telemetry;

pub use config::Config;
pub use error::{AppError, CapabilityError, Result};
pub use handler::TextAnalysisHandler;
pub use state::AppState;

use axum::{
    routing::{get, post},
    Router,
};

/// Build the application router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    use tower::ServiceBuilder;
    use tower_http::{
        compression::CompressionLayer,
        cors::CorsLayer,
        request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
        timeout::TimeoutLayer,
        trace::TraceLayer,
    };

    let api_routes = Router::new()
        .route("/capabilities", get(handlers::get_capabilities))
        .route("/about", get(handlers::about))
        .route("/languages", get(handlers::list_languages))
        .route("/analyze", post(handlers::analyze_text))
        .route("/operations", post(handlers::run_operation))
        .route("/translate", post(handlers::translate))
        .route("/sentiment", post(handlers::sentiment))
        .route("/sessions", post(handlers::create_session))
        .route(
            "/sessions/:session_id",
            get(handlers::get_session).delete(handlers::delete_session),
        );

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(CorsLayer::permissive())
                .layer(TimeoutLayer::new(state.config.request_timeout()))
                .layer(axum::middleware::from_fn(middleware::logging_middleware)),
        )
        .with_state(state)
}
