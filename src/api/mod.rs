//! HTTP API module - interactions webhook and health endpoints

mod interactions;
pub mod verify;

use std::sync::Arc;

use axum::{response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::dice::Evaluator;
pub use verify::{SignatureVerifier, VerifyError};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub verifier: Arc<SignatureVerifier>,
    pub evaluator: Evaluator,
}

/// Build the API router
pub fn router(verifier: SignatureVerifier, evaluator: Evaluator) -> Router {
    let state = AppState {
        verifier: Arc::new(verifier),
        evaluator,
    };

    Router::new()
        .route("/health", get(health_check))
        .route("/", get(root))
        .merge(interactions::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Root endpoint
async fn root() -> impl IntoResponse {
    Json(RootResponse {
        name: "rollbot",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
struct RootResponse {
    name: &'static str,
    version: &'static str,
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(HealthResponse { status: "healthy" })
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}
