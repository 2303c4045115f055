use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;

use super::handlers::{chat_completions, list_models};
use crate::rag::RagService;

/// Shared application state, initialized once at startup and read-only
/// per request.
#[derive(Clone)]
pub struct AppState {
    pub rag: Arc<RagService>,
    pub served_model: String,
}

/// Build the API router. CORS is fully permissive: all origins, methods,
/// and headers.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/chat/completions", post(chat_completions))
        .route("/v1/models", get(list_models))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
