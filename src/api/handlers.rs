use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use super::router::AppState;
use super::types::{ChatCompletionRequest, ChatCompletionResponse, ModelList, Role};

/// Answer substituted when the model returns an empty or blank answer.
pub(crate) const NO_ANSWER_PLACEHOLDER: &str = "(no answer found)";

/// `POST /v1/chat/completions`
///
/// The query is the most recent user-role message. A request without one
/// gets a structured error payload, not an HTTP error status.
pub(crate) async fn chat_completions(
    State(state): State<AppState>,
    Json(req): Json<ChatCompletionRequest>,
) -> Response {
    let query = req
        .messages
        .iter()
        .rev()
        .find(|m| m.role == Role::User)
        .map(|m| m.content.clone());

    let Some(query) = query else {
        return Json(serde_json::json!({ "error": "No user message found." })).into_response();
    };

    match state.rag.ask(&query).await {
        Ok(answer) => {
            let answer = if answer.trim().is_empty() {
                NO_ANSWER_PLACEHOLDER.to_string()
            } else {
                answer
            };
            Json(ChatCompletionResponse::new(&req.model, answer)).into_response()
        }
        Err(e) => {
            error!("retrieval failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

/// `GET /v1/models` — static single-entry listing.
pub(crate) async fn list_models(State(state): State<AppState>) -> Json<ModelList> {
    Json(ModelList::single(&state.served_model))
}
