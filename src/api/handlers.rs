//! HTTP request handlers

use super::types::{MessageRequest, MessageResponse, VersionResponse};
use super::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Generic failure reply sent when a turn cannot complete
const TURN_FAILURE_REPLY: &str = "Oops, something went wrong! Please try again.";

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/messages", post(handle_message))
        .route("/version", get(get_version))
        .with_state(state)
}

/// One inbound turn: route it through the engine and reply.
///
/// Validation problems are handled inside the engine as corrective
/// replies; an `Err` here means a store failed, so the user gets the
/// generic failure reply and the session state is untouched.
async fn handle_message(
    State(state): State<AppState>,
    Json(req): Json<MessageRequest>,
) -> Response {
    match state
        .engine
        .handle_turn(&req.conversation_id, &req.user_id, &req.text)
        .await
    {
        Ok(reply) => Json(MessageResponse { reply }).into_response(),
        Err(err) => {
            tracing::error!(
                conversation_id = %req.conversation_id,
                error = %err,
                "Turn failed"
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MessageResponse {
                    reply: TURN_FAILURE_REPLY.to_string(),
                }),
            )
                .into_response()
        }
    }
}

async fn get_version() -> Json<VersionResponse> {
    Json(VersionResponse {
        version: env!("CARGO_PKG_VERSION"),
    })
}
