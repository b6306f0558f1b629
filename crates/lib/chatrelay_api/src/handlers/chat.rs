//! Chat request handler.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use tracing::debug;

use crate::AppState;
use crate::error::AppResult;
use crate::models::{ChatReply, ChatRequest};

/// `POST /api/chat` — answer a user message.
///
/// A body that cannot be read as `{"message": string}` is treated the same
/// as one without a message.
pub async fn chat_handler(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> AppResult<Json<ChatReply>> {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            debug!("unreadable chat body: {}", rejection.body_text());
            ChatRequest::default()
        }
    };
    debug!(message = ?request.message, "received message");

    let answer = state.resolver.resolve(request.message.as_deref()).await?;
    Ok(Json(ChatReply {
        reply: answer.reply,
    }))
}
