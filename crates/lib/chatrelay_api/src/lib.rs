//! # chatrelay_api
//!
//! HTTP API library for the chat relay.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;

use std::sync::Arc;

use axum::Router;
use axum::routing::post;
use chatrelay_core::resolver::AnswerResolver;
use tower_http::cors::{Any, CorsLayer};

use crate::handlers::chat;

/// Route for the chat endpoint.
pub const POST_API_CHAT: &str = "/api/chat";

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Decides which source answers each message.
    pub resolver: Arc<AnswerResolver>,
}

impl AppState {
    pub fn new(resolver: AnswerResolver) -> Self {
        Self {
            resolver: Arc::new(resolver),
        }
    }
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(POST_API_CHAT, post(chat::chat_handler))
        .layer(cors)
        .with_state(state)
}
