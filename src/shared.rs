use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::classify::InferenceBackend;
use crate::game::{GameError, GameService};
use crate::profile::{ProfileError, ProfileStore};

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub profiles: Arc<dyn ProfileStore>,
    pub games: Arc<GameService>,
    pub inference: Arc<dyn InferenceBackend>,
}

impl AppState {
    pub fn new(
        profiles: Arc<dyn ProfileStore>,
        games: Arc<GameService>,
        inference: Arc<dyn InferenceBackend>,
    ) -> Self {
        Self {
            profiles,
            games,
            inference,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Store error: {0}")]
    StoreError(String),

    #[error("Internal server error")]
    Internal,
}

impl From<GameError> for AppError {
    fn from(error: GameError) -> Self {
        AppError::BadRequest(error.to_string())
    }
}

impl From<ProfileError> for AppError {
    fn from(error: ProfileError) -> Self {
        AppError::StoreError(error.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg),
            AppError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::StoreError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Store error: {}", msg),
            ),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
