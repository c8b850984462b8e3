use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::shared::{AppError, AppState};

#[derive(Debug, Serialize, Deserialize)]
pub struct PointsResponse {
    pub uid: String,
    pub points: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IncrementPointsRequest {
    pub delta: u32,
}

/// GET /profile/:uid/points
#[instrument(name = "get_points", skip(state))]
pub async fn get_points(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> Result<Json<PointsResponse>, AppError> {
    let points = state.profiles.get_points(&uid).await?;
    Ok(Json(PointsResponse { uid, points }))
}

/// POST /profile/:uid/points
///
/// Atomic increment; returns the new total.
#[instrument(name = "increment_points", skip(state))]
pub async fn increment_points(
    State(state): State<AppState>,
    Path(uid): Path<String>,
    Json(request): Json<IncrementPointsRequest>,
) -> Result<Json<PointsResponse>, AppError> {
    let points = state.profiles.increment_points(&uid, request.delta).await?;
    Ok(Json(PointsResponse { uid, points }))
}
