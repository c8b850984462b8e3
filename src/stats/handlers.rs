use axum::{
    extract::{Path, State},
    Json,
};
use tracing::instrument;

use super::impact::ImpactStats;
use crate::shared::{AppError, AppState};

/// GET /stats/:uid
///
/// Derives the environmental impact figures from the user's current
/// point total; unknown users read as zero points.
#[instrument(name = "get_impact_stats", skip(state))]
pub async fn get_stats(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> Result<Json<ImpactStats>, AppError> {
    let points = state.profiles.get_points(&uid).await?;
    Ok(Json(ImpactStats::from_points(points)))
}
