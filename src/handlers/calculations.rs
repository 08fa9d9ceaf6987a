use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::info;

use crate::db::models::Calculation;
use crate::middleware::validate::ValidCalculation;
use crate::router::ReckonState;
use crate::ReckonError;

/// GET /api/calculations: newest first, capped at 50. Always 200.
pub async fn list_calculations(
    State(state): State<ReckonState>,
) -> Result<Json<Vec<Calculation>>, ReckonError> {
    Ok(Json(state.storage.list().await?))
}

/// POST /api/calculations: 201 with the created entity.
pub async fn create_calculation(
    State(state): State<ReckonState>,
    ValidCalculation(input): ValidCalculation,
) -> Result<impl IntoResponse, ReckonError> {
    let created = state.storage.append(input).await?;
    info!(id = created.id, expression = %created.expression, "calculation stored");
    Ok((StatusCode::CREATED, Json(created)))
}

/// DELETE /api/calculations: unconditional, 204 with empty body.
pub async fn clear_calculations(
    State(state): State<ReckonState>,
) -> Result<StatusCode, ReckonError> {
    state.storage.clear().await?;
    info!("calculation history cleared");
    Ok(StatusCode::NO_CONTENT)
}
