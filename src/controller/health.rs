use axum::{response::IntoResponse, Json};

use crate::model::api::HealthResponseDto;

/// GET /health - Liveness probe.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponseDto { ok: true })
}
