//! Series API endpoints (bulk generation of representations)

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        representation::Representation,
        series::{SeriesPreview, SeriesRequest},
    },
};

use super::AuthenticatedUser;

/// Preview a recurring series
///
/// Recomputed from scratch on every call; the form calls it whenever a field changes.
#[utoipa::path(
    post,
    path = "/shows/{id}/series/preview",
    tag = "series",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Show ID")),
    request_body = SeriesRequest,
    responses(
        (status = 200, description = "Candidates with their status", body = SeriesPreview),
        (status = 404, description = "Show not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn preview_series(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(show_id): Path<Uuid>,
    Json(request): Json<SeriesRequest>,
) -> AppResult<Json<SeriesPreview>> {
    claims.require_staff()?;
    let preview = state.services.series.preview(show_id, &request).await?;
    Ok(Json(preview))
}

/// Create the representations of a recurring series
#[utoipa::path(
    post,
    path = "/shows/{id}/series",
    tag = "series",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Show ID")),
    request_body = SeriesRequest,
    responses(
        (status = 201, description = "Representations created", body = Vec<Representation>),
        (status = 404, description = "Show not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Venue deleted meanwhile, nothing created", body = crate::error::ErrorResponse),
        (status = 422, description = "Request not valid or nothing to create", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_series(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(show_id): Path<Uuid>,
    Json(request): Json<SeriesRequest>,
) -> AppResult<(StatusCode, Json<Vec<Representation>>)> {
    claims.require_staff()?;
    let created = state.services.series.commit(show_id, &request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
