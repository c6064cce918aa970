//! Representation API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::representation::{
        CreateRepresentation, Representation, ReserveSeats, UpdateRepresentation,
    },
};

use super::AuthenticatedUser;

/// List the representations of a show
#[utoipa::path(
    get,
    path = "/shows/{id}/representations",
    tag = "representations",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Show ID")),
    responses(
        (status = 200, description = "Representations in chronological order", body = Vec<Representation>)
    )
)]
pub async fn list_representations(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(show_id): Path<Uuid>,
) -> AppResult<Json<Vec<Representation>>> {
    let reps = state.services.representations.list_for_show(show_id).await?;
    Ok(Json(reps))
}

/// Create one representation
#[utoipa::path(
    post,
    path = "/shows/{id}/representations",
    tag = "representations",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Show ID")),
    request_body = CreateRepresentation,
    responses(
        (status = 201, description = "Representation created", body = Representation)
    )
)]
pub async fn create_representation(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(show_id): Path<Uuid>,
    Json(data): Json<CreateRepresentation>,
) -> AppResult<(StatusCode, Json<Representation>)> {
    claims.require_staff()?;
    let rep = state.services.representations.create(show_id, &data).await?;
    Ok((StatusCode::CREATED, Json(rep)))
}

/// Get one representation
#[utoipa::path(
    get,
    path = "/representations/{id}",
    tag = "representations",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Representation ID")),
    responses(
        (status = 200, description = "Representation", body = Representation),
        (status = 404, description = "Not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_representation(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Representation>> {
    let rep = state.services.representations.get_by_id(id).await?;
    Ok(Json(rep))
}

/// Update a representation
#[utoipa::path(
    put,
    path = "/representations/{id}",
    tag = "representations",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Representation ID")),
    request_body = UpdateRepresentation,
    responses(
        (status = 200, description = "Representation updated", body = Representation),
        (status = 422, description = "Capacity locked by existing bookings", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_representation(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(data): Json<UpdateRepresentation>,
) -> AppResult<Json<Representation>> {
    claims.require_staff()?;
    let rep = state.services.representations.update(id, &data).await?;
    Ok(Json(rep))
}

/// Delete a representation
#[utoipa::path(
    delete,
    path = "/representations/{id}",
    tag = "representations",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Representation ID")),
    responses(
        (status = 204, description = "Representation deleted")
    )
)]
pub async fn delete_representation(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    claims.require_staff()?;
    state.services.representations.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Book seats on a representation
#[utoipa::path(
    post,
    path = "/representations/{id}/reservations",
    tag = "representations",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Representation ID")),
    request_body = ReserveSeats,
    responses(
        (status = 200, description = "Seats booked", body = Representation),
        (status = 409, description = "Not enough seats left", body = crate::error::ErrorResponse)
    )
)]
pub async fn reserve_seats(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(data): Json<ReserveSeats>,
) -> AppResult<Json<Representation>> {
    let rep = state.services.representations.reserve(id, &data).await?;
    Ok(Json(rep))
}
