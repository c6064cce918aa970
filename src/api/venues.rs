//! Venue API endpoints

use axum::{extract::State, Json};

use crate::{error::AppResult, models::venue::Venue};

use super::AuthenticatedUser;

/// List venues
#[utoipa::path(
    get,
    path = "/venues",
    tag = "venues",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Venues ordered by name", body = Vec<Venue>)
    )
)]
pub async fn list_venues(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Venue>>> {
    let venues = state.services.venues.list().await?;
    Ok(Json(venues))
}
