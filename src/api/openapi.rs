//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{health, representations, series, venues};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Scenebook API",
        version = "1.0.0",
        description = "Live performance booking REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html"),
        contact(name = "Scenebook Team", email = "dev@scenebook.fr")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Venues
        venues::list_venues,
        // Representations
        representations::list_representations,
        representations::create_representation,
        representations::get_representation,
        representations::update_representation,
        representations::delete_representation,
        representations::reserve_seats,
        // Series
        series::preview_series,
        series::create_series,
    ),
    components(
        schemas(
            crate::models::venue::Venue,
            crate::models::representation::Representation,
            crate::models::representation::HostKind,
            crate::models::representation::CreateRepresentation,
            crate::models::representation::UpdateRepresentation,
            crate::models::representation::ReserveSeats,
            crate::models::series::SeriesRequest,
            crate::models::series::SeriesPreview,
            crate::models::series::PreviewSlot,
            crate::series::SlotStatus,
            crate::series::ValidationIssue,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "venues", description = "Venues"),
        (name = "representations", description = "Representation management and seat booking"),
        (name = "series", description = "Recurring series generation")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
