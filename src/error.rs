//! Error types for Scenebook server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::series::ValidationIssue;

/// Application error codes returned in every error body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    NotAuthorized = 2,
    DbFailure = 3,
    NoSuchData = 4,
    NoSuchVenue = 5,
    BadValue = 6,
    InvalidSeries = 7,
    CapacityExceeded = 8,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    /// The series request did not pass the validity gate
    #[error("Series cannot be generated: {}", join_issues(.0))]
    InvalidSeries(Vec<ValidationIssue>),

    /// The venue was deleted between preview and commit
    #[error("Venue {0} no longer exists, nothing was created")]
    VenueGone(Uuid),

    #[error("Not enough seats left: {0}")]
    CapacityExceeded(String),

    #[error("Business rule violation: {0}")]
    BusinessRule(String),
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl AppError {
    /// Refusal to move the capacity of a representation that has bookings
    pub fn capacity_locked(booked: i32) -> Self {
        AppError::BusinessRule(format!(
            "Capacity cannot change once seats are booked ({} booked)",
            booked
        ))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
    /// Series issues, one per form problem (invalid series only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues: Option<Vec<ValidationIssue>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::Authentication(_) => (StatusCode::UNAUTHORIZED, ErrorCode::NotAuthorized),
            AppError::Authorization(_) => (StatusCode::FORBIDDEN, ErrorCode::NotAuthorized),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NoSuchData),
            AppError::Validation(_) | AppError::BadRequest(_) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue)
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::DbFailure)
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::Failure)
            }
            AppError::InvalidSeries(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, ErrorCode::InvalidSeries)
            }
            AppError::VenueGone(_) => (StatusCode::CONFLICT, ErrorCode::NoSuchVenue),
            AppError::CapacityExceeded(_) => (StatusCode::CONFLICT, ErrorCode::CapacityExceeded),
            AppError::BusinessRule(_) => (StatusCode::UNPROCESSABLE_ENTITY, ErrorCode::Failure),
        };

        // Internal details never leave the server
        let message = match &self {
            AppError::Database(_) => "Database error".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };

        let issues = match self {
            AppError::InvalidSeries(issues) => Some(issues),
            _ => None,
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
            issues,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_series_message_lists_issues() {
        let err = AppError::InvalidSeries(vec![
            ValidationIssue::MissingVenue,
            ValidationIssue::NothingToCreate,
        ]);
        let message = err.to_string();
        assert!(message.contains("venue"));
        assert!(message.contains("; "));
    }

    #[tokio::test]
    async fn test_invalid_series_body_carries_issues() {
        let response = AppError::InvalidSeries(vec![
            ValidationIssue::MissingStartDate,
            ValidationIssue::DuplicateTime,
        ])
        .into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["code"], 7);
        assert_eq!(body["issues"], serde_json::json!(["missing_start_date", "duplicate_time"]));

        let response = AppError::NotFound("Show".to_string()).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body.get("issues").is_none());
    }

    #[test]
    fn test_capacity_locked_is_unprocessable() {
        let err = AppError::capacity_locked(3);
        assert!(err.to_string().contains("3 booked"));
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_status_codes() {
        let response = AppError::VenueGone(Uuid::nil()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = AppError::InvalidSeries(vec![ValidationIssue::NoTimes]).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let response = AppError::NotFound("Show".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
