//! Venue model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Venue record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Venue {
    pub id: Uuid,
    /// Display name, copied onto representations
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub crea_date: Option<DateTime<Utc>>,
}
