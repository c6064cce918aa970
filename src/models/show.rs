//! Show model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Show record (only the fields the scheduling side needs)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Show {
    pub id: Uuid,
    pub title: String,
    /// Producing company
    pub company_id: Option<Uuid>,
    pub crea_date: Option<DateTime<Utc>>,
}
