//! Shows repository

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::show::Show,
};

#[derive(Clone)]
pub struct ShowsRepository {
    pool: Pool<Postgres>,
}

impl ShowsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get show by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Show> {
        sqlx::query_as::<_, Show>("SELECT id, title, company_id, crea_date FROM shows WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Show {} not found", id)))
    }
}
