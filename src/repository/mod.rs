//! Repository layer for database operations

pub mod representations;
pub mod shows;
pub mod venues;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub shows: shows::ShowsRepository,
    pub venues: venues::VenuesRepository,
    pub representations: representations::RepresentationsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            shows: shows::ShowsRepository::new(pool.clone()),
            venues: venues::VenuesRepository::new(pool.clone()),
            representations: representations::RepresentationsRepository::new(pool.clone()),
            pool,
        }
    }

    /// Check that the database answers
    pub async fn ping(&self) -> crate::error::AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
