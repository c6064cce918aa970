//! Representations repository

use sqlx::{Pool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{representation::Representation, venue::Venue},
    series::{ExistingSlot, SeriesBatch},
};

/// Rows per INSERT statement (11 binds per row, Postgres allows 65535)
const INSERT_CHUNK: usize = 1000;

#[derive(Clone)]
pub struct RepresentationsRepository {
    pool: Pool<Postgres>,
}

impl RepresentationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List the representations of a show in chronological order
    pub async fn list_for_show(&self, show_id: Uuid) -> AppResult<Vec<Representation>> {
        let rows = sqlx::query_as::<_, Representation>(
            "SELECT * FROM representations WHERE show_id = $1 ORDER BY rep_date, rep_time, venue_name",
        )
        .bind(show_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Snapshot of the date, time and venue of every representation of a show
    pub async fn existing_slots(&self, show_id: Uuid) -> AppResult<Vec<ExistingSlot>> {
        let rows = sqlx::query_as::<_, ExistingSlot>(
            "SELECT rep_date, rep_time, venue_id FROM representations WHERE show_id = $1",
        )
        .bind(show_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get representation by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Representation> {
        sqlx::query_as::<_, Representation>("SELECT * FROM representations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Representation {} not found", id)))
    }

    /// Insert a single representation
    pub async fn insert(&self, rep: &Representation) -> AppResult<Representation> {
        let row = sqlx::query_as::<_, Representation>(
            r#"
            INSERT INTO representations (
                id, show_id, rep_date, rep_time, venue_id, venue_name,
                capacity, booked, hosted_by, hosted_by_id, crea_date
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(rep.id)
        .bind(rep.show_id)
        .bind(rep.date)
        .bind(rep.time)
        .bind(rep.venue_id)
        .bind(&rep.venue_name)
        .bind(rep.capacity)
        .bind(rep.booked)
        .bind(rep.hosted_by)
        .bind(rep.hosted_by_id)
        .bind(rep.crea_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Insert every representation of a series, or none of them.
    ///
    /// The show and the venue are resolved inside the transaction; the venue
    /// row is share-locked so it cannot disappear before the commit.
    pub async fn insert_series(&self, batch: &SeriesBatch) -> AppResult<Vec<Representation>> {
        let mut tx = self.pool.begin().await?;

        let show_exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM shows WHERE id = $1)")
            .bind(batch.show_id)
            .fetch_one(&mut *tx)
            .await?;
        if !show_exists {
            return Err(AppError::NotFound(format!("Show {} not found", batch.show_id)));
        }

        let venue = sqlx::query_as::<_, Venue>("SELECT * FROM venues WHERE id = $1 FOR SHARE")
            .bind(batch.venue_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(AppError::VenueGone(batch.venue_id))?;

        let records = batch.to_records(&venue, chrono::Utc::now());

        for chunk in records.chunks(INSERT_CHUNK) {
            let mut builder = QueryBuilder::<Postgres>::new(
                "INSERT INTO representations (id, show_id, rep_date, rep_time, venue_id, venue_name, \
                 capacity, booked, hosted_by, hosted_by_id, crea_date) ",
            );
            builder.push_values(chunk, |mut row, rep| {
                row.push_bind(rep.id)
                    .push_bind(rep.show_id)
                    .push_bind(rep.date)
                    .push_bind(rep.time)
                    .push_bind(rep.venue_id)
                    .push_bind(rep.venue_name.clone())
                    .push_bind(rep.capacity)
                    .push_bind(rep.booked)
                    .push_bind(rep.hosted_by)
                    .push_bind(rep.hosted_by_id)
                    .push_bind(rep.crea_date);
            });
            builder.build().execute(&mut *tx).await?;
        }

        tx.commit().await?;
        Ok(records)
    }

    /// Overwrite the editable fields of a representation.
    ///
    /// The capacity freeze is checked by the statement itself so a booking
    /// landing after the caller's read cannot let the capacity move.
    pub async fn update(&self, rep: &Representation) -> AppResult<Representation> {
        let updated = sqlx::query_as::<_, Representation>(
            r#"
            UPDATE representations
            SET rep_date = $2, rep_time = $3, venue_id = $4, venue_name = $5,
                capacity = $6, hosted_by = $7, hosted_by_id = $8, modif_date = NOW()
            WHERE id = $1 AND (booked = 0 OR capacity IS NOT DISTINCT FROM $6)
            RETURNING *
            "#,
        )
        .bind(rep.id)
        .bind(rep.date)
        .bind(rep.time)
        .bind(rep.venue_id)
        .bind(&rep.venue_name)
        .bind(rep.capacity)
        .bind(rep.hosted_by)
        .bind(rep.hosted_by_id)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(rep) => Ok(rep),
            None => {
                let current = self.get_by_id(rep.id).await?;
                Err(AppError::capacity_locked(current.booked))
            }
        }
    }

    /// Delete a representation
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM representations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Representation {} not found", id)));
        }
        Ok(())
    }

    /// Book `seats` seats, refusing to go past a finite capacity
    pub async fn reserve(&self, id: Uuid, seats: i32) -> AppResult<Representation> {
        let updated = sqlx::query_as::<_, Representation>(
            r#"
            UPDATE representations
            SET booked = booked + $2, modif_date = NOW()
            WHERE id = $1 AND (capacity IS NULL OR booked + $2 <= capacity)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(seats)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(rep) => Ok(rep),
            None => {
                let current = self.get_by_id(id).await?;
                Err(AppError::CapacityExceeded(format!(
                    "{} requested, {} left",
                    seats,
                    current.seats_left().unwrap_or(0)
                )))
            }
        }
    }
}
