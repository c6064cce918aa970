//! Representations service (single-record lifecycle and seat reservations)

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        datetime::{parse_date, parse_time},
        representation::{
            CreateRepresentation, Host, Representation, ReserveSeats, UpdateRepresentation,
        },
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct RepresentationsService {
    repository: Repository,
}

impl RepresentationsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List the representations of a show
    pub async fn list_for_show(&self, show_id: Uuid) -> AppResult<Vec<Representation>> {
        self.repository.shows.get_by_id(show_id).await?;
        self.repository.representations.list_for_show(show_id).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Representation> {
        self.repository.representations.get_by_id(id).await
    }

    /// Create a single representation
    pub async fn create(&self, show_id: Uuid, data: &CreateRepresentation) -> AppResult<Representation> {
        data.validate()?;
        let date = parse_date(&data.date)
            .ok_or_else(|| AppError::Validation("Invalid date (use YYYY-MM-DD)".to_string()))?;
        let time = parse_time(&data.time)
            .ok_or_else(|| AppError::Validation("Invalid time (use HH:MM)".to_string()))?;
        let host = resolve_host(Host {
            hosted_by: data.hosted_by,
            hosted_by_id: data.hosted_by_id,
        })?;

        self.repository.shows.get_by_id(show_id).await?;
        let venue = self.repository.venues.get_by_id(data.venue_id).await?;

        let rep = Representation {
            id: Uuid::new_v4(),
            show_id,
            date,
            time,
            venue_id: venue.id,
            venue_name: venue.name,
            capacity: data.capacity,
            booked: 0,
            hosted_by: host.hosted_by,
            hosted_by_id: host.hosted_by_id,
            crea_date: Some(Utc::now()),
            modif_date: None,
        };

        let created = self.repository.representations.insert(&rep).await?;
        tracing::info!("Created representation {} for show {}", created.id, show_id);
        Ok(created)
    }

    /// Update a representation; capacity is frozen once seats are booked
    pub async fn update(&self, id: Uuid, data: &UpdateRepresentation) -> AppResult<Representation> {
        data.validate()?;
        let mut rep = self.repository.representations.get_by_id(id).await?;

        let capacity = data.capacity_after(rep.capacity);
        if !rep.accepts_capacity(capacity) {
            return Err(AppError::capacity_locked(rep.booked));
        }

        if let Some(ref raw) = data.date {
            rep.date = parse_date(raw)
                .ok_or_else(|| AppError::Validation("Invalid date (use YYYY-MM-DD)".to_string()))?;
        }
        if let Some(ref raw) = data.time {
            rep.time = parse_time(raw)
                .ok_or_else(|| AppError::Validation("Invalid time (use HH:MM)".to_string()))?;
        }
        if let Some(venue_id) = data.venue_id {
            if venue_id != rep.venue_id {
                let venue = self.repository.venues.get_by_id(venue_id).await?;
                rep.venue_id = venue.id;
                rep.venue_name = venue.name;
            }
        }
        rep.capacity = capacity;
        if data.hosted_by.is_some() || data.hosted_by_id.is_some() {
            let host = resolve_host(Host {
                hosted_by: data.hosted_by.unwrap_or(rep.hosted_by),
                hosted_by_id: data.hosted_by_id.or(rep.hosted_by_id),
            })?;
            rep.hosted_by = host.hosted_by;
            rep.hosted_by_id = host.hosted_by_id;
        }

        self.repository.representations.update(&rep).await
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.representations.delete(id).await?;
        tracing::info!("Deleted representation {}", id);
        Ok(())
    }

    /// Book seats on a representation within its capacity
    pub async fn reserve(&self, id: Uuid, data: &ReserveSeats) -> AppResult<Representation> {
        data.validate()?;
        let rep = self.repository.representations.reserve(id, data.seats).await?;
        tracing::info!("Booked {} seat(s) on representation {} ({} booked)", data.seats, id, rep.booked);
        Ok(rep)
    }
}

fn resolve_host(host: Host) -> AppResult<Host> {
    host.normalized().ok_or_else(|| {
        AppError::Validation("An agency staff member is required when the agency hosts".to_string())
    })
}
