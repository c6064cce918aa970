//! Venues service

use crate::{error::AppResult, models::venue::Venue, repository::Repository};

#[derive(Clone)]
pub struct VenuesService {
    repository: Repository,
}

impl VenuesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Venue>> {
        self.repository.venues.list().await
    }
}
