//! Business logic services

pub mod representations;
pub mod series;
pub mod venues;

use std::sync::Arc;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub repository: Repository,
    pub representations: representations::RepresentationsService,
    pub series: series::SeriesService,
    pub venues: venues::VenuesService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            representations: representations::RepresentationsService::new(repository.clone()),
            series: series::SeriesService::new(Arc::new(repository.clone())),
            venues: venues::VenuesService::new(repository.clone()),
            repository,
        }
    }
}
