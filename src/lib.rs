//! Scenebook booking server
//!
//! REST JSON API used by the agency to schedule the representations of live
//! shows, including the generation of recurring series, and by professional
//! programmers to book seats.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod series;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
