//! Data models for Scenebook

pub mod datetime;
pub mod representation;
pub mod series;
pub mod show;
pub mod user;
pub mod venue;

// Re-export commonly used types
pub use representation::{HostKind, Representation};
pub use series::{SeriesPreview, SeriesRequest};
pub use show::Show;
pub use user::{Role, UserClaims};
pub use venue::Venue;
