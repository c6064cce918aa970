//! Representation model (one scheduled occurrence of a show)

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::datetime::hhmm;

/// Who welcomes attendees at a representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HostKind {
    /// The agency, represented by one of its staff members
    Agency,
    /// The producing company
    #[default]
    Company,
}

impl HostKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HostKind::Agency => "agency",
            HostKind::Company => "company",
        }
    }
}

impl std::fmt::Display for HostKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for HostKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "agency" => Ok(HostKind::Agency),
            "company" => Ok(HostKind::Company),
            _ => Err(format!("Invalid host kind: {}", s)),
        }
    }
}

// SQLx conversion for HostKind (stored as TEXT)
impl sqlx::Type<Postgres> for HostKind {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for HostKind {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for HostKind {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <&str as Encode<Postgres>>::encode(self.as_str(), buf)
    }
}

/// Host designation: the kind plus the agency staff member, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct Host {
    pub hosted_by: HostKind,
    pub hosted_by_id: Option<Uuid>,
}

impl Host {
    /// Agency hosting requires a staff member; company hosting never keeps one
    pub fn normalized(self) -> Option<Self> {
        match self.hosted_by {
            HostKind::Agency => self.hosted_by_id.map(|id| Host {
                hosted_by: HostKind::Agency,
                hosted_by_id: Some(id),
            }),
            HostKind::Company => Some(Host {
                hosted_by: HostKind::Company,
                hosted_by_id: None,
            }),
        }
    }
}

/// Representation record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Representation {
    pub id: Uuid,
    /// Owning show
    pub show_id: Uuid,
    /// Calendar date (venue-local)
    #[sqlx(rename = "rep_date")]
    pub date: NaiveDate,
    /// Time of day (HH:MM, venue-local)
    #[sqlx(rename = "rep_time")]
    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "20:30")]
    pub time: NaiveTime,
    pub venue_id: Uuid,
    /// Venue name copied at creation time for display
    pub venue_name: String,
    /// Seat capacity, `null` when unlimited
    pub capacity: Option<i32>,
    /// Seats already booked
    pub booked: i32,
    pub hosted_by: HostKind,
    /// Agency staff member in charge (agency hosting only)
    pub hosted_by_id: Option<Uuid>,
    pub crea_date: Option<DateTime<Utc>>,
    pub modif_date: Option<DateTime<Utc>>,
}

impl Representation {
    /// Seats still available, `None` when capacity is unlimited
    pub fn seats_left(&self) -> Option<i32> {
        self.capacity.map(|capacity| (capacity - self.booked).max(0))
    }

    /// Capacity is frozen once a seat is booked; re-submitting it unchanged is fine
    pub fn accepts_capacity(&self, capacity: Option<i32>) -> bool {
        self.booked == 0 || capacity == self.capacity
    }
}

/// Create a single representation
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRepresentation {
    /// Date (YYYY-MM-DD)
    pub date: String,
    /// Time (HH:MM)
    pub time: String,
    pub venue_id: Uuid,
    /// Seat capacity, omitted or `null` when unlimited
    #[validate(range(min = 1, message = "Capacity must be a positive number"))]
    pub capacity: Option<i32>,
    #[serde(default)]
    pub hosted_by: HostKind,
    pub hosted_by_id: Option<Uuid>,
}

/// Update representation request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateRepresentation {
    /// Date (YYYY-MM-DD)
    pub date: Option<String>,
    /// Time (HH:MM)
    pub time: Option<String>,
    pub venue_id: Option<Uuid>,
    /// New capacity; only accepted while nothing is booked
    #[validate(range(min = 1, message = "Capacity must be a positive number"))]
    pub capacity: Option<i32>,
    /// Switch to unlimited capacity; only accepted while nothing is booked
    #[serde(default)]
    pub unlimited_capacity: bool,
    pub hosted_by: Option<HostKind>,
    pub hosted_by_id: Option<Uuid>,
}

impl UpdateRepresentation {
    /// Capacity after the update, starting from `current`
    pub fn capacity_after(&self, current: Option<i32>) -> Option<i32> {
        if self.unlimited_capacity {
            None
        } else {
            self.capacity.or(current)
        }
    }
}

/// Reserve seats request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReserveSeats {
    /// Number of seats to book
    #[validate(range(min = 1, max = 10000, message = "Seats must be between 1 and 10000"))]
    pub seats: i32,
}
