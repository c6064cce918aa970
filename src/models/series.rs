//! Series request and preview types (bulk generation of representations)

use std::collections::HashSet;
use std::fmt::Display;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{de::Error, Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::datetime::{hhmm, parse_date};
use super::representation::{Host, HostKind};
use crate::series::{Capacity, SeriesPlan, SlotStatus, ValidationIssue};

/// Parameters describing a recurring series, as filled in by the operator.
///
/// Fields are kept close to the form: missing values are `None`, free text is
/// kept as typed, and nothing is validated on deserialization. The validity
/// gate decides whether the request can be committed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct SeriesRequest {
    /// First date of the series (YYYY-MM-DD, inclusive)
    #[serde(deserialize_with = "blank_as_none")]
    pub start_date: Option<NaiveDate>,
    /// Last date of the series (YYYY-MM-DD, inclusive)
    #[serde(deserialize_with = "blank_as_none")]
    pub end_date: Option<NaiveDate>,
    /// Enabled weekdays, index 0 = Sunday .. 6 = Saturday
    #[schema(value_type = Vec<bool>)]
    pub week_days: [bool; 7],
    /// Times of day (HH:MM), one representation per time and eligible date
    pub times: Vec<String>,
    #[serde(deserialize_with = "blank_as_none")]
    pub venue_id: Option<Uuid>,
    /// Seat capacity applied to every generated representation
    pub capacity: Option<i32>,
    /// Generate representations without a seat limit
    pub unlimited_capacity: bool,
    pub hosted_by: HostKind,
    /// Agency staff member, required when `hosted_by` is `agency`
    pub hosted_by_id: Option<Uuid>,
    /// Dates to skip (YYYY-MM-DD); blank entries are ignored
    pub excluded_dates: Vec<String>,
    /// Also create slots that already exist at the same venue
    pub include_exact_duplicates: bool,
    /// Also create slots that collide with a representation at another venue
    pub include_conflicts: bool,
}

/// Read an optional form field, an empty or blank string meaning unset
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => raw.trim().parse().map(Some).map_err(D::Error::custom),
        _ => Ok(None),
    }
}

impl SeriesRequest {
    /// Non-blank exclusion entries that parse as dates
    pub fn excluded_date_set(&self) -> HashSet<NaiveDate> {
        self.excluded_dates
            .iter()
            .filter_map(|raw| parse_date(raw))
            .collect()
    }

    /// Capacity applied to the series, `None` when not acceptable
    pub fn capacity_setting(&self) -> Option<Capacity> {
        if self.unlimited_capacity {
            return Some(Capacity::Unlimited);
        }
        match self.capacity {
            Some(seats) if seats > 0 => Some(Capacity::Seats(seats)),
            _ => None,
        }
    }

    /// Host designation applied to the series, `None` when agency lacks a staff member
    pub fn host(&self) -> Option<Host> {
        Host {
            hosted_by: self.hosted_by,
            hosted_by_id: self.hosted_by_id,
        }
        .normalized()
    }
}

/// One candidate as shown in the preview
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PreviewSlot {
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "20:30")]
    pub time: NaiveTime,
    pub venue_id: Uuid,
    pub status: SlotStatus,
    /// Whether the slot would be created with the current flags
    pub selected: bool,
}

/// Result of a series preview
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SeriesPreview {
    pub candidates: Vec<PreviewSlot>,
    pub ok_count: usize,
    pub duplicate_count: usize,
    pub conflict_count: usize,
    /// Number of representations a commit would create
    pub selected_count: usize,
    /// Reasons preventing the commit, empty when `can_commit`
    pub issues: Vec<ValidationIssue>,
    pub can_commit: bool,
}

impl SeriesPreview {
    pub fn from_plan(plan: &SeriesPlan) -> Self {
        let count = |status: SlotStatus| {
            plan.candidates
                .iter()
                .filter(|candidate| candidate.status == status)
                .count()
        };

        let candidates = plan
            .candidates
            .iter()
            .map(|candidate| PreviewSlot {
                date: candidate.slot.date,
                time: candidate.slot.time,
                venue_id: candidate.slot.venue_id,
                status: candidate.status,
                selected: plan.flags.admits(candidate.status),
            })
            .collect();

        Self {
            candidates,
            ok_count: count(SlotStatus::Ok),
            duplicate_count: count(SlotStatus::ExactDuplicate),
            conflict_count: count(SlotStatus::Conflict),
            selected_count: plan.selected.len(),
            issues: plan.issues.clone(),
            can_commit: plan.issues.is_empty(),
        }
    }
}
