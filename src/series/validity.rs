//! Validity gate run before a series can be committed

use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use super::enumerator::usable_times;
use crate::models::datetime::{parse_date, parse_time};
use crate::models::representation::HostKind;
use crate::models::series::SeriesRequest;

/// Reason a series request cannot be committed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ValidationIssue {
    #[error("a start date is required")]
    MissingStartDate,
    #[error("an end date is required")]
    MissingEndDate,
    #[error("the end date is before the start date")]
    InvertedDateRange,
    #[error("at least one weekday must be selected")]
    NoWeekdaySelected,
    #[error("at least one time is required")]
    NoTimes,
    #[error("time entries cannot be blank")]
    BlankTime,
    #[error("times must use the HH:MM format")]
    InvalidTime,
    #[error("the same time is listed more than once")]
    DuplicateTime,
    #[error("a venue must be selected")]
    MissingVenue,
    #[error("capacity must be a positive number or unlimited")]
    InvalidCapacity,
    #[error("an agency staff member must be selected to host")]
    MissingHostStaff,
    #[error("excluded dates must use the YYYY-MM-DD format")]
    InvalidExcludedDate,
    #[error("the series would not create any representation")]
    NothingToCreate,
}

/// Collect every issue of `request` given the number of selected slots.
///
/// An empty result means the request can be committed. `NothingToCreate` is
/// only reported when the inputs are otherwise acceptable.
pub fn check(request: &SeriesRequest, selected_count: usize) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    match (request.start_date, request.end_date) {
        (None, end) => {
            issues.push(ValidationIssue::MissingStartDate);
            if end.is_none() {
                issues.push(ValidationIssue::MissingEndDate);
            }
        }
        (Some(_), None) => issues.push(ValidationIssue::MissingEndDate),
        (Some(start), Some(end)) if end < start => issues.push(ValidationIssue::InvertedDateRange),
        _ => {}
    }

    if !request.week_days.iter().any(|&enabled| enabled) {
        issues.push(ValidationIssue::NoWeekdaySelected);
    }

    if request.times.is_empty() {
        issues.push(ValidationIssue::NoTimes);
    } else if request.times.iter().any(|t| t.trim().is_empty()) {
        issues.push(ValidationIssue::BlankTime);
    } else if request.times.iter().any(|t| parse_time(t).is_none()) {
        issues.push(ValidationIssue::InvalidTime);
    } else if usable_times(&request.times).windows(2).any(|pair| pair[0] == pair[1]) {
        issues.push(ValidationIssue::DuplicateTime);
    }

    if request.venue_id.is_none() {
        issues.push(ValidationIssue::MissingVenue);
    }

    if request.capacity_setting().is_none() {
        issues.push(ValidationIssue::InvalidCapacity);
    }

    if request.hosted_by == HostKind::Agency && request.hosted_by_id.is_none() {
        issues.push(ValidationIssue::MissingHostStaff);
    }

    if request
        .excluded_dates
        .iter()
        .any(|raw| !raw.trim().is_empty() && parse_date(raw).is_none())
    {
        issues.push(ValidationIssue::InvalidExcludedDate);
    }

    if issues.is_empty() && selected_count == 0 {
        issues.push(ValidationIssue::NothingToCreate);
    }

    issues
}
