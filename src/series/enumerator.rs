//! Candidate slot enumeration
//!
//! Expands a date range, a weekday mask and a list of times into the ordered
//! list of `(date, time, venue)` slots. Dates are civil dates: iteration steps
//! one calendar day at a time and never goes through an offset, so daylight
//! saving changes cannot skip or repeat a day.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::Serialize;
use uuid::Uuid;

use crate::models::datetime::{hhmm, parse_time};
use crate::models::series::SeriesRequest;

/// One `(date, time, venue)` slot of a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CandidateSlot {
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub venue_id: Uuid,
}

/// Number of calendar days in `[start, end]`, zero when inverted
pub fn days_in_range(start: NaiveDate, end: NaiveDate) -> i64 {
    ((end - start).num_days() + 1).max(0)
}

/// Parse the usable entries of a time list, in chronological order.
///
/// Blank and malformed entries are skipped here; the validity gate reports
/// them. Repeated times are kept so every entry yields its own slot, the gate
/// refuses them with `DuplicateTime`.
pub fn usable_times(times: &[String]) -> Vec<NaiveTime> {
    let mut parsed: Vec<NaiveTime> = times.iter().filter_map(|raw| parse_time(raw)).collect();
    parsed.sort();
    parsed
}

/// Enumerate the slots for explicit parameters.
///
/// `week_days` is indexed 0 = Sunday .. 6 = Saturday. `times` is expected
/// sorted (see [`usable_times`]) so that the output is ordered by `(date, time)`.
pub fn enumerate_slots(
    start: NaiveDate,
    end: NaiveDate,
    week_days: &[bool; 7],
    times: &[NaiveTime],
    excluded: &HashSet<NaiveDate>,
    venue_id: Uuid,
) -> Vec<CandidateSlot> {
    if end < start || times.is_empty() {
        return Vec::new();
    }

    start
        .iter_days()
        .take_while(|date| *date <= end)
        .filter(|date| week_days[date.weekday().num_days_from_sunday() as usize])
        .filter(|date| !excluded.contains(date))
        .flat_map(|date| {
            times.iter().map(move |&time| CandidateSlot {
                date,
                time,
                venue_id,
            })
        })
        .collect()
}

/// Enumerate the slots of a series request.
///
/// A request missing its start date, end date or venue, or without any usable
/// time, yields no slot.
pub fn enumerate(request: &SeriesRequest) -> Vec<CandidateSlot> {
    let (Some(start), Some(end), Some(venue_id)) =
        (request.start_date, request.end_date, request.venue_id)
    else {
        return Vec::new();
    };

    enumerate_slots(
        start,
        end,
        &request.week_days,
        &usable_times(&request.times),
        &request.excluded_date_set(),
        venue_id,
    )
}
