//! Collision classification of candidate slots

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::enumerator::CandidateSlot;
use crate::models::representation::Representation;

/// Collision status of a candidate slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    /// Nothing else happens at that date and time
    Ok,
    /// The same date, time and venue already exist
    ExactDuplicate,
    /// Another venue already has a representation at that date and time
    Conflict,
}

/// Date, time and venue of an already persisted representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct ExistingSlot {
    #[sqlx(rename = "rep_date")]
    pub date: NaiveDate,
    #[sqlx(rename = "rep_time")]
    pub time: NaiveTime,
    pub venue_id: Uuid,
}

impl From<&Representation> for ExistingSlot {
    fn from(rep: &Representation) -> Self {
        Self {
            date: rep.date,
            time: rep.time,
            venue_id: rep.venue_id,
        }
    }
}

/// A candidate slot tagged with its status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClassifiedSlot {
    #[serde(flatten)]
    pub slot: CandidateSlot,
    pub status: SlotStatus,
}

/// Classify one candidate against the existing representations
pub fn classify(candidate: &CandidateSlot, existing: &[ExistingSlot]) -> SlotStatus {
    let same_moment = |e: &&ExistingSlot| e.date == candidate.date && e.time == candidate.time;

    if existing
        .iter()
        .filter(same_moment)
        .any(|e| e.venue_id == candidate.venue_id)
    {
        SlotStatus::ExactDuplicate
    } else if existing.iter().any(|e| same_moment(&e)) {
        SlotStatus::Conflict
    } else {
        SlotStatus::Ok
    }
}

/// Classify every candidate, keeping their order
pub fn classify_all(candidates: Vec<CandidateSlot>, existing: &[ExistingSlot]) -> Vec<ClassifiedSlot> {
    candidates
        .into_iter()
        .map(|slot| ClassifiedSlot {
            status: classify(&slot, existing),
            slot,
        })
        .collect()
}
