//! Recurring series generation
//!
//! A series request goes through a one-way chain of pure steps:
//! enumeration of candidate slots, classification against the existing
//! representations of the show, selection according to the include flags, and
//! the validity gate. [`SeriesPlan::compute`] runs the whole chain; callers run
//! it again whenever the request or the snapshot of existing representations
//! changes, nothing is cached between calls.
//!
//! Only the final commit touches storage, see [`SeriesBatch`].

pub mod classifier;
pub mod commit;
pub mod enumerator;
pub mod selection;
pub mod validity;

pub use classifier::{classify, classify_all, ClassifiedSlot, ExistingSlot, SlotStatus};
pub use commit::{Capacity, SeriesBatch};
pub use enumerator::{days_in_range, enumerate, enumerate_slots, usable_times, CandidateSlot};
pub use selection::{select, SelectionFlags};
pub use validity::{check, ValidationIssue};

use uuid::Uuid;

use crate::models::series::SeriesRequest;

/// Derived state of a series request against one snapshot
#[derive(Debug, Clone)]
pub struct SeriesPlan {
    pub candidates: Vec<ClassifiedSlot>,
    pub flags: SelectionFlags,
    pub selected: Vec<CandidateSlot>,
    pub issues: Vec<ValidationIssue>,
}

impl SeriesPlan {
    /// Run enumeration, classification, selection and the validity gate
    pub fn compute(request: &SeriesRequest, existing: &[ExistingSlot]) -> Self {
        let flags = SelectionFlags::from(request);
        let candidates = classify_all(enumerate(request), existing);
        let selected = select(&candidates, flags);
        let issues = check(request, selected.len());

        Self {
            candidates,
            flags,
            selected,
            issues,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Turn a valid plan into the batch to persist for `show_id`
    pub fn into_batch(
        self,
        show_id: Uuid,
        request: &SeriesRequest,
    ) -> Result<SeriesBatch, Vec<ValidationIssue>> {
        if !self.issues.is_empty() {
            return Err(self.issues);
        }

        // The gate guarantees all three are present
        match (request.venue_id, request.capacity_setting(), request.host()) {
            (Some(venue_id), Some(capacity), Some(host)) => Ok(SeriesBatch {
                show_id,
                venue_id,
                slots: self.selected,
                capacity,
                host,
            }),
            _ => Err(check(request, 0)),
        }
    }
}
