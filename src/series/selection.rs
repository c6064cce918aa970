//! Selection of the classified candidates that will be created

use super::classifier::{ClassifiedSlot, SlotStatus};
use super::enumerator::CandidateSlot;
use crate::models::series::SeriesRequest;

/// Operator choices about colliding slots
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionFlags {
    pub include_exact_duplicates: bool,
    pub include_conflicts: bool,
}

impl SelectionFlags {
    /// Whether a slot with `status` is kept
    pub fn admits(&self, status: SlotStatus) -> bool {
        match status {
            SlotStatus::Ok => true,
            SlotStatus::ExactDuplicate => self.include_exact_duplicates,
            SlotStatus::Conflict => self.include_conflicts,
        }
    }
}

impl From<&SeriesRequest> for SelectionFlags {
    fn from(request: &SeriesRequest) -> Self {
        Self {
            include_exact_duplicates: request.include_exact_duplicates,
            include_conflicts: request.include_conflicts,
        }
    }
}

/// Keep the admitted slots, in input order
pub fn select(classified: &[ClassifiedSlot], flags: SelectionFlags) -> Vec<CandidateSlot> {
    classified
        .iter()
        .filter(|candidate| flags.admits(candidate.status))
        .map(|candidate| candidate.slot)
        .collect()
}
