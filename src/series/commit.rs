//! Building the representation records of a validated series

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::enumerator::CandidateSlot;
use crate::models::representation::{Host, Representation};
use crate::models::venue::Venue;

/// Seat capacity applied to a series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capacity {
    Unlimited,
    Seats(i32),
}

impl Capacity {
    /// Column value: `None` stands for unlimited
    pub fn as_column(&self) -> Option<i32> {
        match self {
            Capacity::Unlimited => None,
            Capacity::Seats(seats) => Some(*seats),
        }
    }
}

/// A validated series, ready to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesBatch {
    pub show_id: Uuid,
    pub venue_id: Uuid,
    pub slots: Vec<CandidateSlot>,
    pub capacity: Capacity,
    pub host: Host,
}

impl SeriesBatch {
    /// Build one new record per slot.
    ///
    /// `venue` is the venue resolved at commit time; its name is copied onto
    /// every record. Every record gets a fresh id and starts with no booking.
    pub fn to_records(&self, venue: &Venue, now: DateTime<Utc>) -> Vec<Representation> {
        self.slots
            .iter()
            .map(|slot| Representation {
                id: Uuid::new_v4(),
                show_id: self.show_id,
                date: slot.date,
                time: slot.time,
                venue_id: venue.id,
                venue_name: venue.name.clone(),
                capacity: self.capacity.as_column(),
                booked: 0,
                hosted_by: self.host.hosted_by,
                hosted_by_id: self.host.hosted_by_id,
                crea_date: Some(now),
                modif_date: None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::representation::HostKind;
    use chrono::{NaiveDate, NaiveTime};
    use std::collections::HashSet;

    fn batch(venue_id: Uuid, days: u32) -> SeriesBatch {
        SeriesBatch {
            show_id: Uuid::new_v4(),
            venue_id,
            slots: (0..days)
                .map(|d| CandidateSlot {
                    date: NaiveDate::from_ymd_opt(2025, 1, 6 + d).unwrap(),
                    time: NaiveTime::from_hms_opt(20, 30, 0).unwrap(),
                    venue_id,
                })
                .collect(),
            capacity: Capacity::Seats(90),
            host: Host {
                hosted_by: HostKind::Company,
                hosted_by_id: None,
            },
        }
    }

    fn venue(id: Uuid) -> Venue {
        Venue {
            id,
            name: "Théâtre de la Ville".to_string(),
            address: None,
            city: Some("Paris".to_string()),
            crea_date: None,
        }
    }

    #[test]
    fn test_records_start_empty_with_fresh_ids() {
        let venue_id = Uuid::new_v4();
        let batch = batch(venue_id, 5);
        let records = batch.to_records(&venue(venue_id), Utc::now());

        assert_eq!(records.len(), 5);
        let ids: HashSet<_> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), 5);

        for (record, slot) in records.iter().zip(&batch.slots) {
            assert_eq!(record.booked, 0);
            assert_eq!(record.capacity, Some(90));
            assert_eq!(record.show_id, batch.show_id);
            assert_eq!(record.venue_name, "Théâtre de la Ville");
            assert_eq!((record.date, record.time), (slot.date, slot.time));
        }
    }

    #[test]
    fn test_unlimited_capacity_column() {
        assert_eq!(Capacity::Unlimited.as_column(), None);
        assert_eq!(Capacity::Seats(12).as_column(), Some(12));
    }
}
