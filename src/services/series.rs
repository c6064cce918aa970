//! Series generation service (preview and commit of recurring representations)

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        representation::Representation,
        series::{SeriesPreview, SeriesRequest},
    },
    repository::Repository,
    series::{ExistingSlot, SeriesBatch, SeriesPlan, SlotStatus},
};

/// Storage used by the series service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SeriesStore: Send + Sync {
    /// Date, time and venue of every representation of the show.
    /// Fails with not found when the show does not exist.
    async fn existing_slots(&self, show_id: Uuid) -> AppResult<Vec<ExistingSlot>>;

    /// Persist the whole batch atomically
    async fn insert_series(&self, batch: SeriesBatch) -> AppResult<Vec<Representation>>;
}

#[async_trait]
impl SeriesStore for Repository {
    async fn existing_slots(&self, show_id: Uuid) -> AppResult<Vec<ExistingSlot>> {
        self.shows.get_by_id(show_id).await?;
        self.representations.existing_slots(show_id).await
    }

    async fn insert_series(&self, batch: SeriesBatch) -> AppResult<Vec<Representation>> {
        self.representations.insert_series(&batch).await
    }
}

#[derive(Clone)]
pub struct SeriesService {
    store: Arc<dyn SeriesStore>,
}

impl SeriesService {
    pub fn new(store: Arc<dyn SeriesStore>) -> Self {
        Self { store }
    }

    /// Compute the candidates of a request against the current representations
    pub async fn preview(&self, show_id: Uuid, request: &SeriesRequest) -> AppResult<SeriesPreview> {
        let existing = self.store.existing_slots(show_id).await?;
        let plan = SeriesPlan::compute(request, &existing);

        tracing::debug!(
            "Series preview for show {}: {} candidates, {} selected, {} issues",
            show_id,
            plan.candidates.len(),
            plan.selected.len(),
            plan.issues.len()
        );

        Ok(SeriesPreview::from_plan(&plan))
    }

    /// Create the selected representations of a request.
    ///
    /// The plan is recomputed from a fresh snapshot; a preview the operator saw
    /// earlier is never reused.
    pub async fn commit(&self, show_id: Uuid, request: &SeriesRequest) -> AppResult<Vec<Representation>> {
        let existing = self.store.existing_slots(show_id).await?;
        let plan = SeriesPlan::compute(request, &existing);

        let duplicates = plan
            .candidates
            .iter()
            .filter(|c| c.status == SlotStatus::ExactDuplicate && plan.flags.admits(c.status))
            .count();

        let batch = plan.into_batch(show_id, request).map_err(|issues| {
            tracing::info!("Series for show {} rejected: {:?}", show_id, issues);
            AppError::InvalidSeries(issues)
        })?;

        if duplicates > 0 {
            tracing::warn!(
                "Series for show {} re-creates {} existing slot(s) on explicit request",
                show_id,
                duplicates
            );
        }

        let venue_id = batch.venue_id;
        let created = self.store.insert_series(batch).await.map_err(|e| {
            if let AppError::VenueGone(_) = e {
                tracing::warn!("Venue {} disappeared before series commit for show {}", venue_id, show_id);
            }
            e
        })?;

        tracing::info!(
            "Created {} representation(s) for show {} at venue {}",
            created.len(),
            show_id,
            venue_id
        );

        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{representation::HostKind, venue::Venue},
        series::{Capacity, ValidationIssue},
    };
    use chrono::{NaiveDate, NaiveTime, Utc};
    use tokio_test::{assert_err, assert_ok};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
    }

    fn eleven() -> NaiveTime {
        NaiveTime::from_hms_opt(11, 0, 0).unwrap()
    }

    fn request(venue_id: Uuid) -> SeriesRequest {
        SeriesRequest {
            start_date: Some(date(6)),
            end_date: Some(date(12)),
            week_days: [true; 7],
            times: vec!["11:00".to_string()],
            venue_id: Some(venue_id),
            capacity: Some(40),
            ..Default::default()
        }
    }

    fn venue(id: Uuid) -> Venue {
        Venue {
            id,
            name: "La Criée".to_string(),
            address: None,
            city: Some("Marseille".to_string()),
            crea_date: None,
        }
    }

    fn service(store: MockSeriesStore) -> SeriesService {
        SeriesService::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_preview_counts_statuses() {
        let v1 = Uuid::new_v4();
        let v2 = Uuid::new_v4();
        let mut store = MockSeriesStore::new();
        store.expect_existing_slots().returning(move |_| {
            Ok(vec![
                ExistingSlot { date: date(8), time: eleven(), venue_id: v1 },
                ExistingSlot { date: date(10), time: eleven(), venue_id: v2 },
            ])
        });

        let preview = assert_ok!(service(store).preview(Uuid::new_v4(), &request(v1)).await);

        assert_eq!(preview.candidates.len(), 7);
        assert_eq!(preview.ok_count, 5);
        assert_eq!(preview.duplicate_count, 1);
        assert_eq!(preview.conflict_count, 1);
        assert_eq!(preview.selected_count, 5);
        assert!(preview.can_commit);
        assert_eq!(preview.candidates[2].status, SlotStatus::ExactDuplicate);
        assert!(!preview.candidates[2].selected);
    }

    #[tokio::test]
    async fn test_preview_reports_issues() {
        let mut store = MockSeriesStore::new();
        store.expect_existing_slots().returning(|_| Ok(Vec::new()));

        let preview = assert_ok!(service(store).preview(Uuid::new_v4(), &SeriesRequest::default()).await);

        assert!(preview.candidates.is_empty());
        assert!(!preview.can_commit);
        assert!(preview.issues.contains(&ValidationIssue::MissingVenue));
    }

    #[tokio::test]
    async fn test_preview_of_blank_form_fields() {
        let mut store = MockSeriesStore::new();
        store.expect_existing_slots().returning(|_| Ok(Vec::new()));

        let request: SeriesRequest = serde_json::from_value(serde_json::json!({
            "start_date": "",
            "end_date": "2025-01-12",
            "venue_id": "",
            "week_days": [true, true, true, true, true, true, true],
            "times": ["11:00"],
            "capacity": 40
        }))
        .unwrap();

        let preview = assert_ok!(service(store).preview(Uuid::new_v4(), &request).await);

        assert!(preview.candidates.is_empty());
        assert!(!preview.can_commit);
        assert_eq!(
            preview.issues,
            vec![ValidationIssue::MissingStartDate, ValidationIssue::MissingVenue]
        );
    }

    #[tokio::test]
    async fn test_repeated_time_is_previewed_but_not_committed() {
        let v1 = Uuid::new_v4();
        let mut store = MockSeriesStore::new();
        store.expect_existing_slots().returning(|_| Ok(Vec::new()));
        store.expect_insert_series().never();
        let svc = service(store);

        let req = SeriesRequest {
            times: vec!["9:00".to_string(), "09:00".to_string()],
            ..request(v1)
        };

        let preview = assert_ok!(svc.preview(Uuid::new_v4(), &req).await);
        assert_eq!(preview.candidates.len(), 14);
        assert_eq!(preview.issues, vec![ValidationIssue::DuplicateTime]);

        let err = assert_err!(svc.commit(Uuid::new_v4(), &req).await);
        assert!(matches!(err, AppError::InvalidSeries(issues) if issues == vec![ValidationIssue::DuplicateTime]));
    }

    #[tokio::test]
    async fn test_commit_inserts_selected_slots() {
        let v1 = Uuid::new_v4();
        let show = Uuid::new_v4();
        let mut store = MockSeriesStore::new();
        store
            .expect_existing_slots()
            .returning(move |_| Ok(vec![ExistingSlot { date: date(8), time: eleven(), venue_id: v1 }]));
        store
            .expect_insert_series()
            .withf(move |batch| {
                batch.show_id == show
                    && batch.slots.len() == 6
                    && batch.capacity == Capacity::Seats(40)
                    && batch.host.hosted_by == HostKind::Company
            })
            .times(1)
            .returning(move |batch| Ok(batch.to_records(&venue(v1), Utc::now())));

        let created = assert_ok!(service(store).commit(show, &request(v1)).await);

        assert_eq!(created.len(), 6);
        assert!(created.iter().all(|r| r.booked == 0 && r.venue_name == "La Criée"));
        assert!(!created.iter().any(|r| r.date == date(8)));
    }

    #[tokio::test]
    async fn test_commit_with_both_flags_keeps_collisions() {
        let v1 = Uuid::new_v4();
        let mut store = MockSeriesStore::new();
        store.expect_existing_slots().returning(move |_| {
            Ok(vec![
                ExistingSlot { date: date(8), time: eleven(), venue_id: v1 },
                ExistingSlot { date: date(9), time: eleven(), venue_id: Uuid::new_v4() },
            ])
        });
        store
            .expect_insert_series()
            .withf(|batch| batch.slots.len() == 7)
            .returning(move |batch| Ok(batch.to_records(&venue(v1), Utc::now())));

        let req = SeriesRequest {
            include_exact_duplicates: true,
            include_conflicts: true,
            ..request(v1)
        };
        let created = assert_ok!(service(store).commit(Uuid::new_v4(), &req).await);
        assert_eq!(created.len(), 7);
    }

    #[tokio::test]
    async fn test_commit_rejects_invalid_request_without_writing() {
        let v1 = Uuid::new_v4();
        let mut store = MockSeriesStore::new();
        store.expect_existing_slots().returning(|_| Ok(Vec::new()));
        store.expect_insert_series().never();

        let req = SeriesRequest {
            start_date: Some(date(12)),
            end_date: Some(date(6)),
            ..request(v1)
        };
        let err = assert_err!(service(store).commit(Uuid::new_v4(), &req).await);
        assert!(matches!(err, AppError::InvalidSeries(issues) if issues == vec![ValidationIssue::InvertedDateRange]));
    }

    #[tokio::test]
    async fn test_commit_rejects_when_everything_collides() {
        let v1 = Uuid::new_v4();
        let mut store = MockSeriesStore::new();
        store.expect_existing_slots().returning(move |_| {
            Ok((6..=12)
                .map(|day| ExistingSlot { date: date(day), time: eleven(), venue_id: v1 })
                .collect())
        });
        store.expect_insert_series().never();

        let err = assert_err!(service(store).commit(Uuid::new_v4(), &request(v1)).await);
        assert!(matches!(err, AppError::InvalidSeries(issues) if issues == vec![ValidationIssue::NothingToCreate]));
    }

    #[tokio::test]
    async fn test_commit_surfaces_venue_gone() {
        let v1 = Uuid::new_v4();
        let mut store = MockSeriesStore::new();
        store.expect_existing_slots().returning(|_| Ok(Vec::new()));
        store
            .expect_insert_series()
            .returning(|batch| Err(AppError::VenueGone(batch.venue_id)));

        let err = assert_err!(service(store).commit(Uuid::new_v4(), &request(v1)).await);
        assert!(matches!(err, AppError::VenueGone(id) if id == v1));
    }

    #[tokio::test]
    async fn test_unknown_show_is_not_found() {
        let mut store = MockSeriesStore::new();
        store
            .expect_existing_slots()
            .returning(|id| Err(AppError::NotFound(format!("Show {} not found", id))));
        store.expect_insert_series().never();

        let err = assert_err!(service(store).commit(Uuid::new_v4(), &request(Uuid::new_v4())).await);
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
