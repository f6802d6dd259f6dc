//! Broadcast gateway.
//!
//! The gateway is the single entry point for every read and mutation of the [`Store`]. Each
//! mutation runs validate → mutate → broadcast while holding the store lock, which gives the
//! following guarantees:
//!
//! - concurrent requests are applied strictly one after another;
//! - a request that fails validation never touches the store and never broadcasts;
//! - subscribers never observe a half-applied mutation, and every list broadcast carries the
//!   full collection as it stood right after that mutation.
//!
//! The push channel is a `tokio::sync::broadcast` channel and is best-effort: a subscriber
//! that falls behind loses the oldest messages, and a closed subscriber is simply dropped.
//! Nothing is retried or queued beyond the channel buffer.

use crate::config::CoreConfig;
use crate::constants::{MAX_RATING, MIN_RATING};
use crate::stats;
use crate::store::{Identified, Store};
use crate::{DashboardError, DashboardResult};
use api_shared::{
    CreateDoctorReq, CreateReviewReq, Doctor, DoctorIdReq, MedicalInfo, MonthlyVisits,
    NavigateReq, NewMedicalInfo, OneOrMany, QuarterlyVisits, RelationshipFlow, RelationshipView,
    ResultRes, Review, ServerEvent, SetMonthReq, ViewRelationshipReq, VisitStat,
};
use chrono::Utc;
use dash_types::NonEmptyText;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;

/// A new subscriber's view of the world: the current collections, followed by every event
/// published after they were taken.
pub struct Subscription {
    /// `doctors:list`, `reviews:list` and `medical:list` snapshots, in that order.
    pub snapshot: Vec<ServerEvent>,
    pub receiver: broadcast::Receiver<ServerEvent>,
}

/// Mediates mutation requests and fans state out to subscribers.
pub struct Gateway {
    store: Mutex<Store>,
    events: broadcast::Sender<ServerEvent>,
}

impl Gateway {
    /// Creates a gateway around `store` with a push channel buffering `capacity` messages.
    pub fn new(store: Store, capacity: usize) -> Self {
        let (events, _) = broadcast::channel(capacity.max(1));
        Self {
            store: Mutex::new(store),
            events,
        }
    }

    /// Creates a gateway from startup configuration, seeding the store if configured.
    pub fn from_config(cfg: &CoreConfig) -> Self {
        let store = if cfg.seed_fixtures() {
            Store::seeded()
        } else {
            Store::empty()
        };
        Self::new(store, cfg.broadcast_capacity())
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        // Validation precedes every mutation, so a panic inside a handler cannot leave a
        // collection half-modified; the data behind a poisoned lock is still consistent.
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, event: ServerEvent) {
        let name = event.name();
        let snapshot = event.is_snapshot();
        match self.events.send(event) {
            Ok(receivers) => {
                tracing::debug!(snapshot, "broadcast {} to {} subscriber(s)", name, receivers)
            }
            Err(_) => tracing::debug!(snapshot, "broadcast {} dropped: no subscribers", name),
        }
    }

    /// Registers a new subscriber.
    ///
    /// The snapshot and the receiver are taken under the same lock, so no mutation can fall
    /// between them.
    pub fn subscribe(&self) -> Subscription {
        let store = self.lock();
        let receiver = self.events.subscribe();
        Subscription {
            snapshot: vec![
                ServerEvent::DoctorsList(store.list_all()),
                ServerEvent::ReviewsList(store.list_all()),
                ServerEvent::MedicalList(store.list_all()),
            ],
            receiver,
        }
    }

    /// Number of currently connected subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.events.receiver_count()
    }

    // ------------------------------------------------------------------------
    // Doctors
    // ------------------------------------------------------------------------

    pub fn list_doctors(&self) -> Vec<Doctor> {
        self.lock().list_all()
    }

    /// Creates a doctor. `lastVisited` defaults to now.
    pub fn create_doctor(&self, req: CreateDoctorReq) -> DashboardResult<Doctor> {
        let name = required(req.name.as_deref(), "Doctor name")?;
        let specialty = required(req.specialty.as_deref(), "Doctor specialty")?;

        let mut store = self.lock();
        let doctor = store.insert(Doctor {
            id: String::new(),
            name: name.into_inner(),
            specialty: specialty.into_inner(),
            last_visited: req.last_visited.unwrap_or_else(Utc::now),
        });
        tracing::info!("created doctor {} ({})", doctor.id, doctor.name);
        self.publish(ServerEvent::DoctorsList(store.list_all()));
        Ok(doctor)
    }

    /// Deletes a doctor by id.
    ///
    /// Visit statistics referring to the doctor are left in place.
    pub fn delete_doctor(&self, req: DoctorIdReq) -> DashboardResult<ResultRes> {
        let id = required(req.id.as_deref(), "Doctor ID")?;

        let mut store = self.lock();
        remove::<Doctor>(&mut store, id.as_str())?;
        tracing::info!("deleted doctor {}", id);
        self.publish(ServerEvent::DoctorsList(store.list_all()));
        Ok(ResultRes::new(format!("Doctor {} deleted successfully", id)))
    }

    pub fn highlight_doctor(&self, req: DoctorIdReq) -> DashboardResult<ResultRes> {
        let id = required(req.id.as_deref(), "Doctor ID")?;

        let _store = self.lock();
        self.publish(ServerEvent::DoctorHighlighted(id.to_string()));
        Ok(ResultRes::new(format!("Doctor {} highlighted successfully", id)))
    }

    pub fn unhighlight_doctor(&self, req: DoctorIdReq) -> DashboardResult<ResultRes> {
        let id = required(req.id.as_deref(), "Doctor ID")?;

        let _store = self.lock();
        self.publish(ServerEvent::DoctorUnhighlighted(id.to_string()));
        Ok(ResultRes::new(format!(
            "Doctor {} unhighlighted successfully",
            id
        )))
    }

    // ------------------------------------------------------------------------
    // Navigation and visit statistics
    // ------------------------------------------------------------------------

    pub fn navigate(&self, req: NavigateReq) -> DashboardResult<ResultRes> {
        let tab = required(req.tab.as_deref(), "Tab parameter")?;

        let _store = self.lock();
        self.publish(ServerEvent::NavigationChanged(tab.to_string()));
        Ok(ResultRes::new(format!("Navigated to {} tab successfully", tab)))
    }

    pub fn set_month(&self, req: SetMonthReq) -> DashboardResult<ResultRes> {
        let month = required(req.month.as_deref(), "Month parameter")?;

        let _store = self.lock();
        self.publish(ServerEvent::MonthSelected(month.to_string()));
        Ok(ResultRes::new(format!("Month set to {} successfully", month)))
    }

    pub fn list_visit_stats(&self) -> Vec<VisitStat> {
        self.lock().list_all()
    }

    pub fn visit_trends(&self) -> DashboardResult<Vec<QuarterlyVisits>> {
        stats::aggregate_by_quarter(&self.list_visit_stats())
    }

    pub fn visit_months(&self) -> Vec<String> {
        stats::months(&self.list_visit_stats())
    }

    pub fn visits_for_month(&self, month: &str) -> Vec<MonthlyVisits> {
        stats::visits_for_month(&self.list_visit_stats(), month)
    }

    pub fn relationship_flows(&self) -> Vec<RelationshipFlow> {
        stats::relationship_flows(&self.list_visit_stats())
    }

    pub fn view_relationship(&self, req: ViewRelationshipReq) -> DashboardResult<ResultRes> {
        let missing = missing_fields(&[
            ("doctorId", req.doctor_id.as_deref()),
            ("familyMember", req.family_member.as_deref()),
        ]);
        let (Some(doctor_id), Some(family_member), true) =
            (req.doctor_id, req.family_member, missing.is_empty())
        else {
            return Err(DashboardError::MissingFields(missing));
        };
        let view = RelationshipView {
            doctor_id: doctor_id.trim().to_string(),
            family_member: family_member.trim().to_string(),
        };

        let message = format!(
            "Viewed relationship for {} with {}",
            view.family_member, view.doctor_id
        );
        let _store = self.lock();
        self.publish(ServerEvent::RelationshipViewed(view));
        Ok(ResultRes::new(message))
    }

    pub fn close_relationship(&self) -> ResultRes {
        let _store = self.lock();
        self.publish(ServerEvent::RelationshipClosed);
        ResultRes::new("Relationship view closed")
    }

    // ------------------------------------------------------------------------
    // Reviews
    // ------------------------------------------------------------------------

    pub fn list_reviews(&self) -> Vec<Review> {
        self.lock().list_all()
    }

    pub fn reviews_for_doctor(&self, doctor_id: &str) -> Vec<Review> {
        self.lock().filter_by_doctor(doctor_id)
    }

    /// Creates a review. Ratings outside `1..=5` are clamped rather than rejected.
    pub fn create_review(&self, req: CreateReviewReq) -> DashboardResult<Review> {
        let rating_present = req.rating.map(|_| "present");
        let missing = missing_fields(&[
            ("doctorId", req.doctor_id.as_deref()),
            ("rating", rating_present),
            ("comment", req.comment.as_deref()),
            ("authorName", req.author_name.as_deref()),
        ]);
        let (Some(doctor_id), Some(rating), Some(comment), Some(author_name), true) = (
            req.doctor_id,
            req.rating,
            req.comment,
            req.author_name,
            missing.is_empty(),
        ) else {
            return Err(DashboardError::MissingFields(missing));
        };

        let mut store = self.lock();
        let review = store.insert(Review {
            id: String::new(),
            doctor_id: doctor_id.trim().to_string(),
            rating: clamp_rating(rating),
            comment,
            author_name: author_name.trim().to_string(),
            created_at: Utc::now(),
        });
        tracing::info!(
            "created review {} for doctor {} (rating {})",
            review.id,
            review.doctor_id,
            review.rating
        );
        self.publish(ServerEvent::ReviewsList(store.list_all()));
        Ok(review)
    }

    pub fn delete_review(&self, review_id: &str) -> DashboardResult<ResultRes> {
        let id = required(Some(review_id), "Review ID")?;

        let mut store = self.lock();
        remove::<Review>(&mut store, id.as_str())?;
        self.publish(ServerEvent::ReviewsList(store.list_all()));
        Ok(ResultRes::new("Review deleted successfully"))
    }

    // ------------------------------------------------------------------------
    // Medical info
    // ------------------------------------------------------------------------

    pub fn list_medical_info(&self) -> Vec<MedicalInfo> {
        self.lock().list_all()
    }

    pub fn medical_info_for_doctor(&self, doctor_id: &str) -> Vec<MedicalInfo> {
        self.lock().filter_by_doctor(doctor_id)
    }

    /// Stores one or many medical-info records.
    ///
    /// Missing timestamps default to now and missing ids are assigned. Subscribers receive the
    /// new records (`doctor:medical-info`) followed by the full collection (`medical:list`).
    pub fn create_medical_info(
        &self,
        body: OneOrMany<NewMedicalInfo>,
    ) -> DashboardResult<Vec<MedicalInfo>> {
        let incoming = body.into_vec();
        if incoming.is_empty() {
            return Err(DashboardError::MissingField("Medical info record"));
        }

        let mut store = self.lock();
        let now = Utc::now();
        let created: Vec<MedicalInfo> = incoming
            .into_iter()
            .map(|item| {
                store.insert(MedicalInfo {
                    id: item.id.unwrap_or_default(),
                    kind: item.kind,
                    title: item.title,
                    content: item.content,
                    timestamp: item.timestamp.unwrap_or(now),
                    doctor_id: item.doctor_id.unwrap_or_default(),
                    doctor_name: item.doctor_name,
                    severity: item.severity,
                    metadata: item.metadata,
                })
            })
            .collect();
        tracing::info!("stored {} medical info record(s)", created.len());

        self.publish(ServerEvent::MedicalInfoAdded(created.clone()));
        self.publish(ServerEvent::MedicalList(store.list_all()));
        Ok(created)
    }

    pub fn delete_medical_info(&self, id: &str) -> DashboardResult<ResultRes> {
        let id = required(Some(id), "Medical info ID")?;

        let mut store = self.lock();
        remove::<MedicalInfo>(&mut store, id.as_str())?;
        self.publish(ServerEvent::MedicalList(store.list_all()));
        Ok(ResultRes::new("Medical info deleted successfully"))
    }
}

/// Clamps a requested rating into `1..=5`.
pub fn clamp_rating(rating: i64) -> u8 {
    let clamped = rating.clamp(i64::from(MIN_RATING), i64::from(MAX_RATING));
    u8::try_from(clamped).unwrap_or(MAX_RATING)
}

fn required(value: Option<&str>, field: &'static str) -> DashboardResult<NonEmptyText> {
    NonEmptyText::from_optional(value).map_err(|_| DashboardError::MissingField(field))
}

fn missing_fields(fields: &[(&'static str, Option<&str>)]) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|(_, value)| NonEmptyText::from_optional(*value).is_err())
        .map(|(name, _)| *name)
        .collect()
}

fn remove<R: Identified>(store: &mut Store, id: &str) -> DashboardResult<()> {
    if store.remove_by_id::<R>(id) {
        Ok(())
    } else {
        Err(DashboardError::NotFound {
            kind: R::KIND,
            id: id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_shared::{MedicalInfoType, Severity};
    use chrono::{DateTime, Duration};
    use tokio::sync::broadcast::error::TryRecvError;

    fn gateway() -> Gateway {
        Gateway::from_config(&CoreConfig::default())
    }

    fn doctor_req(name: &str, specialty: &str) -> CreateDoctorReq {
        CreateDoctorReq {
            name: Some(name.into()),
            specialty: Some(specialty.into()),
            last_visited: None,
        }
    }

    fn review_req(rating: i64) -> CreateReviewReq {
        CreateReviewReq {
            doctor_id: Some("1".into()),
            rating: Some(rating),
            comment: Some("Very attentive".into()),
            author_name: Some("Ann".into()),
        }
    }

    fn medical(title: &str) -> NewMedicalInfo {
        NewMedicalInfo {
            id: None,
            kind: MedicalInfoType::Medication,
            title: title.into(),
            content: "Take with food".into(),
            timestamp: None,
            doctor_id: Some("1".into()),
            doctor_name: "Dr. Sarah Smith".into(),
            severity: Some(Severity::Low),
            metadata: None,
        }
    }

    #[test]
    fn test_create_doctor_lists_and_broadcasts_full_list() {
        let gw = gateway();
        let mut sub = gw.subscribe();
        let before = gw.list_doctors().len();

        let created = gw
            .create_doctor(doctor_req("Dr. X", "Y"))
            .expect("create should succeed");

        let doctors = gw.list_doctors();
        assert_eq!(doctors.len(), before + 1);
        assert_eq!(doctors.iter().filter(|d| d.id == created.id).count(), 1);
        assert_eq!(created.name, "Dr. X");
        assert_eq!(created.specialty, "Y");
        assert!((Utc::now() - created.last_visited) < Duration::seconds(5));

        match sub.receiver.try_recv() {
            Ok(ServerEvent::DoctorsList(list)) => assert_eq!(list, doctors),
            other => panic!("expected doctors:list, got {other:?}"),
        }
    }

    #[test]
    fn test_create_doctor_requires_name_and_specialty() {
        let gw = gateway();
        let mut sub = gw.subscribe();

        let err = gw
            .create_doctor(CreateDoctorReq {
                name: Some("Dr. X".into()),
                ..Default::default()
            })
            .expect_err("missing specialty should fail");

        assert!(matches!(err, DashboardError::MissingField("Doctor specialty")));
        assert_eq!(gw.list_doctors().len(), 8);
        assert!(matches!(sub.receiver.try_recv(), Err(TryRecvError::Empty)));
    }

    #[test]
    fn test_back_to_back_creates_get_distinct_ids() {
        let gw = gateway();
        let a = gw.create_doctor(doctor_req("Dr. A", "Cardiology")).unwrap();
        let b = gw.create_doctor(doctor_req("Dr. B", "Cardiology")).unwrap();

        assert_ne!(a.id, b.id);
        let doctors = gw.list_doctors();
        let pos_a = doctors.iter().position(|d| d.id == a.id).unwrap();
        let pos_b = doctors.iter().position(|d| d.id == b.id).unwrap();
        assert!(pos_a < pos_b, "insertion order should be preserved");
    }

    #[test]
    fn test_delete_doctor_round_trip() {
        let gw = gateway();
        let created = gw.create_doctor(doctor_req("Dr. X", "Y")).unwrap();

        let res = gw
            .delete_doctor(DoctorIdReq {
                id: Some(created.id.clone()),
            })
            .expect("delete should succeed");

        assert_eq!(res.result, format!("Doctor {} deleted successfully", created.id));
        assert!(gw.list_doctors().iter().all(|d| d.id != created.id));
    }

    #[test]
    fn test_delete_unknown_doctor_is_not_found_and_silent() {
        let gw = gateway();
        let mut sub = gw.subscribe();

        let err = gw
            .delete_doctor(DoctorIdReq {
                id: Some("nope".into()),
            })
            .expect_err("unknown id should fail");

        assert!(matches!(err, DashboardError::NotFound { kind: "Doctor", .. }));
        assert_eq!(gw.list_doctors().len(), 8);
        assert!(matches!(sub.receiver.try_recv(), Err(TryRecvError::Empty)));
    }

    #[test]
    fn test_delete_doctor_without_id_is_rejected() {
        let gw = gateway();
        let err = gw.delete_doctor(DoctorIdReq { id: None }).unwrap_err();
        assert_eq!(err.to_string(), "Doctor ID is required");
    }

    #[test]
    fn test_delete_doctor_leaves_visit_stats() {
        let gw = gateway();
        gw.delete_doctor(DoctorIdReq {
            id: Some("1".into()),
        })
        .unwrap();

        assert_eq!(gw.list_visit_stats().len(), 40);
        assert!(gw.list_visit_stats().iter().any(|s| s.doctor_id == "1"));
    }

    #[test]
    fn test_targeted_events() {
        let gw = gateway();
        let mut sub = gw.subscribe();

        gw.highlight_doctor(DoctorIdReq {
            id: Some("3".into()),
        })
        .unwrap();
        gw.unhighlight_doctor(DoctorIdReq {
            id: Some("3".into()),
        })
        .unwrap();
        gw.navigate(NavigateReq {
            tab: Some("statistics".into()),
        })
        .unwrap();
        gw.set_month(SetMonthReq {
            month: Some("2023-05".into()),
        })
        .unwrap();
        gw.view_relationship(ViewRelationshipReq {
            doctor_id: Some("2".into()),
            family_member: Some("Mom".into()),
        })
        .unwrap();
        gw.close_relationship();

        let received: Vec<ServerEvent> = std::iter::from_fn(|| sub.receiver.try_recv().ok()).collect();
        assert_eq!(
            received,
            vec![
                ServerEvent::DoctorHighlighted("3".into()),
                ServerEvent::DoctorUnhighlighted("3".into()),
                ServerEvent::NavigationChanged("statistics".into()),
                ServerEvent::MonthSelected("2023-05".into()),
                ServerEvent::RelationshipViewed(RelationshipView {
                    doctor_id: "2".into(),
                    family_member: "Mom".into(),
                }),
                ServerEvent::RelationshipClosed,
            ]
        );
    }

    #[test]
    fn test_targeted_events_require_their_value() {
        let gw = gateway();
        assert!(gw.navigate(NavigateReq { tab: None }).is_err());
        assert!(gw
            .set_month(SetMonthReq {
                month: Some("  ".into())
            })
            .is_err());
        let err = gw
            .view_relationship(ViewRelationshipReq {
                doctor_id: Some("1".into()),
                family_member: None,
            })
            .unwrap_err();
        assert_eq!(err.to_string(), "Missing required fields: familyMember");
    }

    #[test]
    fn test_view_relationship_trims_and_names_blank_fields() {
        let gw = gateway();
        let mut sub = gw.subscribe();

        let err = gw
            .view_relationship(ViewRelationshipReq {
                doctor_id: Some(" ".into()),
                family_member: None,
            })
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required fields: doctorId, familyMember"
        );
        assert!(matches!(sub.receiver.try_recv(), Err(TryRecvError::Empty)));

        gw.view_relationship(ViewRelationshipReq {
            doctor_id: Some(" 4 ".into()),
            family_member: Some("Grandma ".into()),
        })
        .unwrap();
        assert_eq!(
            sub.receiver.try_recv().unwrap(),
            ServerEvent::RelationshipViewed(RelationshipView {
                doctor_id: "4".into(),
                family_member: "Grandma".into(),
            })
        );
    }

    #[test]
    fn test_rating_is_clamped() {
        let gw = gateway();
        assert_eq!(gw.create_review(review_req(0)).unwrap().rating, 1);
        assert_eq!(gw.create_review(review_req(37)).unwrap().rating, 5);
        assert_eq!(gw.create_review(review_req(3)).unwrap().rating, 3);
        assert_eq!(gw.create_review(review_req(-4)).unwrap().rating, 1);
        assert_eq!(gw.list_reviews().len(), 4);
    }

    #[test]
    fn test_create_review_reports_all_missing_fields() {
        let gw = gateway();
        let err = gw
            .create_review(CreateReviewReq {
                doctor_id: Some("1".into()),
                ..Default::default()
            })
            .unwrap_err();

        match err {
            DashboardError::MissingFields(fields) => {
                assert_eq!(fields, vec!["rating", "comment", "authorName"])
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(gw.list_reviews().is_empty());
    }

    #[test]
    fn test_review_delete_and_filter() {
        let gw = gateway();
        let mut sub = gw.subscribe();
        let review = gw.create_review(review_req(4)).unwrap();
        assert!(matches!(
            sub.receiver.try_recv(),
            Ok(ServerEvent::ReviewsList(list)) if list.len() == 1
        ));

        assert_eq!(gw.reviews_for_doctor("1"), vec![review.clone()]);
        assert!(gw.reviews_for_doctor("2").is_empty());

        gw.delete_review(&review.id).unwrap();
        assert!(matches!(
            sub.receiver.try_recv(),
            Ok(ServerEvent::ReviewsList(list)) if list.is_empty()
        ));
        assert!(matches!(
            gw.delete_review(&review.id),
            Err(DashboardError::NotFound { kind: "Review", .. })
        ));
    }

    #[test]
    fn test_medical_info_single_and_batch() {
        let gw = gateway();

        let one = gw
            .create_medical_info(OneOrMany::One(medical("Aspirin")))
            .unwrap();
        assert_eq!(one.len(), 1);

        let two = gw
            .create_medical_info(OneOrMany::Many(vec![medical("Ibuprofen"), medical("Statin")]))
            .unwrap();
        assert_eq!(two.len(), 2);

        let all = gw.list_medical_info();
        assert_eq!(all.len(), 3);
        assert!(all.iter().all(|m| !m.id.is_empty()));
        assert!(all
            .iter()
            .all(|m| (Utc::now() - m.timestamp) < Duration::seconds(5)));
    }

    #[test]
    fn test_medical_info_keeps_supplied_timestamp() {
        let gw = gateway();
        let mut item = medical("Aspirin");
        let when: DateTime<Utc> = "2023-06-01T09:30:00Z".parse().unwrap();
        item.timestamp = Some(when);

        let created = gw.create_medical_info(OneOrMany::One(item)).unwrap();
        assert_eq!(created[0].timestamp, when);
    }

    #[test]
    fn test_medical_info_broadcasts_added_then_list() {
        let gw = gateway();
        let mut sub = gw.subscribe();

        gw.create_medical_info(OneOrMany::Many(vec![medical("A"), medical("B")]))
            .unwrap();

        assert!(matches!(
            sub.receiver.try_recv(),
            Ok(ServerEvent::MedicalInfoAdded(added)) if added.len() == 2
        ));
        assert!(matches!(
            sub.receiver.try_recv(),
            Ok(ServerEvent::MedicalList(all)) if all.len() == 2
        ));
    }

    #[test]
    fn test_medical_info_empty_batch_is_rejected() {
        let gw = gateway();
        assert!(gw.create_medical_info(OneOrMany::Many(vec![])).is_err());
        assert!(gw.list_medical_info().is_empty());
    }

    #[test]
    fn test_medical_info_delete_and_filter() {
        let gw = gateway();
        let created = gw
            .create_medical_info(OneOrMany::One(medical("Aspirin")))
            .unwrap();

        assert_eq!(gw.medical_info_for_doctor("1").len(), 1);
        assert!(gw.medical_info_for_doctor("2").is_empty());

        gw.delete_medical_info(&created[0].id).unwrap();
        assert!(gw.list_medical_info().is_empty());
        assert!(matches!(
            gw.delete_medical_info(&created[0].id),
            Err(DashboardError::NotFound { .. })
        ));
    }

    #[test]
    fn test_new_subscriber_gets_current_snapshot() {
        let gw = gateway();
        gw.create_doctor(doctor_req("Dr. X", "Y")).unwrap();

        let sub = gw.subscribe();
        match &sub.snapshot[0] {
            ServerEvent::DoctorsList(list) => {
                assert_eq!(list.len(), 9);
                assert_eq!(list, &gw.list_doctors());
            }
            other => panic!("expected doctors:list first, got {other:?}"),
        }
        assert!(matches!(&sub.snapshot[1], ServerEvent::ReviewsList(r) if r.is_empty()));
        assert!(matches!(&sub.snapshot[2], ServerEvent::MedicalList(m) if m.is_empty()));
        assert_eq!(gw.subscriber_count(), 1);
    }

    #[test]
    fn test_unseeded_gateway_starts_empty() {
        let gw = Gateway::from_config(&CoreConfig::new(8, false).unwrap());
        assert!(gw.list_doctors().is_empty());
        assert!(gw.list_visit_stats().is_empty());
        assert!(gw.visit_trends().unwrap().is_empty());
    }

    #[test]
    fn test_clamp_rating_bounds() {
        assert_eq!(clamp_rating(i64::MIN), 1);
        assert_eq!(clamp_rating(i64::MAX), 5);
        assert_eq!(clamp_rating(2), 2);
    }
}
