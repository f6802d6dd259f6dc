//! In-memory record store.
//!
//! The store owns four collections: doctors, visit statistics, reviews and medical-info
//! entries. It is constructed once at process start (optionally seeded with fixtures) and
//! handed to the [`Gateway`](crate::gateway::Gateway), which is the only code that mutates it.
//!
//! Collections are small (tens to low hundreds of records), so lookups are linear scans and
//! there are no indexes. Reads return owned snapshots; callers never hold references into
//! stored state.

use crate::fixtures;
use crate::ids::TimestampIdGenerator;
use api_shared::{Doctor, MedicalInfo, Review, VisitStat};

/// A record type that lives in one of the store's collections.
pub trait Collected: Clone {
    /// Doctor the record refers to, if any.
    fn doctor_key(&self) -> Option<&str>;
    fn collection(store: &Store) -> &Vec<Self>;
    fn collection_mut(store: &mut Store) -> &mut Vec<Self>;
}

/// A collected record that carries its own identifier.
pub trait Identified: Collected {
    /// Name used in not-found messages.
    const KIND: &'static str;
    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
}

/// Owner of every mutable collection.
#[derive(Clone, Debug, Default)]
pub struct Store {
    doctors: Vec<Doctor>,
    visit_stats: Vec<VisitStat>,
    reviews: Vec<Review>,
    medical_infos: Vec<MedicalInfo>,
    ids: TimestampIdGenerator,
}

impl Store {
    /// An empty store with no doctors or statistics.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A store populated with the seed doctors and visit statistics.
    pub fn seeded() -> Self {
        Self {
            doctors: fixtures::doctors(),
            visit_stats: fixtures::visit_stats(),
            ..Self::default()
        }
    }

    /// Appends `record`, assigning an identifier if it has none, and returns the stored copy.
    ///
    /// No deduplication is performed.
    pub fn insert<R: Identified>(&mut self, mut record: R) -> R {
        if record.id().trim().is_empty() {
            record.set_id(self.ids.next_id());
        }
        R::collection_mut(self).push(record.clone());
        record
    }

    /// Removes the first record with the given id. Returns whether a record was removed.
    pub fn remove_by_id<R: Identified>(&mut self, id: &str) -> bool {
        let records = R::collection_mut(self);
        match records.iter().position(|r| r.id() == id) {
            Some(index) => {
                records.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn find_by_id<R: Identified>(&self, id: &str) -> Option<R> {
        R::collection(self).iter().find(|r| r.id() == id).cloned()
    }

    /// Snapshot of a whole collection.
    pub fn list_all<R: Collected>(&self) -> Vec<R> {
        R::collection(self).clone()
    }

    /// Records whose doctor reference equals `doctor_id`.
    pub fn filter_by_doctor<R: Collected>(&self, doctor_id: &str) -> Vec<R> {
        R::collection(self)
            .iter()
            .filter(|r| r.doctor_key() == Some(doctor_id))
            .cloned()
            .collect()
    }

    /// Number of records in a collection.
    pub fn count<R: Collected>(&self) -> usize {
        R::collection(self).len()
    }
}

impl Collected for Doctor {
    fn doctor_key(&self) -> Option<&str> {
        Some(&self.id)
    }
    fn collection(store: &Store) -> &Vec<Self> {
        &store.doctors
    }
    fn collection_mut(store: &mut Store) -> &mut Vec<Self> {
        &mut store.doctors
    }
}

impl Identified for Doctor {
    const KIND: &'static str = crate::constants::DOCTOR_KIND;
    fn id(&self) -> &str {
        &self.id
    }
    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

impl Collected for VisitStat {
    fn doctor_key(&self) -> Option<&str> {
        Some(&self.doctor_id)
    }
    fn collection(store: &Store) -> &Vec<Self> {
        &store.visit_stats
    }
    fn collection_mut(store: &mut Store) -> &mut Vec<Self> {
        &mut store.visit_stats
    }
}

impl Collected for Review {
    fn doctor_key(&self) -> Option<&str> {
        Some(&self.doctor_id)
    }
    fn collection(store: &Store) -> &Vec<Self> {
        &store.reviews
    }
    fn collection_mut(store: &mut Store) -> &mut Vec<Self> {
        &mut store.reviews
    }
}

impl Identified for Review {
    const KIND: &'static str = crate::constants::REVIEW_KIND;
    fn id(&self) -> &str {
        &self.id
    }
    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

impl Collected for MedicalInfo {
    fn doctor_key(&self) -> Option<&str> {
        Some(&self.doctor_id)
    }
    fn collection(store: &Store) -> &Vec<Self> {
        &store.medical_infos
    }
    fn collection_mut(store: &mut Store) -> &mut Vec<Self> {
        &mut store.medical_infos
    }
}

impl Identified for MedicalInfo {
    const KIND: &'static str = crate::constants::MEDICAL_INFO_KIND;
    fn id(&self) -> &str {
        &self.id
    }
    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn doctor(id: &str, name: &str) -> Doctor {
        Doctor {
            id: id.into(),
            name: name.into(),
            specialty: "General Practice".into(),
            last_visited: Utc::now(),
        }
    }

    fn review(doctor_id: &str) -> Review {
        Review {
            id: String::new(),
            doctor_id: doctor_id.into(),
            rating: 4,
            comment: "Kind and thorough".into(),
            author_name: "Ann".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_seeded_store_has_fixtures() {
        let store = Store::seeded();
        assert_eq!(store.count::<Doctor>(), 8);
        assert_eq!(store.count::<VisitStat>(), 40);
        assert_eq!(store.count::<Review>(), 0);
        assert_eq!(store.count::<MedicalInfo>(), 0);
    }

    #[test]
    fn test_insert_assigns_missing_id() {
        let mut store = Store::empty();
        let stored = store.insert(doctor("", "Dr. X"));

        assert!(!stored.id.is_empty());
        assert!(stored.id.parse::<i64>().is_ok(), "id should be a timestamp");
        assert_eq!(store.find_by_id::<Doctor>(&stored.id), Some(stored));
    }

    #[test]
    fn test_insert_keeps_supplied_id_and_does_not_dedupe() {
        let mut store = Store::empty();
        store.insert(doctor("42", "Dr. A"));
        store.insert(doctor("42", "Dr. B"));

        assert_eq!(store.count::<Doctor>(), 2);
        assert_eq!(
            store.find_by_id::<Doctor>("42").map(|d| d.name),
            Some("Dr. A".to_string())
        );
    }

    #[test]
    fn test_remove_by_id_removes_first_match_only() {
        let mut store = Store::empty();
        store.insert(doctor("42", "Dr. A"));
        store.insert(doctor("42", "Dr. B"));

        assert!(store.remove_by_id::<Doctor>("42"));
        let remaining = store.list_all::<Doctor>();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name, "Dr. B");
    }

    #[test]
    fn test_remove_missing_id_reports_false() {
        let mut store = Store::seeded();
        assert!(!store.remove_by_id::<Doctor>("does-not-exist"));
        assert_eq!(store.count::<Doctor>(), 8);
    }

    #[test]
    fn test_list_all_is_a_snapshot() {
        let mut store = Store::seeded();
        let mut snapshot = store.list_all::<Doctor>();
        snapshot.clear();

        assert_eq!(store.count::<Doctor>(), 8);
        store.remove_by_id::<Doctor>("1");
        assert_eq!(store.count::<Doctor>(), 7);
    }

    #[test]
    fn test_filter_by_doctor() {
        let mut store = Store::seeded();
        store.insert(review("1"));
        store.insert(review("2"));
        store.insert(review("1"));

        assert_eq!(store.filter_by_doctor::<Review>("1").len(), 2);
        assert_eq!(store.filter_by_doctor::<VisitStat>("3").len(), 8);
        assert!(store.filter_by_doctor::<Review>("9").is_empty());
    }
}
