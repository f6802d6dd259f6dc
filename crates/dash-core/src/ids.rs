//! Record identifiers.
//!
//! Records are identified by the Unix time of their creation in milliseconds, written as a
//! decimal string (for example `1705312800000`). Identifiers only need to be unique within one
//! process lifetime, since nothing is persisted.

use chrono::{DateTime, Utc};

/// Issues millisecond timestamp identifiers that never repeat within one generator.
///
/// If the clock has not moved past the last issued value (two creates inside the same
/// millisecond, or the clock stepping backwards), the last value plus one is issued instead.
/// The generator lives inside the store and is only used under the store lock.
#[derive(Clone, Debug, Default)]
pub struct TimestampIdGenerator {
    last: Option<i64>,
}

impl TimestampIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues an identifier for the current time.
    pub fn next_id(&mut self) -> String {
        self.next_at(Utc::now())
    }

    /// Issues an identifier for `now`, bumped past the previous one if necessary.
    pub fn next_at(&mut self, now: DateTime<Utc>) -> String {
        let millis = match self.last {
            Some(prev) if now.timestamp_millis() <= prev => prev + 1,
            _ => now.timestamp_millis(),
        };
        self.last = Some(millis);
        millis.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_id_is_millisecond_timestamp() {
        let mut ids = TimestampIdGenerator::new();
        let now: DateTime<Utc> = "2024-01-15T10:00:00.123Z".parse().unwrap();

        assert_eq!(ids.next_at(now), now.timestamp_millis().to_string());
    }

    #[test]
    fn test_same_instant_is_bumped() {
        let mut ids = TimestampIdGenerator::new();
        let now = Utc::now();

        let first: i64 = ids.next_at(now).parse().unwrap();
        let second: i64 = ids.next_at(now).parse().unwrap();

        assert_eq!(second, first + 1);
    }

    #[test]
    fn test_clock_going_backwards_stays_monotonic() {
        let mut ids = TimestampIdGenerator::new();
        let now = Utc::now();

        let first: i64 = ids.next_at(now).parse().unwrap();
        let second: i64 = ids.next_at(now - Duration::seconds(5)).parse().unwrap();

        assert!(second > first);
    }

    #[test]
    fn test_back_to_back_ids_are_distinct() {
        let mut ids = TimestampIdGenerator::new();
        let issued: Vec<String> = (0..100).map(|_| ids.next_id()).collect();

        let mut unique = issued.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), issued.len());
    }
}
