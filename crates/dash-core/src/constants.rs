//! Constants used throughout the dashboard core crate.

/// Port used when neither `DASHBOARD_ADDR` nor `PORT` is set.
pub const DEFAULT_PORT: u16 = 4000;

/// Host the server binds to by default.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Number of push-channel messages buffered per subscriber before it starts lagging.
pub const DEFAULT_BROADCAST_CAPACITY: usize = 64;

/// Largest accepted push-channel buffer.
pub const MAX_BROADCAST_CAPACITY: usize = 65_536;

/// Record kind names used in not-found messages.
pub const DOCTOR_KIND: &str = "Doctor";
pub const REVIEW_KIND: &str = "Review";
pub const MEDICAL_INFO_KIND: &str = "Medical info";

/// Lowest and highest accepted review ratings.
pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;
