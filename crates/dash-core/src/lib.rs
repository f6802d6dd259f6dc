//! # Dashboard Core
//!
//! Core state and mutation logic for the doctor dashboard.
//!
//! This crate contains:
//! - The in-memory [`Store`] holding doctors, visit statistics, reviews and medical info
//! - The [`Gateway`] that validates requests, mutates the store and broadcasts the result
//! - Visit statistics aggregation (quarters, months, relationship flows)
//! - Startup configuration and seed fixtures
//!
//! **No transport concerns**: HTTP routing, WebSocket framing and the telephony adapter belong in
//! `api-rest` and `api-shared`.

pub mod config;
pub mod constants;
pub mod error;
pub mod fixtures;
pub mod gateway;
pub mod ids;
pub mod stats;
pub mod store;

pub use config::CoreConfig;
pub use constants::{DEFAULT_BROADCAST_CAPACITY, DEFAULT_HOST, DEFAULT_PORT};
pub use error::{DashboardError, DashboardResult};
pub use gateway::{Gateway, Subscription};
pub use store::Store;
