//! # API Shared
//!
//! Shared definitions for the dashboard APIs.
//!
//! Contains:
//! - Wire models for records, requests and replies (`models`)
//! - Push-channel messages (`events`)
//! - The telephony tool-call adapter (`tool_call`)
//! - Shared services like `HealthService`
//!
//! Used by `dash-core` for its record types and by `api-rest` for the HTTP and socket layers.

pub mod events;
pub mod health;
pub mod models;
pub mod tool_call;

pub use events::{ClientMessage, ServerEvent};
pub use health::HealthService;
pub use models::*;
pub use tool_call::{Invocation, ToolCallError, ToolCallResult, ToolCallResults};
