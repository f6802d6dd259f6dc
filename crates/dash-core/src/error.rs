/// Errors returned by dashboard core operations.
///
/// The HTTP layer maps `MissingField`/`MissingFields`/`InvalidInput` to client errors and
/// `NotFound` to 404. `InvalidPeriod` only arises from malformed stored data and is reported as
/// a server fault.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid month label: {0}")]
    InvalidPeriod(String),
}

impl DashboardError {
    /// Whether the error was caused by the request rather than by the server.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, DashboardError::InvalidPeriod(_))
    }
}

pub type DashboardResult<T> = std::result::Result<T, DashboardError>;
