use crate::models::HealthRes;

/// Health service shared by the REST router and the runner binary.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    /// Creates a new instance of HealthService.
    pub fn new() -> Self {
        Self
    }

    /// Returns a `HealthRes` indicating the service is healthy.
    ///
    /// Nothing external is probed: the store lives in memory, so a responding process is a
    /// healthy one.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "Dashboard is alive".into(),
        }
    }
}
