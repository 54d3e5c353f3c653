use crate::wire::HealthRes;

/// Simple health service that can be used by the REST API and its clients
///
/// This service provides a standardised way to check the health status of MaligNet.
#[derive(Clone)]
pub struct HealthService;

impl HealthService {
    /// Check health without creating an instance
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is healthy.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "MaligNet REST API is alive".into(),
        }
    }
}
