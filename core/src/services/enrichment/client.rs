use std::sync::Arc;
use std::time::Duration;

use crate::domain::value_objects::EnrichmentResult;
use crate::errors::EnrichmentError;

use super::traits::VehicleSource;

/// Upper bound on a single vehicle lookup
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Bounded, non-retrying vehicle lookup that never fails its caller
pub struct EnrichmentClient {
    source: Arc<dyn VehicleSource>,
    timeout: Duration,
}

impl EnrichmentClient {
    pub fn new(source: Arc<dyn VehicleSource>) -> Self {
        Self::with_timeout(source, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(source: Arc<dyn VehicleSource>, timeout: Duration) -> Self {
        Self { source, timeout }
    }

    /// Look up vehicle details for `vehicle_id`.
    ///
    /// `None` short-circuits to `Absent` without contacting the source. A
    /// non-success status, transport error, undecodable body or timeout is
    /// logged and also yields `Absent`.
    pub async fn fetch_by_id(&self, vehicle_id: Option<i64>) -> EnrichmentResult {
        let Some(vehicle_id) = vehicle_id else {
            return EnrichmentResult::Absent;
        };

        let outcome = tokio::time::timeout(self.timeout, self.source.fetch_vehicle(vehicle_id))
            .await
            .unwrap_or(Err(EnrichmentError::Timeout));

        match outcome {
            Ok(vehicle) => EnrichmentResult::Found(vehicle),
            Err(EnrichmentError::Status(status)) => {
                tracing::warn!(
                    vehicle_id,
                    status,
                    event = "vehicle_lookup_status",
                    "Vehicle service returned a non-success status"
                );
                EnrichmentResult::Absent
            }
            Err(error) => {
                tracing::error!(
                    vehicle_id,
                    error = %error,
                    timeout_ms = self.timeout.as_millis() as u64,
                    event = "vehicle_lookup_failed",
                    "Vehicle lookup failed"
                );
                EnrichmentResult::Absent
            }
        }
    }
}
