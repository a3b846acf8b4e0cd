//! HTTP implementation of `VehicleSource`
//!
//! Calls `GET {base}/api/vehicle/{id}` on the vehicle service. Any non-200
//! status is reported as `EnrichmentError::Status`; the enrichment client
//! decides how failures surface to callers.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use am_core::domain::value_objects::VehicleSnapshot;
use am_core::errors::EnrichmentError;
use am_core::services::VehicleSource;
use am_shared::config::EnrichmentConfig;
use am_shared::validation::is_valid_url;

use crate::InfrastructureError;

/// The vehicle service wraps the record as `{"message": .., "vehicle": {..}}`;
/// a bare record is accepted too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum VehiclePayload {
    Wrapped { vehicle: VehicleSnapshot },
    Bare(VehicleSnapshot),
}

impl VehiclePayload {
    fn into_snapshot(self) -> VehicleSnapshot {
        match self {
            VehiclePayload::Wrapped { vehicle } | VehiclePayload::Bare(vehicle) => vehicle,
        }
    }
}

#[derive(Clone)]
pub struct HttpVehicleSource {
    client: Client,
    base_url: String,
}

impl HttpVehicleSource {
    pub fn new(config: &EnrichmentConfig) -> Result<Self, InfrastructureError> {
        Self::with_timeout(&config.vehicle_service_url, config.timeout())
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, InfrastructureError> {
        if !is_valid_url(base_url) {
            return Err(InfrastructureError::Config(format!(
                "Vehicle service URL must use http or https: {}",
                base_url
            )));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub(crate) fn vehicle_url(&self, vehicle_id: i64) -> String {
        format!("{}/api/vehicle/{}", self.base_url, vehicle_id)
    }
}

#[async_trait]
impl VehicleSource for HttpVehicleSource {
    async fn fetch_vehicle(&self, vehicle_id: i64) -> Result<VehicleSnapshot, EnrichmentError> {
        let url = self.vehicle_url(vehicle_id);
        tracing::debug!(%url, "Fetching vehicle details");

        let response = self.client.get(&url).send().await.map_err(classify)?;
        if response.status() != StatusCode::OK {
            return Err(EnrichmentError::Status(response.status().as_u16()));
        }

        let payload: VehiclePayload = response.json().await.map_err(|e| {
            if e.is_timeout() {
                EnrichmentError::Timeout
            } else {
                EnrichmentError::Decode(e.to_string())
            }
        })?;
        Ok(payload.into_snapshot())
    }
}

fn classify(error: reqwest::Error) -> EnrichmentError {
    if error.is_timeout() {
        EnrichmentError::Timeout
    } else {
        EnrichmentError::Transport(error.to_string())
    }
}
