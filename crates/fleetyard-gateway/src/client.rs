//! HTTP client for the spreadsheet web script.
//!
//! The script exposes one URL; the operation is selected by the `action`
//! query parameter. Position updates ride on GET query parameters as well
//! (the script does not read request bodies), and the record identifier
//! travels under its spreadsheet column name `ri`.

use async_trait::async_trait;
use chrono::Local;
use fleetyard_core::config::GatewayConfig;
use fleetyard_core::error::{FleetError, Result};
use fleetyard_core::geometry::StorePoint;
use fleetyard_core::types::VehicleId;
use fleetyard_sync::gateway::{RawVehicleRecord, ServiceRequest, SyncGateway};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Envelope the script wraps the record list in.
#[derive(Debug, Deserialize)]
struct SheetEnvelope {
    data: Vec<RawVehicleRecord>,
}

/// Gateway to the spreadsheet web script.
#[derive(Debug, Clone)]
pub struct SheetGateway {
    base_url: String,
    client: Client,
}

impl SheetGateway {
    /// Creates a gateway for a deployed script URL.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FleetError::transport)?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// Creates a gateway from the application configuration.
    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        Self::new(config.script_url.clone(), config.request_timeout())
    }

    /// Returns the script URL this gateway talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issues one action GET and returns the response after a status check.
    async fn action(&self, params: &[(&str, String)]) -> Result<reqwest::Response> {
        let response = self
            .client
            .get(&self.base_url)
            .query(params)
            .send()
            .await
            .map_err(FleetError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(FleetError::fetch(status.as_u16(), detail));
        }

        Ok(response)
    }
}

#[async_trait]
impl SyncGateway for SheetGateway {
    async fn fetch_all(&self) -> Result<Vec<RawVehicleRecord>> {
        tracing::debug!(url = %self.base_url, "fetching vehicle snapshot");

        let response = self.action(&[("action", "getData".to_string())]).await?;
        let envelope: SheetEnvelope = response.json().await.map_err(FleetError::payload)?;

        tracing::debug!(records = envelope.data.len(), "snapshot received");
        Ok(envelope.data)
    }

    async fn persist_position(&self, id: &VehicleId, position: StorePoint) -> Result<()> {
        let params = [
            ("action", "updatePosition".to_string()),
            ("ri", id.as_str().to_string()),
            ("x", position.x.to_string()),
            ("y", position.y.to_string()),
        ];

        // Success body is ignored beyond the status check.
        self.action(&params)
            .await
            .map_err(|e| FleetError::persist(id.as_str(), e.to_string()))?;

        tracing::debug!(vehicle = %id, x = position.x, y = position.y, "position persisted to sheet");
        Ok(())
    }

    async fn submit_service_request(&self, request: &ServiceRequest) -> Result<()> {
        let params = [
            ("action", "addRequest".to_string()),
            ("ri", request.vehicle_id.clone()),
            ("location", request.location.clone()),
            ("notes", request.notes.clone()),
            ("requested", Local::now().format("%d/%m/%Y").to_string()),
        ];

        self.action(&params).await?;
        tracing::info!(vehicle = %request.vehicle_id, "service request submitted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_creation() {
        let gateway = SheetGateway::new(
            "https://script.example.com/exec",
            Duration::from_secs(5),
        );
        assert!(gateway.is_ok());
        assert_eq!(
            gateway.unwrap().base_url(),
            "https://script.example.com/exec"
        );
    }

    #[test]
    fn test_envelope_parsing_with_mixed_coordinate_shapes() {
        let body = r#"{
            "data": [
                {"id": "v1", "x": "120.5", "y": 80, "status": "in repair"},
                {"id": "v2", "x": 10, "y": 20},
                {"id": "v3"}
            ],
            "updated": "irrelevant"
        }"#;

        let envelope: SheetEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.data.len(), 3);
        assert_eq!(
            envelope.data[0].position(),
            Some(StorePoint::new(120.5, 80.0))
        );
        assert_eq!(envelope.data[1].position(), Some(StorePoint::new(10.0, 20.0)));
        assert_eq!(envelope.data[2].position(), None);
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        // Reserved TEST-NET-1 address: connection fails fast, no retry.
        let gateway =
            SheetGateway::new("http://192.0.2.1/exec", Duration::from_millis(200)).unwrap();
        let err = gateway.fetch_all().await.unwrap_err();
        assert!(matches!(err, FleetError::Transport { .. }));
    }
}
