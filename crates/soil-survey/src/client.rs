//! Soil-survey client
//!
//! Queries the ISRIC SoilGrids properties endpoint for a fixed property set
//! at two depth bands, requesting both mean and uncertainty values, under a
//! bounded timeout. Degrade-to-default is the contract here: on timeout,
//! non-success status, or a malformed body the client logs the failure and
//! hands back the fixed fallback soil record, so downstream stages never
//! see a missing or partial input.

use crate::{normalize, SurveyResponse};
use agronomy::{Coordinate, SoilProperties};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Properties requested from the survey source (wire names).
pub const REQUESTED_PROPERTIES: [&str; 8] = [
    "phh2o", "nitrogen", "soc", "sand", "silt", "clay", "cec", "bdod",
];

/// Depth bands requested; normalization reads the first.
pub const REQUESTED_DEPTHS: [&str; 2] = ["0-5cm", "5-15cm"];

pub const DEFAULT_ENDPOINT: &str = "https://rest.isric.org/soilgrids/v2.0/properties/query";
pub const DEFAULT_TIMEOUT_SEC: u64 = 15;

/// Survey client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyConfig {
    /// Properties-query endpoint.
    pub endpoint: String,
    /// Request timeout in seconds.
    pub timeout_sec: u64,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_sec: DEFAULT_TIMEOUT_SEC,
        }
    }
}

/// Survey transport errors. These never leave the crate as failures; they
/// are logged and absorbed into the fallback record.
#[derive(Error, Debug)]
pub enum SurveyError {
    #[error("request failed: {0}")]
    RequestFailed(String),
    #[error("survey source returned status {0}")]
    BadStatus(u16),
    #[error("malformed survey response: {0}")]
    Parse(String),
}

/// Soil-survey query client.
pub struct SurveyClient {
    config: SurveyConfig,
    client: reqwest::Client,
}

impl SurveyClient {
    pub fn new(config: SurveyConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_sec))
            .build()
            .expect("failed to create HTTP client");

        Self {
            config,
            client,
        }
    }

    fn query_url(&self, location: Coordinate) -> String {
        let mut url = format!(
            "{}?lon={:.6}&lat={:.6}",
            self.config.endpoint, location.longitude, location.latitude
        );
        for property in REQUESTED_PROPERTIES {
            url.push_str("&property=");
            url.push_str(property);
        }
        for depth in REQUESTED_DEPTHS {
            url.push_str("&depth=");
            url.push_str(depth);
        }
        url.push_str("&value=mean&value=uncertainty");
        url
    }

    async fn fetch_raw(&self, location: Coordinate) -> Result<SurveyResponse, SurveyError> {
        let response = self
            .client
            .get(self.query_url(location))
            .send()
            .await
            .map_err(|e| SurveyError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SurveyError::BadStatus(response.status().as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| SurveyError::Parse(e.to_string()))
    }

    /// Fetch and normalize the soil record for a coordinate. Any failure of
    /// any kind yields the fixed fallback record instead of an error.
    pub async fn fetch_properties(&self, location: Coordinate) -> SoilProperties {
        match self.fetch_raw(location).await {
            Ok(raw) => {
                let soil = normalize::normalize(&raw);
                debug!(
                    layers = raw.properties.layers.len(),
                    uncertainties = soil.uncertainties.len(),
                    "normalized survey response"
                );
                soil
            }
            Err(e) => {
                warn!("survey fetch failed, using fallback soil record: {}", e);
                SoilProperties::fallback()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_url_carries_the_full_request() {
        let client = SurveyClient::new(SurveyConfig::default());
        let location = Coordinate::new(26.85, 80.95).unwrap();
        let url = client.query_url(location);

        assert!(url.starts_with(DEFAULT_ENDPOINT));
        assert!(url.contains("lat=26.850000"));
        assert!(url.contains("lon=80.950000"));
        for property in REQUESTED_PROPERTIES {
            assert!(url.contains(&format!("property={}", property)), "{}", url);
        }
        assert!(url.contains("depth=0-5cm"));
        assert!(url.contains("depth=5-15cm"));
        assert!(url.contains("value=mean"));
        assert!(url.contains("value=uncertainty"));
    }

    #[tokio::test]
    async fn unreachable_endpoint_degrades_to_fallback() {
        let client = SurveyClient::new(SurveyConfig {
            endpoint: "http://127.0.0.1:9/soilgrids/v2.0/properties/query".to_string(),
            timeout_sec: 1,
        });
        let location = Coordinate::new(0.0, 0.0).unwrap();

        let soil = client.fetch_properties(location).await;
        assert_eq!(soil, SoilProperties::fallback());
        assert!(soil.uncertainties.is_empty());
    }

    /// Serve exactly one canned HTTP response on a loopback port.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut request = [0u8; 4096];
                let _ = socket.read(&mut request).await;
                let response = format!(
                    "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_line,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
            }
        });
        format!("http://{}/properties/query", addr)
    }

    fn client_for(endpoint: String) -> SurveyClient {
        SurveyClient::new(SurveyConfig {
            endpoint,
            timeout_sec: 2,
        })
    }

    #[tokio::test]
    async fn server_error_status_degrades_to_fallback() {
        let endpoint = serve_once("HTTP/1.1 500 Internal Server Error", "{}").await;
        let location = Coordinate::new(0.0, 0.0).unwrap();

        let soil = client_for(endpoint).fetch_properties(location).await;
        assert_eq!(soil, SoilProperties::fallback());
    }

    #[tokio::test]
    async fn malformed_body_degrades_to_fallback() {
        let endpoint = serve_once("HTTP/1.1 200 OK", "not json at all").await;
        let location = Coordinate::new(0.0, 0.0).unwrap();

        let soil = client_for(endpoint).fetch_properties(location).await;
        assert_eq!(soil, SoilProperties::fallback());
    }

    #[tokio::test]
    async fn parsed_body_is_normalized_not_defaulted() {
        let endpoint = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"properties":{"layers":[{"name":"phh2o","depths":[{"values":{"mean":58,"uncertainty":5}}]}]}}"#,
        )
        .await;
        let location = Coordinate::new(0.0, 0.0).unwrap();

        let soil = client_for(endpoint).fetch_properties(location).await;
        assert_eq!(soil.ph, 5.8);
        assert_eq!(soil.uncertainties["ph"], 0.5);
        assert_eq!(soil.organic_carbon, SoilProperties::default().organic_carbon);
    }
}
