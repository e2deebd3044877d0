use crate::config::toml_config::GeolocationConfig;
use crate::domain::ports::LocationProvider;
use crate::utils::error::{CalcError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

const SERVICE: &str = "geolocation";

#[derive(Debug, Deserialize)]
struct GeoResponse {
    status: Option<String>,
    country: Option<String>,
    message: Option<String>,
}

/// Looks up the caller's country from its public IP. One attempt, bounded by
/// the configured timeout.
pub struct IpGeolocationClient {
    config: GeolocationConfig,
    client: Client,
}

impl IpGeolocationClient {
    pub fn new(config: GeolocationConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { config, client })
    }

    pub fn fallback_location(&self) -> &str {
        &self.config.fallback_location
    }
}

#[async_trait]
impl LocationProvider for IpGeolocationClient {
    async fn locate(&self) -> Result<String> {
        tracing::debug!("Making geolocation request to: {}", self.config.base_url);

        let mut request = self.client.get(&self.config.base_url);
        if let Some(key) = self.config.api_key() {
            request = request.query(&[("key", key)]);
        }

        // The optional key is a query parameter, so error URLs are dropped.
        let response = request
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| CalcError::from(e.without_url()))?;
        tracing::debug!("Geolocation response status: {}", response.status());

        let body: GeoResponse = response
            .json()
            .await
            .map_err(|e| CalcError::from(e.without_url()))?;

        if body.status.as_deref() == Some("fail") {
            return Err(CalcError::unexpected_response(
                SERVICE,
                body.message
                    .unwrap_or_else(|| "lookup reported failure".to_string()),
            ));
        }

        match body.country {
            Some(country) if !country.trim().is_empty() => Ok(country.trim().to_string()),
            _ => Err(CalcError::unexpected_response(
                SERVICE,
                "response did not contain a country",
            )),
        }
    }
}
