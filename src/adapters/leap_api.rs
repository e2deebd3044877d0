use crate::config::toml_config::LeapApiConfig;
use crate::core::leap::check_range;
use crate::domain::ports::LeapYearSource;
use crate::utils::error::{CalcError, Result};
use crate::utils::retry::RetryPolicy;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

const SERVICE: &str = "leap-api";

#[derive(Debug, Deserialize)]
struct LeapResponse<T> {
    result: Option<T>,
}

/// Client for the leap-year REST service (`/{year}`, `/range/{start}/{end}`).
pub struct LeapApiClient {
    config: LeapApiConfig,
    retry: RetryPolicy,
    client: Client,
}

impl LeapApiClient {
    pub fn new(config: LeapApiConfig, retry: RetryPolicy) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            config,
            retry,
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        tracing::debug!("Making API request to: {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body: LeapResponse<T> = response.json().await?;
        body.result
            .ok_or_else(|| CalcError::unexpected_response(SERVICE, "response had no 'result' field"))
    }

    async fn get_result<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        self.retry.run(SERVICE, || self.fetch::<T>(&url)).await
    }
}

#[async_trait]
impl LeapYearSource for LeapApiClient {
    fn name(&self) -> &str {
        "api"
    }

    async fn is_leap_year(&self, year: i32) -> Result<bool> {
        self.get_result(&year.to_string()).await
    }

    async fn leap_years_between(&self, start: i32, end: i32) -> Result<Vec<i32>> {
        check_range(start, end)?;
        self.get_result(&format!("range/{}/{}", start, end)).await
    }
}
