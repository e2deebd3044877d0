use crate::config::toml_config::GeminiConfig;
use crate::core::leap::check_range;
use crate::domain::ports::LeapYearSource;
use crate::utils::error::{CalcError, Result};
use crate::utils::retry::RetryPolicy;
use crate::utils::validation::validate_required_field;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

const SERVICE: &str = "gemini";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Answers leap-year questions by asking a generative-language model for
/// structured JSON (`{"result": ...}`) constrained by a response schema.
pub struct GeminiLeapYears {
    config: GeminiConfig,
    api_key: String,
    retry: RetryPolicy,
    client: Client,
}

impl GeminiLeapYears {
    pub fn new(config: GeminiConfig, retry: RetryPolicy) -> Result<Self> {
        let api_key = validate_required_field(
            "gemini.api_key",
            &config.api_key().map(str::to_string),
        )?
        .clone();
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            config,
            api_key,
            retry,
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn payload(prompt: &str, result_schema: Value) -> Value {
        json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": { "result": result_schema },
                    "propertyOrdering": ["result"]
                }
            }
        })
    }

    /// Pulls the model's JSON text out of the first candidate and reads `result`.
    fn extract_result<T: DeserializeOwned>(body: &Value) -> Result<T> {
        let text = body
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                CalcError::unexpected_response(
                    SERVICE,
                    "response was successful but did not contain JSON text",
                )
            })?;

        let mut answer: Value = serde_json::from_str(text)?;
        let result = answer
            .get_mut("result")
            .map(Value::take)
            .ok_or_else(|| CalcError::unexpected_response(SERVICE, "model answer had no 'result'"))?;
        Ok(serde_json::from_value(result)?)
    }

    /// The key travels in a header, and reqwest errors are stripped of their
    /// URL, so neither ends up in logs or console output.
    async fn generate<T: DeserializeOwned>(&self, payload: &Value) -> Result<T> {
        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(payload)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| CalcError::from(e.without_url()))?;
        let body: Value = response
            .json()
            .await
            .map_err(|e| CalcError::from(e.without_url()))?;
        Self::extract_result(&body)
    }

    async fn ask<T: DeserializeOwned>(&self, prompt: &str, result_schema: Value) -> Result<T> {
        let payload = Self::payload(prompt, result_schema);
        tracing::debug!("Asking {} ({}): {}", SERVICE, self.config.model, prompt);
        self.retry.run(SERVICE, || self.generate::<T>(&payload)).await
    }
}

#[async_trait]
impl LeapYearSource for GeminiLeapYears {
    fn name(&self) -> &str {
        "ai"
    }

    async fn is_leap_year(&self, year: i32) -> Result<bool> {
        let prompt = format!(
            "Is the year {} a leap year? Return the answer as a JSON object.",
            year
        );
        self.ask(&prompt, json!({ "type": "BOOLEAN" })).await
    }

    async fn leap_years_between(&self, start: i32, end: i32) -> Result<Vec<i32>> {
        check_range(start, end)?;
        let prompt = format!(
            "List all leap years between {} and {} inclusive. Return only the list of years in the 'result' field of a JSON object.",
            start, end
        );
        let mut years: Vec<i32> = self
            .ask(&prompt, json!({ "type": "ARRAY", "items": { "type": "INTEGER" } }))
            .await?;
        years.sort_unstable();
        years.dedup();
        Ok(years)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_config_error() {
        let config = GeminiConfig {
            api_key: None,
            ..GeminiConfig::default()
        };
        assert!(matches!(
            GeminiLeapYears::new(config, RetryPolicy::none()),
            Err(CalcError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_extract_result() {
        let body = json!({
            "candidates": [{ "content": { "parts": [{ "text": "{\"result\": [2024, 2028]}" }] } }]
        });
        let years: Vec<i32> = GeminiLeapYears::extract_result(&body).unwrap();
        assert_eq!(years, vec![2024, 2028]);
    }

    #[test]
    fn test_extract_result_without_text() {
        let body = json!({ "candidates": [] });
        let result: Result<bool> = GeminiLeapYears::extract_result(&body);
        assert!(matches!(result, Err(CalcError::UnexpectedResponse { .. })));
    }

    #[test]
    fn test_extract_result_with_invalid_json_text() {
        let body = json!({
            "candidates": [{ "content": { "parts": [{ "text": "not json" }] } }]
        });
        let result: Result<bool> = GeminiLeapYears::extract_result(&body);
        assert!(matches!(result, Err(CalcError::SerializationError(_))));
    }

    #[test]
    fn test_payload_shape() {
        let payload = GeminiLeapYears::payload("hi", json!({ "type": "BOOLEAN" }));
        assert_eq!(payload["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(
            payload["generationConfig"]["responseSchema"]["properties"]["result"]["type"],
            "BOOLEAN"
        );
    }
}
