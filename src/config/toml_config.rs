use crate::core::location::DEFAULT_LOCATION;
use crate::core::schedule::FeeSchedule;
use crate::utils::error::{CalcError, Result};
use crate::utils::retry::RetryPolicy;
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub pricing: FeeSchedule,
    pub geolocation: GeolocationConfig,
    pub leap_api: LeapApiConfig,
    pub gemini: GeminiConfig,
    pub retry: RetryPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeolocationConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
    /// Location assumed when the lookup fails.
    pub fallback_location: String,
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            base_url: "http://ip-api.com/json".to_string(),
            api_key: None,
            timeout_seconds: 5,
            fallback_location: DEFAULT_LOCATION.to_string(),
        }
    }
}

impl GeolocationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn api_key(&self) -> Option<&str> {
        resolved_secret(&self.api_key)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LeapApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for LeapApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://leap.deno.dev".to_string(),
            timeout_seconds: 10,
        }
    }
}

impl LeapApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-2.5-flash-preview-09-2025".to_string(),
            api_key: Some("${GEMINI_API_KEY}".to_string()),
            timeout_seconds: 30,
        }
    }
}

impl GeminiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn api_key(&self) -> Option<&str> {
        resolved_secret(&self.api_key)
    }
}

/// Treats empty values and `${VAR}` placeholders left by an unset variable as absent.
fn resolved_secret(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && !(v.starts_with("${") && v.ends_with('}')))
}

impl TomlConfig {
    /// Reads and parses a TOML config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CalcError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        let mut config: Self =
            toml::from_str(&processed_content).map_err(|e| CalcError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;
        config.resolve_default_secrets();
        Ok(config)
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CalcError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Serde defaults bypass substitution, so placeholders coming from them
    /// are expanded here.
    fn resolve_default_secrets(&mut self) {
        for key in [&mut self.gemini.api_key, &mut self.geolocation.api_key] {
            if let Some(value) = key.as_mut() {
                if let Ok(expanded) = Self::substitute_env_vars(value) {
                    *value = expanded;
                }
            }
        }
    }

    /// Loads `path` when given, otherwise starts from defaults (with env keys expanded).
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                Self::from_file(path)?
            }
            None => Self::from_toml_str("")?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate_config(&self) -> Result<()> {
        self.pricing.validate()?;

        validate_url("geolocation.base_url", &self.geolocation.base_url)?;
        validate_positive_number("geolocation.timeout_seconds", self.geolocation.timeout_seconds, 1)?;
        validate_non_empty_string(
            "geolocation.fallback_location",
            &self.geolocation.fallback_location,
        )?;

        validate_url("leap_api.base_url", &self.leap_api.base_url)?;
        validate_positive_number("leap_api.timeout_seconds", self.leap_api.timeout_seconds, 1)?;

        validate_url("gemini.base_url", &self.gemini.base_url)?;
        validate_non_empty_string("gemini.model", &self.gemini.model)?;
        validate_positive_number("gemini.timeout_seconds", self.gemini.timeout_seconds, 1)?;

        validate_positive_number("retry.max_attempts", u64::from(self.retry.max_attempts), 1)?;
        validate_range("retry.jitter_percent", self.retry.jitter_percent, 0, 100)?;
        if self.retry.base_delay_ms > self.retry.max_delay_ms {
            return Err(CalcError::ConfigValidationError {
                field: "retry".to_string(),
                message: "base_delay_ms must not exceed max_delay_ms".to_string(),
            });
        }

        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
