use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalcError {
    #[error("Invalid input for '{field}' ({value}): {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Unexpected response from {service}: {message}")]
    UnexpectedResponse { service: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Network,
    Configuration,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CalcError {
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidInput {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn unexpected_response(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UnexpectedResponse {
            service: service.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } => ErrorCategory::Input,
            Self::ApiError(_) | Self::UnexpectedResponse { .. } => ErrorCategory::Network,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::SerializationError(_) => ErrorCategory::Data,
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network | ErrorCategory::Data => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Transport failures and malformed responses may succeed on a later attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::ApiError(e) => !e.is_builder(),
            Self::UnexpectedResponse { .. } | Self::SerializationError(_) => true,
            _ => false,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::InvalidInput { field, .. } => {
                format!("Re-enter '{}' as a non-negative number and run again", field)
            }
            Self::ApiError(e) if e.is_timeout() => {
                "The remote service timed out; raise the timeout in the config or retry later"
                    .to_string()
            }
            Self::ApiError(_) => "Check network connectivity and the service base URL".to_string(),
            Self::UnexpectedResponse { service, .. } => {
                format!("Verify that {} is reachable and returns the expected JSON", service)
            }
            Self::MissingConfigError { field } => {
                format!("Set '{}' in the config file or its environment variable", field)
            }
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => {
                "Fix the configuration file and run again".to_string()
            }
            Self::SerializationError(_) => "The response could not be parsed as JSON".to_string(),
            Self::IoError(_) => "Check file paths and permissions".to_string(),
        }
    }

    /// Process exit code for the binaries, by severity.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InvalidInput { field, reason, .. } => {
                format!("Error in input: {} ({}). Please enter valid numbers.", reason, field)
            }
            Self::ApiError(_) | Self::UnexpectedResponse { .. } => {
                format!("A remote service call failed: {}", self)
            }
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
