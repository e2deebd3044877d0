#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{BmiArgs, CliConfig, LeapArgs, LeapSourceKind};
pub use toml_config::{GeminiConfig, GeolocationConfig, LeapApiConfig, TomlConfig};
