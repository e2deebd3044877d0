pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::TomlConfig;

pub use crate::core::evaluator::DeliveryFeeEvaluator;
pub use crate::core::schedule::{FeeSchedule, LocationRules, SurchargePolicy};
pub use crate::domain::model::{CartTier, FeeBreakdown, PricingRequest, PricingResult};
pub use crate::utils::error::{CalcError, Result};
