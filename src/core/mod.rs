pub mod bmi;
pub mod evaluator;
pub mod leap;
pub mod location;
pub mod prime;
pub mod schedule;

pub use crate::domain::model::{CartTier, FeeBreakdown, PricingRequest, PricingResult};
pub use crate::domain::ports::{LeapYearSource, LocationProvider};
pub use crate::utils::error::Result;
