use crate::utils::error::{CalcError, Result};
use crate::utils::validation::{require_non_negative, Validate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One delivery-fee question: who is buying, how much, and where to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRequest {
    pub customer_id: i64,
    pub cart_value: f64,
    pub location: String,
}

impl PricingRequest {
    pub fn new(customer_id: i64, cart_value: f64, location: impl Into<String>) -> Self {
        Self {
            customer_id,
            cart_value,
            location: location.into(),
        }
    }
}

/// Rejects negative customer ids. Shared by request validation and the
/// console front end, which checks each value as soon as it is entered.
pub fn validate_customer_id(customer_id: i64) -> Result<()> {
    if customer_id < 0 {
        return Err(CalcError::invalid_input(
            "customer_id",
            customer_id,
            "Customer ID must be a non-negative integer",
        ));
    }
    Ok(())
}

pub fn validate_cart_value(cart_value: f64) -> Result<()> {
    require_non_negative("cart_value", cart_value)
}

impl Validate for PricingRequest {
    fn validate(&self) -> Result<()> {
        validate_customer_id(self.customer_id)?;
        validate_cart_value(self.cart_value)
    }
}

/// Cart-value band that decides the base charge before any override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CartTier {
    /// Above the free-delivery threshold.
    Free,
    /// Inside the standard band, both ends inclusive.
    Standard,
    /// Below the standard band.
    Small,
    /// Between the standard band and the free threshold.
    Mid,
}

impl fmt::Display for CartTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CartTier::Free => "free",
            CartTier::Standard => "standard",
            CartTier::Small => "small",
            CartTier::Mid => "mid",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    pub tier: CartTier,
    /// Charge the tier alone would have produced.
    pub tier_charge: f64,
    pub prime_override: bool,
    /// Tier charge after the prime override.
    pub base_charge: f64,
    pub surcharge: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    pub fee: f64,
    pub breakdown: FeeBreakdown,
}

impl PricingResult {
    pub fn is_free(&self) -> bool {
        self.fee == 0.0
    }
}
