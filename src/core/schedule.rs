use crate::core::location::normalize_location;
use crate::utils::error::{CalcError, Result};
use crate::utils::validation::{validate_non_negative_amount, Validate};
use serde::{Deserialize, Serialize};

/// How a location string decides whether the remote surcharge applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurchargePolicy {
    /// Surcharge everything that is not in the domestic list.
    Domestic,
    /// Surcharge only what is in the remote list.
    RemoteList,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationRules {
    pub policy: SurchargePolicy,
    pub domestic: Vec<String>,
    pub remote: Vec<String>,
}

impl Default for LocationRules {
    fn default() -> Self {
        Self {
            policy: SurchargePolicy::Domestic,
            domestic: vec!["india".to_string()],
            remote: vec!["remote".to_string(), "outside india".to_string()],
        }
    }
}

impl LocationRules {
    /// `location` must already be normalized.
    pub fn is_surcharged(&self, location: &str) -> bool {
        match self.policy {
            SurchargePolicy::Domestic => !self.domestic.iter().any(|d| d == location),
            SurchargePolicy::RemoteList => self.remote.iter().any(|r| r == location),
        }
    }

    /// Normalizes list entries so config can say "India" or " Outside India ".
    pub fn normalized(mut self) -> Self {
        self.domestic = self.domestic.iter().map(|s| normalize_location(s)).collect();
        self.remote = self.remote.iter().map(|s| normalize_location(s)).collect();
        self
    }
}

/// Thresholds and amounts the delivery-fee rules are evaluated against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeSchedule {
    pub free_threshold: f64,
    pub standard_min: f64,
    pub standard_max: f64,
    pub standard_fee: f64,
    pub small_cart_fee: f64,
    /// Charge between `standard_max` and `free_threshold`. The historical
    /// rules never named this band; 20 is the value the shop has used.
    pub mid_tier_fee: f64,
    pub surcharge: f64,
    pub location: LocationRules,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            free_threshold: 2000.0,
            standard_min: 500.0,
            standard_max: 1000.0,
            standard_fee: 40.0,
            small_cart_fee: 60.0,
            mid_tier_fee: 20.0,
            surcharge: 50.0,
            location: LocationRules::default(),
        }
    }
}

impl Validate for FeeSchedule {
    fn validate(&self) -> Result<()> {
        let amounts = [
            ("pricing.free_threshold", self.free_threshold),
            ("pricing.standard_min", self.standard_min),
            ("pricing.standard_max", self.standard_max),
            ("pricing.standard_fee", self.standard_fee),
            ("pricing.small_cart_fee", self.small_cart_fee),
            ("pricing.mid_tier_fee", self.mid_tier_fee),
            ("pricing.surcharge", self.surcharge),
        ];
        for (field, value) in amounts {
            validate_non_negative_amount(field, value)?;
        }

        if self.standard_min > self.standard_max || self.standard_max > self.free_threshold {
            return Err(CalcError::ConfigValidationError {
                field: "pricing".to_string(),
                message: format!(
                    "tiers must satisfy standard_min ({}) <= standard_max ({}) <= free_threshold ({})",
                    self.standard_min, self.standard_max, self.free_threshold
                ),
            });
        }

        let (field, list) = match self.location.policy {
            SurchargePolicy::Domestic => ("pricing.location.domestic", &self.location.domestic),
            SurchargePolicy::RemoteList => ("pricing.location.remote", &self.location.remote),
        };
        if list.iter().all(|entry| entry.trim().is_empty()) {
            return Err(CalcError::ConfigValidationError {
                field: field.to_string(),
                message: "the active surcharge policy needs at least one location".to_string(),
            });
        }

        Ok(())
    }
}
