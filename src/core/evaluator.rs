use crate::core::location::normalize_location;
use crate::core::prime::is_prime;
use crate::core::schedule::FeeSchedule;
use crate::domain::model::{CartTier, FeeBreakdown, PricingRequest, PricingResult};
use crate::utils::error::Result;
use crate::utils::validation::Validate;

/// Applies a [`FeeSchedule`] to pricing requests. Pure: no I/O, no state.
#[derive(Debug, Clone, Default)]
pub struct DeliveryFeeEvaluator {
    schedule: FeeSchedule,
}

impl DeliveryFeeEvaluator {
    pub fn new(schedule: FeeSchedule) -> Self {
        Self {
            schedule: FeeSchedule {
                location: schedule.location.normalized(),
                ..schedule
            },
        }
    }

    pub fn schedule(&self) -> &FeeSchedule {
        &self.schedule
    }

    pub fn tier_for(&self, cart_value: f64) -> CartTier {
        let s = &self.schedule;
        if cart_value > s.free_threshold {
            CartTier::Free
        } else if cart_value >= s.standard_min && cart_value <= s.standard_max {
            CartTier::Standard
        } else if cart_value < s.standard_min {
            CartTier::Small
        } else {
            CartTier::Mid
        }
    }

    fn tier_charge(&self, tier: CartTier) -> f64 {
        match tier {
            CartTier::Free => 0.0,
            CartTier::Standard => self.schedule.standard_fee,
            CartTier::Small => self.schedule.small_cart_fee,
            CartTier::Mid => self.schedule.mid_tier_fee,
        }
    }

    pub fn evaluate(&self, request: &PricingRequest) -> Result<PricingResult> {
        request.validate()?;

        let tier = self.tier_for(request.cart_value);
        let tier_charge = self.tier_charge(tier);

        // validate() guarantees customer_id >= 0
        let prime_override = is_prime(request.customer_id as u64);
        let base_charge = if prime_override { 0.0 } else { tier_charge };

        let location = normalize_location(&request.location);
        let surcharge = if self.schedule.location.is_surcharged(&location) {
            self.schedule.surcharge
        } else {
            0.0
        };

        tracing::debug!(
            customer_id = request.customer_id,
            cart_value = request.cart_value,
            %tier,
            prime_override,
            surcharge,
            "evaluated delivery fee"
        );

        Ok(PricingResult {
            fee: base_charge + surcharge,
            breakdown: FeeBreakdown {
                tier,
                tier_charge,
                prime_override,
                base_charge,
                surcharge,
            },
        })
    }

    /// Shorthand for `evaluate` that returns only the fee.
    pub fn fee(&self, customer_id: i64, cart_value: f64, location: &str) -> Result<f64> {
        self.evaluate(&PricingRequest::new(customer_id, cart_value, location))
            .map(|result| result.fee)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schedule::{LocationRules, SurchargePolicy};
    use crate::utils::error::CalcError;

    fn evaluator() -> DeliveryFeeEvaluator {
        DeliveryFeeEvaluator::default()
    }

    #[test]
    fn test_tier_boundaries() {
        let e = evaluator();
        assert_eq!(e.tier_for(0.0), CartTier::Small);
        assert_eq!(e.tier_for(499.99), CartTier::Small);
        assert_eq!(e.tier_for(500.0), CartTier::Standard);
        assert_eq!(e.tier_for(1000.0), CartTier::Standard);
        assert_eq!(e.tier_for(1000.01), CartTier::Mid);
        assert_eq!(e.tier_for(2000.0), CartTier::Mid);
        assert_eq!(e.tier_for(2000.01), CartTier::Free);
    }

    #[test]
    fn test_documented_examples() {
        let e = evaluator();
        assert_eq!(e.fee(4, 750.0, "India").unwrap(), 40.0);
        assert_eq!(e.fee(9, 300.0, "Remote").unwrap(), 110.0);
        assert_eq!(e.fee(4, 1500.0, "India").unwrap(), 20.0);
        assert_eq!(e.fee(7, 2500.0, "Outside India").unwrap(), 50.0);
    }

    #[test]
    fn test_prime_override_keeps_surcharge() {
        let result = evaluator()
            .evaluate(&PricingRequest::new(13, 100.0, "remote"))
            .unwrap();
        assert!(result.breakdown.prime_override);
        assert_eq!(result.breakdown.tier_charge, 60.0);
        assert_eq!(result.breakdown.base_charge, 0.0);
        assert_eq!(result.fee, 50.0);
    }

    #[test]
    fn test_zero_and_one_are_not_prime_customers() {
        let e = evaluator();
        assert_eq!(e.fee(0, 100.0, "india").unwrap(), 60.0);
        assert_eq!(e.fee(1, 100.0, "india").unwrap(), 60.0);
    }

    #[test]
    fn test_location_normalization() {
        let e = evaluator();
        assert_eq!(
            e.fee(4, 750.0, "  INDIA  ").unwrap(),
            e.fee(4, 750.0, "india").unwrap()
        );
    }

    #[test]
    fn test_remote_list_policy() {
        let schedule = FeeSchedule {
            location: LocationRules {
                policy: SurchargePolicy::RemoteList,
                ..LocationRules::default()
            },
            ..FeeSchedule::default()
        };
        let e = DeliveryFeeEvaluator::new(schedule);
        assert_eq!(e.fee(4, 750.0, "Germany").unwrap(), 40.0);
        assert_eq!(e.fee(4, 750.0, " remote ").unwrap(), 90.0);
    }

    #[test]
    fn test_configurable_mid_tier() {
        let e = DeliveryFeeEvaluator::new(FeeSchedule {
            mid_tier_fee: 0.0,
            ..FeeSchedule::default()
        });
        assert_eq!(e.fee(4, 1500.0, "India").unwrap(), 0.0);
    }

    #[test]
    fn test_schedule_lists_are_normalized_on_construction() {
        let mut schedule = FeeSchedule::default();
        schedule.location.domestic = vec!["  India".to_string()];
        let e = DeliveryFeeEvaluator::new(schedule);
        assert_eq!(e.fee(4, 750.0, "india").unwrap(), 40.0);
    }

    #[test]
    fn test_invalid_input_rejected() {
        let e = evaluator();
        assert!(matches!(
            e.fee(-1, 750.0, "India"),
            Err(CalcError::InvalidInput { .. })
        ));
        assert!(matches!(
            e.fee(4, -750.0, "India"),
            Err(CalcError::InvalidInput { .. })
        ));
        assert!(matches!(
            e.fee(4, f64::NAN, "India"),
            Err(CalcError::InvalidInput { .. })
        ));
    }
}
