use crate::utils::error::{CalcError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Healthy,
    Overweight,
    SeverelyOverweight,
    Obese,
    VeryObese,
}

impl BmiCategory {
    /// Upper bounds are inclusive: 18.4 is still underweight.
    pub fn from_value(bmi: f64) -> Self {
        if bmi <= 18.4 {
            BmiCategory::Underweight
        } else if bmi <= 24.9 {
            BmiCategory::Healthy
        } else if bmi <= 29.9 {
            BmiCategory::Overweight
        } else if bmi <= 34.9 {
            BmiCategory::SeverelyOverweight
        } else if bmi <= 39.9 {
            BmiCategory::Obese
        } else {
            BmiCategory::VeryObese
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BmiCategory::Underweight => "underweight",
            BmiCategory::Healthy => "healthy",
            BmiCategory::Overweight => "overweight",
            BmiCategory::SeverelyOverweight => "severely overweight",
            BmiCategory::Obese => "obese",
            BmiCategory::VeryObese => "very obese",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiReading {
    pub value: f64,
    pub category: BmiCategory,
}

fn require_positive(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CalcError::invalid_input(
            field,
            value,
            "must be a positive number",
        ));
    }
    Ok(())
}

pub fn bmi(height_cm: f64, weight_kg: f64) -> Result<f64> {
    require_positive("height_cm", height_cm)?;
    require_positive("weight_kg", weight_kg)?;

    let height_m = height_cm / 100.0;
    Ok(weight_kg / (height_m * height_m))
}

pub fn reading(height_cm: f64, weight_kg: f64) -> Result<BmiReading> {
    let value = bmi(height_cm, weight_kg)?;
    Ok(BmiReading {
        value,
        category: BmiCategory::from_value(value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmi_value() {
        let value = bmi(180.0, 81.0).unwrap();
        assert!((value - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_category_boundaries() {
        assert_eq!(BmiCategory::from_value(18.4), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_value(18.5), BmiCategory::Healthy);
        assert_eq!(BmiCategory::from_value(24.9), BmiCategory::Healthy);
        assert_eq!(BmiCategory::from_value(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_value(29.9), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_value(34.9), BmiCategory::SeverelyOverweight);
        assert_eq!(BmiCategory::from_value(39.9), BmiCategory::Obese);
        assert_eq!(BmiCategory::from_value(40.0), BmiCategory::VeryObese);
    }

    #[test]
    fn test_reading() {
        let r = reading(170.0, 50.0).unwrap();
        assert_eq!(r.category, BmiCategory::Underweight);
    }

    #[test]
    fn test_rejects_non_positive_input() {
        assert!(matches!(bmi(0.0, 70.0), Err(CalcError::InvalidInput { .. })));
        assert!(matches!(bmi(170.0, -1.0), Err(CalcError::InvalidInput { .. })));
        assert!(bmi(f64::NAN, 70.0).is_err());
    }
}
