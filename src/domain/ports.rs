use crate::utils::error::Result;
use async_trait::async_trait;

/// Anything that can tell where the customer is, as a country or region name.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn locate(&self) -> Result<String>;
}

#[async_trait]
pub trait LeapYearSource: Send + Sync {
    /// Short label used in logs and console output.
    fn name(&self) -> &str;

    async fn is_leap_year(&self, year: i32) -> Result<bool>;

    /// Leap years in `start..=end`, ascending.
    async fn leap_years_between(&self, start: i32, end: i32) -> Result<Vec<i32>>;
}
