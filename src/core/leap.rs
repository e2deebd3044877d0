use crate::domain::ports::LeapYearSource;
use crate::utils::error::{CalcError, Result};
use async_trait::async_trait;

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Shared by every source so a reversed range fails the same way everywhere.
pub fn check_range(start: i32, end: i32) -> Result<()> {
    if start > end {
        return Err(CalcError::invalid_input(
            "range",
            format!("{}..{}", start, end),
            "start year must not be after end year",
        ));
    }
    Ok(())
}

/// Lays years out ten per row, each left-aligned in six columns.
pub fn format_year_rows(years: &[i32]) -> String {
    years
        .chunks(10)
        .map(|row| {
            row.iter()
                .map(|y| format!("{:<6}", y))
                .collect::<Vec<_>>()
                .join(" ")
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Computes answers locally; never fails for a valid range.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalLeapYears;

#[async_trait]
impl LeapYearSource for LocalLeapYears {
    fn name(&self) -> &str {
        "local"
    }

    async fn is_leap_year(&self, year: i32) -> Result<bool> {
        Ok(is_leap_year(year))
    }

    async fn leap_years_between(&self, start: i32, end: i32) -> Result<Vec<i32>> {
        check_range(start, end)?;
        Ok((start..=end).filter(|&y| is_leap_year(y)).collect())
    }
}
