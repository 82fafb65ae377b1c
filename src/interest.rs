use rust_decimal::Decimal;

use crate::decimal::{Money, Rate, RoundingMode};
use crate::errors::{Result, ScheduleError};

/// simple (non-compounding) interest on `base` for `days` days, unrounded
pub fn simple_interest(base: Money, daily_rate: Rate, days: u32) -> Result<Decimal> {
    daily_rate
        .as_decimal()
        .checked_mul(Decimal::from(days))
        .and_then(|factor| base.checked_mul(factor))
        .ok_or_else(|| {
            ScheduleError::overflow(format!(
                "interest on {base} for {days} days at {daily_rate} a day is out of range"
            ))
        })
}

/// simple interest fixed to cents
pub fn accrued_interest(
    base: Money,
    daily_rate: Rate,
    days: u32,
    mode: RoundingMode,
) -> Result<Money> {
    Ok(Money::rounded(simple_interest(base, daily_rate, days)?, mode))
}
