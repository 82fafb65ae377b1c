use rust_decimal::Decimal;

use crate::amortization::{AllocationStrategy, ScheduleAccumulator};
use crate::decimal::{Money, Rate, RoundingMode};
use crate::errors::{Result, ScheduleError};
use crate::interest::accrued_interest;
use crate::schedule::{NormalizedPlan, PeriodRecord, PeriodWindow};

/// Level payment every period (annuity). Interest accrues on the
/// outstanding balance by actual days; principal is whatever is left of
/// the installment, and the final period clears the balance.
pub struct EqualInstallment;

impl AllocationStrategy for EqualInstallment {
    fn allocate(
        &self,
        windows: &[PeriodWindow],
        plan: &NormalizedPlan,
    ) -> Result<Vec<PeriodRecord>> {
        let period_rate = plan.period_rate.ok_or_else(|| {
            ScheduleError::invalid_terms("loanCycleCode", "equal installment needs a periodic rate")
        })?;
        let installment = annuity_payment(plan.principal, period_rate, plan.total_period_count)?;

        let schedule = windows.iter().try_fold(
            ScheduleAccumulator::new(plan.principal, windows.len()),
            |acc, window| {
                let outstanding = acc.outstanding();
                let interest = accrued_interest(
                    outstanding,
                    plan.daily_rate,
                    window.days_in_period(),
                    RoundingMode::HalfEven,
                )?;
                let principal = if plan.is_final(window) {
                    outstanding
                } else {
                    installment
                        .checked_sub(interest)
                        .ok_or_else(|| {
                            ScheduleError::overflow(format!(
                                "installment {installment} less interest {interest} is out of range"
                            ))
                        })?
                        .round(RoundingMode::HalfUp)
                };
                acc.apply(window, principal, interest)
            },
        )?;

        Ok(schedule.into_records())
    }
}

/// Level payment per period: P * r * (1 + r)^n / ((1 + r)^n - 1), rounded half-up.
pub fn annuity_payment(principal: Money, period_rate: Rate, periods: u32) -> Result<Money> {
    if periods == 0 {
        return Err(ScheduleError::invalid_terms("periodNum", "must be positive"));
    }

    let r = period_rate.as_decimal();
    if r.is_zero() {
        return Ok(Money::rounded(principal / Decimal::from(periods), RoundingMode::HalfUp));
    }

    let overflow = || ScheduleError::Arithmetic {
        message: format!("annuity factor (1 + {r})^{periods} is out of range"),
    };

    let base = Decimal::ONE + r;
    let mut compound = Decimal::ONE;
    for _ in 0..periods {
        compound = compound.checked_mul(base).ok_or_else(overflow)?;
    }

    let numerator = principal
        .checked_mul(r)
        .and_then(|scaled| scaled.checked_mul(compound))
        .ok_or_else(overflow)?;
    let payment = numerator
        .checked_div(compound - Decimal::ONE)
        .ok_or_else(overflow)?;

    Ok(Money::rounded(payment, RoundingMode::HalfUp))
}
