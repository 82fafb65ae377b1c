use rust_decimal::Decimal;

use crate::amortization::{AllocationStrategy, ScheduleAccumulator};
use crate::decimal::{Money, RoundingMode};
use crate::errors::Result;
use crate::interest::accrued_interest;
use crate::schedule::{NormalizedPlan, PeriodRecord, PeriodWindow};

/// Same principal share each period, interest on the declining balance.
pub struct EqualPrincipal;

impl AllocationStrategy for EqualPrincipal {
    fn allocate(
        &self,
        windows: &[PeriodWindow],
        plan: &NormalizedPlan,
    ) -> Result<Vec<PeriodRecord>> {
        let share = Money::rounded(
            plan.principal / Decimal::from(plan.total_period_count),
            RoundingMode::HalfEven,
        );

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
                let principal = if plan.is_final(window) { outstanding } else { share };
                acc.apply(window, principal, interest)
            },
        )?;

        Ok(schedule.into_records())
    }
}
