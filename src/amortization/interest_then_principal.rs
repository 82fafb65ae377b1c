use crate::amortization::{AllocationStrategy, ScheduleAccumulator};
use crate::decimal::{Money, RoundingMode};
use crate::errors::Result;
use crate::interest::accrued_interest;
use crate::schedule::{NormalizedPlan, PeriodRecord, PeriodWindow};

/// Interest only each period, the whole principal in the last one.
pub struct InterestThenPrincipal;

impl AllocationStrategy for InterestThenPrincipal {
    fn allocate(
        &self,
        windows: &[PeriodWindow],
        plan: &NormalizedPlan,
    ) -> Result<Vec<PeriodRecord>> {
        let schedule = windows.iter().try_fold(
            ScheduleAccumulator::new(plan.principal, windows.len()),
            |acc, window| {
                // the balance never declines before the final period
                let interest = accrued_interest(
                    plan.principal,
                    plan.daily_rate,
                    window.days_in_period(),
                    RoundingMode::HalfUp,
                )?;
                let principal = if plan.is_final(window) {
                    acc.outstanding()
                } else {
                    Money::ZERO
                };
                acc.apply(window, principal, interest)
            },
        )?;

        Ok(schedule.into_records())
    }
}
