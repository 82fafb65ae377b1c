use rust_decimal::Decimal;

use crate::amortization::{AllocationStrategy, ScheduleAccumulator};
use crate::calendar::inclusive_days;
use crate::decimal::{Money, RoundingMode};
use crate::errors::{Result, ScheduleError};
use crate::interest::simple_interest;
use crate::schedule::{NormalizedPlan, PeriodRecord, PeriodWindow};

/// Interest for the whole term is computed once on the full principal
/// and spread evenly; principal is spread evenly too.
pub struct EqualPeriodPayment;

impl AllocationStrategy for EqualPeriodPayment {
    fn allocate(
        &self,
        windows: &[PeriodWindow],
        plan: &NormalizedPlan,
    ) -> Result<Vec<PeriodRecord>> {
        let periods = Decimal::from(plan.total_period_count);

        // start and end date both count
        let span_days =
            u32::try_from(inclusive_days(plan.start_date, plan.end_date)).map_err(|_| {
                ScheduleError::invalid_terms(
                    "loanEndDate",
                    format!("term {} -> {} is out of range", plan.start_date, plan.end_date),
                )
            })?;

        let share = Money::rounded(plan.principal / periods, RoundingMode::HalfUp);
        let interest = Money::rounded(
            simple_interest(plan.principal, plan.daily_rate, span_days)? / periods,
            RoundingMode::HalfUp,
        );

        let schedule = windows.iter().try_fold(
            ScheduleAccumulator::new(plan.principal, windows.len()),
            |acc, window| {
                let principal = if plan.is_final(window) {
                    acc.outstanding()
                } else {
                    share
                };
                acc.apply(window, principal, interest)
            },
        )?;

        Ok(schedule.into_records())
    }
}
