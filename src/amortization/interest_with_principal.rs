use crate::amortization::{AllocationStrategy, ScheduleAccumulator};
use crate::decimal::RoundingMode;
use crate::errors::{Result, ScheduleError};
use crate::interest::accrued_interest;
use crate::schedule::{NormalizedPlan, PeriodRecord, PeriodWindow};

/// Principal and all interest repaid together on the end date.
pub struct InterestWithPrincipal;

impl InterestWithPrincipal {
    /// the one window of the loan, accruing from the start date up to the
    /// day before the end date
    pub fn window(plan: &NormalizedPlan) -> Result<PeriodWindow> {
        PeriodWindow::new(0, plan.start_date, plan.end_date)
    }
}

impl AllocationStrategy for InterestWithPrincipal {
    fn allocate(
        &self,
        windows: &[PeriodWindow],
        plan: &NormalizedPlan,
    ) -> Result<Vec<PeriodRecord>> {
        let [window] = windows else {
            return Err(ScheduleError::invalid_terms(
                "periodNum",
                format!("interest with principal is a single period, got {}", windows.len()),
            ));
        };

        let interest = accrued_interest(
            plan.principal,
            plan.daily_rate,
            window.days_in_period(),
            RoundingMode::HalfUp,
        )?;

        let acc = ScheduleAccumulator::new(plan.principal, 1);
        let principal = acc.outstanding();
        Ok(acc.apply(window, principal, interest)?.into_records())
    }
}
