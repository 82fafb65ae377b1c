pub mod equal_installment;
pub mod equal_period_payment;
pub mod equal_principal;
pub mod interest_then_principal;
pub mod interest_with_principal;

use log::{debug, trace};

use crate::decimal::Money;
use crate::errors::{Result, ScheduleError};
use crate::schedule::{NormalizedPlan, PeriodRecord, PeriodWindow};
use crate::types::RepaymentMethod;

pub use equal_installment::{annuity_payment, EqualInstallment};
pub use equal_period_payment::EqualPeriodPayment;
pub use equal_principal::EqualPrincipal;
pub use interest_then_principal::InterestThenPrincipal;
pub use interest_with_principal::InterestWithPrincipal;

/// Splits each period's repayment into principal and interest.
pub trait AllocationStrategy {
    fn allocate(
        &self,
        windows: &[PeriodWindow],
        plan: &NormalizedPlan,
    ) -> Result<Vec<PeriodRecord>>;
}

/// picks the allocation strategy for a repayment method
pub struct AmortizationCalculator {
    method: RepaymentMethod,
}

impl AmortizationCalculator {
    pub fn new(method: RepaymentMethod) -> Self {
        Self { method }
    }

    pub fn strategy(&self) -> &'static dyn AllocationStrategy {
        match self.method {
            RepaymentMethod::EqualInstallment => &EqualInstallment,
            RepaymentMethod::EqualPrincipal => &EqualPrincipal,
            RepaymentMethod::InterestWithPrincipal => &InterestWithPrincipal,
            RepaymentMethod::InterestThenPrincipal => &InterestThenPrincipal,
            RepaymentMethod::EqualPeriodPayment => &EqualPeriodPayment,
        }
    }

    pub fn allocate(
        &self,
        windows: &[PeriodWindow],
        plan: &NormalizedPlan,
    ) -> Result<Vec<PeriodRecord>> {
        if windows.is_empty() {
            return Err(ScheduleError::invalid_terms("periodNum", "schedule has no periods"));
        }

        debug!("allocating {} periods with {}", windows.len(), self.method);
        self.strategy().allocate(windows, plan)
    }
}

/// Running state threaded through a strategy's fold over the windows.
#[derive(Debug, Clone)]
pub(crate) struct ScheduleAccumulator {
    outstanding: Money,
    records: Vec<PeriodRecord>,
}

impl ScheduleAccumulator {
    pub(crate) fn new(principal: Money, periods: usize) -> Self {
        Self {
            outstanding: principal,
            records: Vec::with_capacity(periods),
        }
    }

    /// principal not yet repaid before the next period
    pub(crate) fn outstanding(&self) -> Money {
        self.outstanding
    }

    /// record one period's split and move the balance forward
    pub(crate) fn apply(
        mut self,
        window: &PeriodWindow,
        principal_due: Money,
        interest_due: Money,
    ) -> Result<Self> {
        let period = window.period_number();
        let total_due = principal_due.checked_add(interest_due).ok_or_else(|| {
            ScheduleError::overflow(format!(
                "period {period} total {principal_due} + {interest_due} is out of range"
            ))
        })?;
        let outstanding = self.outstanding;
        self.outstanding = outstanding.checked_sub(principal_due).ok_or_else(|| {
            ScheduleError::overflow(format!(
                "period {period} balance {outstanding} - {principal_due} is out of range"
            ))
        })?;

        let record = PeriodRecord {
            index: window.index,
            accrual_start: window.accrual_start,
            accrual_end: window.accrual_end,
            due_date: window.due_date,
            days_in_period: window.days_in_period(),
            principal_due,
            interest_due,
            total_due,
            remaining_principal: self.outstanding,
        };

        trace!(
            "period {} due {}: principal {} interest {} remaining {}",
            record.period_number(),
            record.due_date,
            record.principal_due,
            record.interest_due,
            record.remaining_principal
        );

        self.records.push(record);
        Ok(self)
    }

    pub(crate) fn into_records(self) -> Vec<PeriodRecord> {
        self.records
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use crate::decimal::{Money, Rate};
    use crate::schedule::{NormalizedPlan, PeriodDateCalculator, PeriodWindow};
    use crate::types::{RepaymentCycle, RepaymentMethod};

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub fn money(s: &str) -> Money {
        Money::from_str_exact(s).unwrap()
    }

    /// monthly plan due on the 1st, starting 2022-01-01
    pub fn monthly_plan(
        method: RepaymentMethod,
        principal: i64,
        percent: Decimal,
        periods: u32,
    ) -> (NormalizedPlan, Vec<PeriodWindow>) {
        let annual_rate = Rate::from_percentage(percent);
        let start = date(2022, 1, 1);
        let first_due = date(2022, 2, 1);
        let end = crate::calendar::add_months_pinned(first_due, periods - 1, 1).unwrap();

        let plan = NormalizedPlan {
            method,
            cycle: RepaymentCycle::Monthly,
            principal: Money::from_major(principal),
            annual_rate,
            start_date: start,
            end_date: end,
            first_due_date: first_due,
            due_day: 1,
            daily_rate: annual_rate.daily_rate(360),
            period_rate: Some(annual_rate.periodic_rate(12)),
            total_period_count: periods,
        };
        let windows = PeriodDateCalculator::new(&plan).windows().unwrap();
        (plan, windows)
    }
}
