pub mod dates;
pub mod normalize;

use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::amortization::{AmortizationCalculator, InterestWithPrincipal};
use crate::decimal::{Money, Rate};
use crate::errors::{Result, ScheduleError};
use crate::terms::LoanTerms;
use crate::types::RepaymentMethod;
use crate::validation::validate_terms;

pub use dates::{PeriodDateCalculator, PeriodWindow};
pub use normalize::NormalizedPlan;

/// one period of a repayment schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRecord {
    /// zero-based
    pub index: u32,
    pub accrual_start: NaiveDate,
    pub accrual_end: NaiveDate,
    pub due_date: NaiveDate,
    pub days_in_period: u32,
    pub principal_due: Money,
    pub interest_due: Money,
    pub total_due: Money,
    /// outstanding principal once this period is paid
    pub remaining_principal: Money,
}

impl PeriodRecord {
    pub fn period_number(&self) -> u32 {
        self.index + 1
    }
}

/// complete repayment schedule with its totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub method: RepaymentMethod,
    pub total_period_count: u32,
    pub principal: Money,
    pub annual_rate: Rate,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_interest: Money,
    pub total_repay_amount: Money,
    pub records: Vec<PeriodRecord>,
}

impl ScheduleSummary {
    /// Sum per-period amounts into schedule totals. Amounts are already at
    /// cents so nothing is rounded again here.
    pub fn aggregate(plan: &NormalizedPlan, records: Vec<PeriodRecord>) -> Result<Self> {
        let total_interest = checked_total(&records, "interest", |r| r.interest_due)?;
        let total_repay_amount = checked_total(&records, "repay amount", |r| r.total_due)?;

        Ok(Self {
            method: plan.method,
            total_period_count: records.len() as u32,
            principal: plan.principal,
            annual_rate: plan.annual_rate,
            start_date: plan.start_date,
            end_date: plan.end_date,
            total_interest,
            total_repay_amount,
            records,
        })
    }

    /// record by 1-based period number
    pub fn record(&self, period_number: u32) -> Option<&PeriodRecord> {
        let index = period_number.checked_sub(1)?;
        self.records.get(index as usize)
    }

    /// outstanding principal after a period; the full principal before the first
    pub fn balance_after(&self, period_number: u32) -> Money {
        self.record(period_number)
            .map(|r| r.remaining_principal)
            .unwrap_or(self.principal)
    }

    pub fn total_principal(&self) -> Money {
        self.records.iter().map(|r| r.principal_due).sum()
    }
}

fn checked_total(
    records: &[PeriodRecord],
    what: &str,
    amount: impl Fn(&PeriodRecord) -> Money,
) -> Result<Money> {
    records.iter().try_fold(Money::ZERO, |total, record| {
        total
            .checked_add(amount(record))
            .ok_or_else(|| ScheduleError::overflow(format!("total {what} is out of range")))
    })
}

/// Compute the full repayment schedule for a set of loan terms.
pub fn compute_repayment_plan(terms: &LoanTerms) -> Result<ScheduleSummary> {
    validate_terms(terms)?;

    let (plan, windows) = if terms.method.is_periodic() {
        let plan = NormalizedPlan::from_terms(terms)?;
        let windows = PeriodDateCalculator::new(&plan).windows()?;
        (plan, windows)
    } else {
        let plan = NormalizedPlan::single_period(terms)?;
        let window = InterestWithPrincipal::window(&plan)?;
        (plan, vec![window])
    };

    let records = AmortizationCalculator::new(plan.method).allocate(&windows, &plan)?;
    let summary = ScheduleSummary::aggregate(&plan, records)?;

    debug!(
        "{} schedule: {} periods, total interest {}, total repay {}",
        summary.method,
        summary.total_period_count,
        summary.total_interest,
        summary.total_repay_amount
    );

    Ok(summary)
}
