use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{add_days, add_months_pinned, inclusive_days};
use crate::config::FORTNIGHT_DAYS;
use crate::errors::{Result, ScheduleError};
use crate::schedule::normalize::NormalizedPlan;
use crate::types::RepaymentCycle;

/// Accrual window and due date of one period.
///
/// Interest accrues over `accrual_start..=accrual_end`; the due date is the
/// day after `accrual_end` and the next window starts on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodWindow {
    /// zero-based
    pub index: u32,
    pub accrual_start: NaiveDate,
    pub accrual_end: NaiveDate,
    pub due_date: NaiveDate,
}

impl PeriodWindow {
    /// window accruing from `accrual_start` up to the day before `due_date`
    pub fn new(index: u32, accrual_start: NaiveDate, due_date: NaiveDate) -> Result<Self> {
        let accrual_end = add_days(due_date, -1)?;
        if accrual_end < accrual_start {
            return Err(ScheduleError::InvalidDate {
                message: format!(
                    "period {} has no accrual days: starts {accrual_start}, due {due_date}",
                    index + 1
                ),
            });
        }

        Ok(Self {
            index,
            accrual_start,
            accrual_end,
            due_date,
        })
    }

    pub fn days_in_period(&self) -> u32 {
        // at least one by construction
        inclusive_days(self.accrual_start, self.accrual_end) as u32
    }

    pub fn period_number(&self) -> u32 {
        self.index + 1
    }
}

/// Regular due date number `index` (zero-based) of a cycle anchored at `first_due`.
pub(crate) fn scheduled_due_date(
    cycle: RepaymentCycle,
    first_due: NaiveDate,
    index: u32,
    due_day: u32,
) -> Result<NaiveDate> {
    if index == 0 {
        return Ok(first_due);
    }

    match cycle {
        RepaymentCycle::Fortnightly => add_days(first_due, FORTNIGHT_DAYS * index as i64),
        RepaymentCycle::Monthly => add_months_pinned(first_due, index, due_day),
        other => Err(ScheduleError::UnsupportedCycle { cycle: other }),
    }
}

/// Lays out the contiguous period windows of a normalized plan.
pub struct PeriodDateCalculator<'a> {
    plan: &'a NormalizedPlan,
}

impl<'a> PeriodDateCalculator<'a> {
    pub fn new(plan: &'a NormalizedPlan) -> Self {
        Self { plan }
    }

    /// one window per period; the last one is always due on the plan end date
    pub fn windows(&self) -> Result<Vec<PeriodWindow>> {
        let plan = self.plan;
        let mut windows = Vec::with_capacity(plan.total_period_count as usize);
        let mut accrual_start = plan.start_date;

        for index in 0..plan.total_period_count {
            let due_date = if index + 1 == plan.total_period_count {
                plan.end_date
            } else {
                scheduled_due_date(plan.cycle, plan.first_due_date, index, plan.due_day)?
            };

            let window = PeriodWindow::new(index, accrual_start, due_date)?;
            accrual_start = window.due_date;
            windows.push(window);
        }

        Ok(windows)
    }
}
