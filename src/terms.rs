use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_DAYS_PER_YEAR;
use crate::decimal::{Money, Rate};
use crate::errors::{Result, ScheduleError};
use crate::types::{PeriodCountUnit, RepaymentCycle, RepaymentMethod};
use crate::validation::validate_terms;

/// loan terms a schedule is computed from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    /// annual nominal rate
    pub annual_rate: Rate,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub cycle: RepaymentCycle,
    /// number of periods in `period_count_unit`; takes precedence over `end_date`
    pub period_count: Option<u32>,
    pub period_count_unit: PeriodCountUnit,
    /// day of month for monthly cycles, ISO weekday for fortnightly ones
    pub due_day: u32,
    pub days_per_year: u32,
    pub method: RepaymentMethod,
}

impl LoanTerms {
    pub fn builder() -> LoanTermsBuilder {
        LoanTermsBuilder::new()
    }

    /// days per year with the zero-means-default rule applied
    pub fn year_basis(&self) -> u32 {
        if self.days_per_year == 0 {
            DEFAULT_DAYS_PER_YEAR
        } else {
            self.days_per_year
        }
    }
}

/// builder for loan terms
#[derive(Debug, Clone, Default)]
pub struct LoanTermsBuilder {
    principal: Option<Money>,
    annual_rate: Option<Rate>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    cycle: Option<RepaymentCycle>,
    period_count: Option<u32>,
    period_count_unit: Option<PeriodCountUnit>,
    due_day: Option<u32>,
    days_per_year: Option<u32>,
    method: Option<RepaymentMethod>,
}

impl LoanTermsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn principal(mut self, principal: Money) -> Self {
        self.principal = Some(principal);
        self
    }

    pub fn annual_rate(mut self, rate: Rate) -> Self {
        self.annual_rate = Some(rate);
        self
    }

    /// annual rate given in percent (12 for 12%)
    pub fn annual_rate_percent(self, percent: Decimal) -> Self {
        self.annual_rate(Rate::from_percentage(percent))
    }

    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn end_date(mut self, date: NaiveDate) -> Self {
        self.end_date = Some(date);
        self
    }

    pub fn cycle(mut self, cycle: RepaymentCycle) -> Self {
        self.cycle = Some(cycle);
        self
    }

    pub fn period_count(mut self, count: u32) -> Self {
        self.period_count = Some(count);
        self
    }

    pub fn period_count_unit(mut self, unit: PeriodCountUnit) -> Self {
        self.period_count_unit = Some(unit);
        self
    }

    pub fn due_day(mut self, day: u32) -> Self {
        self.due_day = Some(day);
        self
    }

    pub fn days_per_year(mut self, days: u32) -> Self {
        self.days_per_year = Some(days);
        self
    }

    pub fn method(mut self, method: RepaymentMethod) -> Self {
        self.method = Some(method);
        self
    }

    /// build and validate
    pub fn build(self) -> Result<LoanTerms> {
        let principal = self
            .principal
            .ok_or_else(|| ScheduleError::invalid_terms("loanAmount", "principal required"))?;

        let annual_rate = self
            .annual_rate
            .ok_or_else(|| ScheduleError::invalid_terms("interestRate", "interest rate required"))?;

        let start_date = self
            .start_date
            .ok_or_else(|| ScheduleError::invalid_terms("loanStartDate", "start date required"))?;

        let cycle = self.cycle.ok_or_else(|| {
            ScheduleError::invalid_terms("loanCycleCode", "repayment cycle required")
        })?;

        let due_day = self
            .due_day
            .ok_or_else(|| ScheduleError::invalid_terms("repayDay", "due day required"))?;

        let method = self.method.ok_or_else(|| {
            ScheduleError::invalid_terms("repayMethod", "repayment method required")
        })?;

        let terms = LoanTerms {
            principal,
            annual_rate,
            start_date,
            end_date: self.end_date,
            cycle,
            period_count: self.period_count,
            period_count_unit: self.period_count_unit.unwrap_or_default(),
            due_day,
            days_per_year: self.days_per_year.unwrap_or(DEFAULT_DAYS_PER_YEAR),
            method,
        };

        validate_terms(&terms)?;
        Ok(terms)
    }
}
