//! precondition checks on loan terms, run before any scheduling work

use log::debug;
use rust_decimal::Decimal;

use crate::config::DUE_DAY_RANGE;
use crate::errors::{Result, ScheduleError};
use crate::terms::LoanTerms;
use crate::types::RepaymentMethod;

/// Reject terms the schedule calculator cannot work with.
///
/// Codes and date strings are already typed by the time terms exist, so this
/// covers ranges and the method-specific presence of `end_date` / `period_count`.
pub fn validate_terms(terms: &LoanTerms) -> Result<()> {
    if terms.annual_rate.as_decimal() <= Decimal::ZERO {
        return Err(ScheduleError::invalid_terms(
            "interestRate",
            format!("must be positive, got {}", terms.annual_rate),
        ));
    }

    if !terms.principal.is_positive() {
        return Err(ScheduleError::invalid_terms(
            "loanAmount",
            format!("must be positive, got {}", terms.principal),
        ));
    }

    if terms.period_count == Some(0) {
        return Err(ScheduleError::invalid_terms(
            "periodNum",
            "must be positive when given",
        ));
    }

    if let Some(end_date) = terms.end_date {
        if end_date <= terms.start_date {
            return Err(ScheduleError::invalid_terms(
                "loanEndDate",
                format!("{end_date} must be after start date {}", terms.start_date),
            ));
        }
    }

    if !DUE_DAY_RANGE.contains(&terms.due_day) {
        return Err(ScheduleError::invalid_terms(
            "repayDay",
            format!("must be within 1..=31, got {}", terms.due_day),
        ));
    }

    match terms.method {
        RepaymentMethod::InterestWithPrincipal => {
            if terms.end_date.is_none() {
                return Err(ScheduleError::invalid_terms(
                    "loanEndDate",
                    "required for interest with principal",
                ));
            }
        }
        _ => {
            if terms.end_date.is_none() && terms.period_count.is_none() {
                return Err(ScheduleError::invalid_terms(
                    "periodNum",
                    "either period count or end date is required",
                ));
            }
        }
    }

    debug!(
        "validated terms: method={} cycle={} principal={} rate={}",
        terms.method, terms.cycle, terms.principal, terms.annual_rate
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::{Money, Rate};
    use crate::types::{PeriodCountUnit, RepaymentCycle};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn base_terms() -> LoanTerms {
        LoanTerms {
            principal: Money::from_major(10_000),
            annual_rate: Rate::from_percentage(dec!(6)),
            start_date: date(2022, 1, 1),
            end_date: None,
            cycle: RepaymentCycle::Monthly,
            period_count: Some(12),
            period_count_unit: PeriodCountUnit::Months,
            due_day: 1,
            days_per_year: 360,
            method: RepaymentMethod::EqualPrincipal,
        }
    }

    fn field_of(result: Result<()>) -> &'static str {
        match result {
            Err(ScheduleError::InvalidTerms { field, .. }) => field,
            other => panic!("expected invalid terms, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_terms() {
        assert!(validate_terms(&base_terms()).is_ok());
    }

    #[test]
    fn test_rejects_non_positive_amounts() {
        let mut terms = base_terms();
        terms.annual_rate = Rate::ZERO;
        assert_eq!(field_of(validate_terms(&terms)), "interestRate");

        let mut terms = base_terms();
        terms.annual_rate = Rate::from_percentage(dec!(-1));
        assert_eq!(field_of(validate_terms(&terms)), "interestRate");

        let mut terms = base_terms();
        terms.principal = Money::ZERO;
        assert_eq!(field_of(validate_terms(&terms)), "loanAmount");
    }

    #[test]
    fn test_rejects_end_not_after_start() {
        let mut terms = base_terms();
        terms.end_date = Some(date(2022, 1, 1));
        assert_eq!(field_of(validate_terms(&terms)), "loanEndDate");

        terms.end_date = Some(date(2021, 12, 31));
        assert_eq!(field_of(validate_terms(&terms)), "loanEndDate");
    }

    #[test]
    fn test_due_day_range() {
        let mut terms = base_terms();
        terms.due_day = 0;
        assert_eq!(field_of(validate_terms(&terms)), "repayDay");

        terms.due_day = 31;
        assert!(validate_terms(&terms).is_ok());
    }

    #[test]
    fn test_zero_period_count() {
        let mut terms = base_terms();
        terms.period_count = Some(0);
        assert_eq!(field_of(validate_terms(&terms)), "periodNum");
    }

    #[test]
    fn test_method_specific_presence() {
        let mut terms = base_terms();
        terms.period_count = None;
        assert_eq!(field_of(validate_terms(&terms)), "periodNum");

        terms.end_date = Some(date(2022, 6, 1));
        assert!(validate_terms(&terms).is_ok());

        let mut terms = base_terms();
        terms.method = RepaymentMethod::InterestWithPrincipal;
        assert_eq!(field_of(validate_terms(&terms)), "loanEndDate");
    }
}
