use chrono::{Datelike, NaiveDate};
use log::{debug, warn};

use crate::calendar::{add_days, add_months_pinned, iso_weekday};
use crate::config::{FORTNIGHTS_PER_YEAR, FORTNIGHT_DAYS, MIN_FIRST_PERIOD_DAYS, MONTHS_PER_YEAR};
use crate::decimal::{Money, Rate};
use crate::errors::{Result, ScheduleError};
use crate::schedule::dates::{scheduled_due_date, PeriodWindow};
use crate::terms::LoanTerms;
use crate::types::{RepaymentCycle, RepaymentMethod};

/// Loan terms resolved into everything the date calculator and the
/// allocation strategies need: concrete dates, rates and the period count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedPlan {
    pub method: RepaymentMethod,
    pub cycle: RepaymentCycle,
    pub principal: Money,
    pub annual_rate: Rate,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub first_due_date: NaiveDate,
    pub due_day: u32,
    pub daily_rate: Rate,
    /// rate per repayment cycle; None for single period plans
    pub period_rate: Option<Rate>,
    pub total_period_count: u32,
}

impl NormalizedPlan {
    /// resolve terms for a periodic (fortnightly or monthly) schedule
    pub fn from_terms(terms: &LoanTerms) -> Result<Self> {
        let period_rate = period_rate(terms.annual_rate, terms.cycle)?;
        let daily_rate = terms.annual_rate.daily_rate(terms.year_basis());
        let first_due_date = first_due_date(terms)?;

        let (total_period_count, end_date) = match terms.period_count {
            Some(count) => {
                let total = terms.period_count_unit.to_periods(count).ok_or_else(|| {
                    ScheduleError::invalid_terms(
                        "periodNum",
                        format!("{count} periods is out of range"),
                    )
                })?;
                let last_index = total
                    .checked_sub(1)
                    .ok_or_else(|| ScheduleError::invalid_terms("periodNum", "must be positive"))?;
                let end_date =
                    scheduled_due_date(terms.cycle, first_due_date, last_index, terms.due_day)?;

                if let Some(given) = terms.end_date.filter(|given| *given != end_date) {
                    warn!("end date {given} replaced by {end_date} derived from {total} periods");
                }
                (total, end_date)
            }
            None => {
                let end_date = terms.end_date.ok_or_else(|| {
                    ScheduleError::invalid_terms(
                        "loanEndDate",
                        "required when period count is absent",
                    )
                })?;
                let total = count_due_dates(terms.cycle, first_due_date, end_date, terms.due_day)?;
                (total, end_date)
            }
        };

        if end_date <= terms.start_date {
            return Err(ScheduleError::invalid_terms(
                "loanEndDate",
                format!(
                    "resolved end date {end_date} is not after start date {}",
                    terms.start_date
                ),
            ));
        }

        debug!(
            "normalized {} {} plan: {} -> {}, first due {}, {} periods",
            terms.cycle,
            terms.method,
            terms.start_date,
            end_date,
            first_due_date,
            total_period_count
        );

        Ok(Self {
            method: terms.method,
            cycle: terms.cycle,
            principal: terms.principal,
            annual_rate: terms.annual_rate,
            start_date: terms.start_date,
            end_date,
            first_due_date,
            due_day: terms.due_day,
            daily_rate,
            period_rate: Some(period_rate),
            total_period_count,
        })
    }

    /// one period running from start to end date, whatever the cycle
    pub fn single_period(terms: &LoanTerms) -> Result<Self> {
        let end_date = terms.end_date.ok_or_else(|| {
            ScheduleError::invalid_terms("loanEndDate", "required for a single period plan")
        })?;

        Ok(Self {
            method: terms.method,
            cycle: terms.cycle,
            principal: terms.principal,
            annual_rate: terms.annual_rate,
            start_date: terms.start_date,
            end_date,
            first_due_date: end_date,
            due_day: terms.due_day,
            daily_rate: terms.annual_rate.daily_rate(terms.year_basis()),
            period_rate: None,
            total_period_count: 1,
        })
    }

    /// whether the window is the one that closes the schedule
    pub fn is_final(&self, window: &PeriodWindow) -> bool {
        window.index + 1 == self.total_period_count
    }
}

fn period_rate(annual_rate: Rate, cycle: RepaymentCycle) -> Result<Rate> {
    match cycle {
        RepaymentCycle::Fortnightly => Ok(annual_rate.periodic_rate(FORTNIGHTS_PER_YEAR)),
        RepaymentCycle::Monthly => Ok(annual_rate.periodic_rate(MONTHS_PER_YEAR)),
        other => Err(ScheduleError::UnsupportedCycle { cycle: other }),
    }
}

fn first_due_date(terms: &LoanTerms) -> Result<NaiveDate> {
    let start = terms.start_date;

    let inferred = match terms.cycle {
        RepaymentCycle::Fortnightly => {
            // due_day is an ISO weekday here
            let weekday = iso_weekday(add_days(start, FORTNIGHT_DAYS)?);
            if terms.due_day != weekday {
                add_days(start, FORTNIGHT_DAYS + terms.due_day as i64 - weekday as i64)?
            } else {
                add_days(start, FORTNIGHT_DAYS / 2)?
            }
        }
        RepaymentCycle::Monthly => {
            let months = if terms.due_day > start.day() { 0 } else { 1 };
            let candidate = add_months_pinned(start, months, terms.due_day)?;
            if (candidate - start).num_days() < MIN_FIRST_PERIOD_DAYS {
                add_months_pinned(candidate, 1, terms.due_day)?
            } else {
                candidate
            }
        }
        other => return Err(ScheduleError::UnsupportedCycle { cycle: other }),
    };

    match terms.end_date {
        Some(end_date) if inferred > end_date => {
            warn!("first due date {inferred} falls after end date {end_date}, using end date");
            Ok(end_date)
        }
        _ => Ok(inferred),
    }
}

/// number of due dates from `first_due` up to the first one on or after `end`
fn count_due_dates(
    cycle: RepaymentCycle,
    first_due: NaiveDate,
    end: NaiveDate,
    due_day: u32,
) -> Result<u32> {
    let mut count: u32 = 1;
    while scheduled_due_date(cycle, first_due, count - 1, due_day)? < end {
        count += 1;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PeriodCountUnit;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn monthly_terms(start: NaiveDate, due_day: u32) -> LoanTerms {
        LoanTerms {
            principal: Money::from_major(120_000),
            annual_rate: Rate::from_percentage(dec!(6)),
            start_date: start,
            end_date: None,
            cycle: RepaymentCycle::Monthly,
            period_count: Some(3),
            period_count_unit: PeriodCountUnit::Months,
            due_day,
            days_per_year: 360,
            method: RepaymentMethod::EqualPrincipal,
        }
    }

    fn fortnightly_terms(start: NaiveDate, weekday: u32) -> LoanTerms {
        LoanTerms {
            cycle: RepaymentCycle::Fortnightly,
            due_day: weekday,
            ..monthly_terms(start, 1)
        }
    }

    #[test]
    fn test_monthly_plan_from_period_count() {
        let plan = NormalizedPlan::from_terms(&monthly_terms(date(2022, 1, 1), 1)).unwrap();

        assert_eq!(plan.first_due_date, date(2022, 2, 1));
        assert_eq!(plan.end_date, date(2022, 4, 1));
        assert_eq!(plan.total_period_count, 3);
        assert_eq!(plan.period_rate, Some(Rate::from_decimal(dec!(0.005))));
        assert_eq!(plan.daily_rate, Rate::from_percentage(dec!(6)).daily_rate(360));
    }

    #[test]
    fn test_period_count_in_years() {
        let mut terms = monthly_terms(date(2022, 1, 1), 1);
        terms.period_count = Some(2);
        terms.period_count_unit = PeriodCountUnit::Years;

        let plan = NormalizedPlan::from_terms(&terms).unwrap();
        assert_eq!(plan.total_period_count, 24);
        assert_eq!(plan.end_date, date(2024, 1, 1));
    }

    #[test]
    fn test_period_count_overrides_end_date() {
        let mut terms = monthly_terms(date(2022, 1, 1), 1);
        terms.end_date = Some(date(2022, 12, 31));

        let plan = NormalizedPlan::from_terms(&terms).unwrap();
        assert_eq!(plan.end_date, date(2022, 4, 1));
        assert_eq!(plan.total_period_count, 3);
    }

    #[test]
    fn test_period_count_derived_from_end_date() {
        let mut terms = monthly_terms(date(2022, 1, 1), 1);
        terms.period_count = None;

        terms.end_date = Some(date(2022, 4, 1));
        assert_eq!(NormalizedPlan::from_terms(&terms).unwrap().total_period_count, 3);

        // a stub after the last regular due date is one more period
        terms.end_date = Some(date(2022, 4, 15));
        let plan = NormalizedPlan::from_terms(&terms).unwrap();
        assert_eq!(plan.total_period_count, 4);
        assert_eq!(plan.end_date, date(2022, 4, 15));
    }

    #[test]
    fn test_short_first_month_is_skipped() {
        let plan = NormalizedPlan::from_terms(&monthly_terms(date(2022, 1, 15), 1)).unwrap();
        assert_eq!(plan.first_due_date, date(2022, 3, 1));

        let plan = NormalizedPlan::from_terms(&monthly_terms(date(2022, 1, 15), 20)).unwrap();
        assert_eq!(plan.first_due_date, date(2022, 2, 20));
    }

    #[test]
    fn test_due_day_later_in_start_month() {
        let plan = NormalizedPlan::from_terms(&monthly_terms(date(2022, 1, 5), 31)).unwrap();
        assert_eq!(plan.first_due_date, date(2022, 1, 31));
        assert_eq!(plan.end_date, date(2022, 3, 31));
    }

    #[test]
    fn test_first_due_date_pinned_to_month_end() {
        // feb 30 does not exist, feb 28 is only 18 days out, so march 30
        let plan = NormalizedPlan::from_terms(&monthly_terms(date(2022, 2, 10), 30)).unwrap();
        assert_eq!(plan.first_due_date, date(2022, 3, 30));

        let plan = NormalizedPlan::from_terms(&monthly_terms(date(2022, 1, 31), 31)).unwrap();
        assert_eq!(plan.first_due_date, date(2022, 2, 28));
        assert_eq!(plan.end_date, date(2022, 4, 30));
    }

    #[test]
    fn test_first_due_date_clamped_to_end_date() {
        let mut terms = monthly_terms(date(2022, 1, 1), 1);
        terms.period_count = None;
        terms.end_date = Some(date(2022, 1, 20));

        let plan = NormalizedPlan::from_terms(&terms).unwrap();
        assert_eq!(plan.first_due_date, date(2022, 1, 20));
        assert_eq!(plan.total_period_count, 1);
    }

    #[test]
    fn test_fortnightly_first_due_date() {
        // 2024-01-01 is a monday, two weeks later is a monday too
        let plan = NormalizedPlan::from_terms(&fortnightly_terms(date(2024, 1, 1), 5)).unwrap();
        assert_eq!(plan.first_due_date, date(2024, 1, 19));
        assert_eq!(plan.end_date, date(2024, 2, 16));

        let plan = NormalizedPlan::from_terms(&fortnightly_terms(date(2024, 1, 1), 1)).unwrap();
        assert_eq!(plan.first_due_date, date(2024, 1, 8));

        // friday start, wednesday due day: back up two days from the friday two weeks out
        let plan = NormalizedPlan::from_terms(&fortnightly_terms(date(2024, 1, 5), 3)).unwrap();
        assert_eq!(plan.first_due_date, date(2024, 1, 17));
    }

    #[test]
    fn test_fortnightly_rates_and_count() {
        let mut terms = fortnightly_terms(date(2024, 1, 1), 5);
        terms.annual_rate = Rate::from_percentage(dec!(13));
        terms.period_count = None;
        terms.end_date = Some(date(2024, 2, 16));

        let plan = NormalizedPlan::from_terms(&terms).unwrap();
        assert_eq!(plan.period_rate, Some(Rate::from_decimal(dec!(0.005))));
        assert_eq!(plan.total_period_count, 3);
    }

    #[test]
    fn test_unsupported_cycles() {
        for cycle in [RepaymentCycle::Daily, RepaymentCycle::Quarterly, RepaymentCycle::Yearly] {
            let terms = LoanTerms {
                cycle,
                ..monthly_terms(date(2022, 1, 1), 1)
            };
            assert_eq!(
                NormalizedPlan::from_terms(&terms),
                Err(ScheduleError::UnsupportedCycle { cycle })
            );
        }
    }

    #[test]
    fn test_single_period_plan() {
        let terms = LoanTerms {
            method: RepaymentMethod::InterestWithPrincipal,
            cycle: RepaymentCycle::Yearly,
            period_count: None,
            end_date: Some(date(2022, 2, 1)),
            ..monthly_terms(date(2022, 1, 1), 1)
        };

        let plan = NormalizedPlan::single_period(&terms).unwrap();
        assert_eq!(plan.total_period_count, 1);
        assert_eq!(plan.first_due_date, date(2022, 2, 1));
        assert_eq!(plan.period_rate, None);
    }
}
