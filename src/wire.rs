//! JSON request / response shapes of the repayment plan service

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar::{format_date, parse_date};
use crate::errors::{Result, ScheduleError};
use crate::decimal::Money;
use crate::schedule::{compute_repayment_plan, PeriodRecord, ScheduleSummary};
use crate::terms::LoanTerms;
use crate::types::{PeriodCountUnit, RepaymentCycle, RepaymentMethod};

/// Repayment plan request as it arrives over the wire.
///
/// `interest_rate` is a percentage (12 means 12% a year). Empty strings and
/// zero numbers mean "not given".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepaymentRequest {
    pub loan_amount: Money,
    pub loan_start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loan_end_date: Option<String>,
    pub loan_cycle_code: String,
    pub interest_rate: Decimal,
    pub repay_method: String,
    #[serde(default)]
    pub period_num: i64,
    /// "01" years or "02" months. An absent field means months; an empty
    /// string is rejected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_type: Option<String>,
    #[serde(default)]
    pub repay_day: i64,
    #[serde(default)]
    pub days_of_year: u32,
}

impl TryFrom<&RepaymentRequest> for LoanTerms {
    type Error = ScheduleError;

    fn try_from(request: &RepaymentRequest) -> Result<Self> {
        let cycle = RepaymentCycle::from_code(&request.loan_cycle_code)?;

        let period_count = match request.period_num {
            n if n < 0 => {
                return Err(ScheduleError::invalid_terms(
                    "periodNum",
                    format!("must not be negative, got {n}"),
                ))
            }
            0 => None,
            n => Some(u32::try_from(n).map_err(|_| {
                ScheduleError::invalid_terms("periodNum", format!("{n} periods is out of range"))
            })?),
        };

        if request.loan_start_date.is_empty() {
            return Err(ScheduleError::invalid_terms("loanStartDate", "required"));
        }
        let start_date = parse_date(&request.loan_start_date)?;
        let end_date = request
            .loan_end_date
            .as_deref()
            .filter(|value| !value.is_empty())
            .map(parse_date)
            .transpose()?;

        let due_day = u32::try_from(request.repay_day).map_err(|_| {
            ScheduleError::invalid_terms(
                "repayDay",
                format!("must be within 1..=31, got {}", request.repay_day),
            )
        })?;

        let period_count_unit = match request.period_type.as_deref() {
            Some(code) => PeriodCountUnit::from_code(code)?,
            None => PeriodCountUnit::default(),
        };

        let method = RepaymentMethod::from_code(&request.repay_method)?;

        let mut builder = LoanTerms::builder()
            .principal(request.loan_amount)
            .annual_rate_percent(request.interest_rate)
            .start_date(start_date)
            .cycle(cycle)
            .period_count_unit(period_count_unit)
            .due_day(due_day)
            .method(method);

        if let Some(end_date) = end_date {
            builder = builder.end_date(end_date);
        }
        if let Some(count) = period_count {
            builder = builder.period_count(count);
        }
        if request.days_of_year != 0 {
            builder = builder.days_per_year(request.days_of_year);
        }

        builder.build()
    }
}

/// one row of the plan; amounts are strings with two decimals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepaymentRecord {
    /// 1-based
    pub period_num: u32,
    pub period_start_date: String,
    pub period_end_date: String,
    pub days_of_period: u32,
    pub period_repay_date: String,
    pub period_repay_total_amount: String,
    pub period_repay_principle: String,
    pub period_repay_interest: String,
    pub maintain_principle: String,
}

impl From<&PeriodRecord> for RepaymentRecord {
    fn from(record: &PeriodRecord) -> Self {
        Self {
            period_num: record.period_number(),
            period_start_date: format_date(record.accrual_start),
            period_end_date: format_date(record.accrual_end),
            days_of_period: record.days_in_period,
            period_repay_date: format_date(record.due_date),
            period_repay_total_amount: record.total_due.to_cents_string(),
            period_repay_principle: record.principal_due.to_cents_string(),
            period_repay_interest: record.interest_due.to_cents_string(),
            maintain_principle: record.remaining_principal.to_cents_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepaymentResponse {
    pub repay_method: String,
    pub loan_start_date: String,
    pub loan_end_date: String,
    pub total_period_num: u32,
    pub total_repay_amount: String,
    pub loan_amount: String,
    #[serde(rename = "planRepayTotalInterest")]
    pub total_interest: String,
    /// percent, as requested
    pub interest_rate: String,
    pub plan_repay_records: Vec<RepaymentRecord>,
}

impl From<&ScheduleSummary> for RepaymentResponse {
    fn from(summary: &ScheduleSummary) -> Self {
        Self {
            repay_method: summary.method.code().to_string(),
            loan_start_date: format_date(summary.start_date),
            loan_end_date: format_date(summary.end_date),
            total_period_num: summary.total_period_count,
            total_repay_amount: summary.total_repay_amount.to_cents_string(),
            loan_amount: summary.principal.to_cents_string(),
            total_interest: summary.total_interest.to_cents_string(),
            interest_rate: summary.annual_rate.as_percentage().to_string(),
            plan_repay_records: summary.records.iter().map(RepaymentRecord::from).collect(),
        }
    }
}

impl RepaymentResponse {
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Parse, validate and compute a plan straight from a wire request.
pub fn calculate_repayment_plan(request: &RepaymentRequest) -> Result<RepaymentResponse> {
    let terms = LoanTerms::try_from(request)?;
    let summary = compute_repayment_plan(&terms)?;
    Ok(RepaymentResponse::from(&summary))
}
