use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::MONTHS_PER_YEAR;
use crate::errors::{Result, ScheduleError};

/// repayment method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RepaymentMethod {
    /// equal total payment every period (annuity), interest on outstanding balance
    EqualInstallment,
    /// equal principal every period, interest on outstanding balance
    EqualPrincipal,
    /// single period, principal and interest repaid together at maturity
    InterestWithPrincipal,
    /// interest every period, principal in full at maturity
    InterestThenPrincipal,
    /// equal principal and equal interest every period
    EqualPeriodPayment,
}

impl RepaymentMethod {
    pub const ALL: [RepaymentMethod; 5] = [
        RepaymentMethod::EqualInstallment,
        RepaymentMethod::EqualPrincipal,
        RepaymentMethod::InterestWithPrincipal,
        RepaymentMethod::InterestThenPrincipal,
        RepaymentMethod::EqualPeriodPayment,
    ];

    /// parse a wire code ("1" to "5")
    pub fn from_code(code: &str) -> Result<Self> {
        match code {
            "1" => Ok(RepaymentMethod::EqualInstallment),
            "2" => Ok(RepaymentMethod::EqualPrincipal),
            "3" => Ok(RepaymentMethod::InterestWithPrincipal),
            "4" => Ok(RepaymentMethod::InterestThenPrincipal),
            "5" => Ok(RepaymentMethod::EqualPeriodPayment),
            _ => Err(ScheduleError::UnsupportedMethod {
                code: code.to_string(),
            }),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            RepaymentMethod::EqualInstallment => "1",
            RepaymentMethod::EqualPrincipal => "2",
            RepaymentMethod::InterestWithPrincipal => "3",
            RepaymentMethod::InterestThenPrincipal => "4",
            RepaymentMethod::EqualPeriodPayment => "5",
        }
    }

    /// methods that run through the period date calculator
    pub fn is_periodic(&self) -> bool {
        !matches!(self, RepaymentMethod::InterestWithPrincipal)
    }

    pub fn label_zh(&self) -> &'static str {
        match self {
            RepaymentMethod::EqualInstallment => "等额本息",
            RepaymentMethod::EqualPrincipal => "等额本金",
            RepaymentMethod::InterestWithPrincipal => "息随本清",
            RepaymentMethod::InterestThenPrincipal => "先息后本",
            RepaymentMethod::EqualPeriodPayment => "等本等息",
        }
    }
}

impl fmt::Display for RepaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RepaymentMethod::EqualInstallment => "equal installment",
            RepaymentMethod::EqualPrincipal => "equal principal",
            RepaymentMethod::InterestWithPrincipal => "interest with principal",
            RepaymentMethod::InterestThenPrincipal => "interest then principal",
            RepaymentMethod::EqualPeriodPayment => "equal period payment",
        };
        f.write_str(label)
    }
}

/// repayment cycle (frequency of due dates)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RepaymentCycle {
    Daily,
    Fortnightly,
    Monthly,
    Quarterly,
    Yearly,
}

impl RepaymentCycle {
    /// parse a wire code ("01" to "05")
    pub fn from_code(code: &str) -> Result<Self> {
        match code {
            "01" => Ok(RepaymentCycle::Daily),
            "02" => Ok(RepaymentCycle::Fortnightly),
            "03" => Ok(RepaymentCycle::Monthly),
            "04" => Ok(RepaymentCycle::Quarterly),
            "05" => Ok(RepaymentCycle::Yearly),
            _ => Err(ScheduleError::invalid_terms(
                "loanCycleCode",
                format!("unknown cycle code {code:?}"),
            )),
        }
    }

    pub fn label_zh(&self) -> &'static str {
        match self {
            RepaymentCycle::Daily => "日",
            RepaymentCycle::Fortnightly => "两周",
            RepaymentCycle::Monthly => "月",
            RepaymentCycle::Quarterly => "季",
            RepaymentCycle::Yearly => "年",
        }
    }
}

impl fmt::Display for RepaymentCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RepaymentCycle::Daily => "daily",
            RepaymentCycle::Fortnightly => "fortnightly",
            RepaymentCycle::Monthly => "monthly",
            RepaymentCycle::Quarterly => "quarterly",
            RepaymentCycle::Yearly => "yearly",
        };
        f.write_str(label)
    }
}

/// unit of a supplied period count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PeriodCountUnit {
    Years,
    #[default]
    Months,
}

impl PeriodCountUnit {
    /// parse a wire code ("01" years, "02" months)
    pub fn from_code(code: &str) -> Result<Self> {
        match code {
            "01" => Ok(PeriodCountUnit::Years),
            "02" => Ok(PeriodCountUnit::Months),
            _ => Err(ScheduleError::invalid_terms(
                "periodType",
                format!("unknown period type {code:?}"),
            )),
        }
    }

    /// number of periods a count in this unit stands for, None on overflow
    pub fn to_periods(&self, count: u32) -> Option<u32> {
        match self {
            PeriodCountUnit::Years => count.checked_mul(MONTHS_PER_YEAR),
            PeriodCountUnit::Months => Some(count),
        }
    }
}
