use thiserror::Error;

use crate::types::RepaymentCycle;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("invalid loan terms: {field}: {message}")]
    InvalidTerms {
        field: &'static str,
        message: String,
    },

    #[error("cannot parse date {value:?}: expected YYYY-MM-DD")]
    DateParse {
        value: String,
    },

    #[error("unsupported repayment method: {code:?}")]
    UnsupportedMethod {
        code: String,
    },

    #[error("repayment cycle {cycle} is not supported by the schedule calculator")]
    UnsupportedCycle {
        cycle: RepaymentCycle,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("arithmetic error: {message}")]
    Arithmetic {
        message: String,
    },
}

impl ScheduleError {
    pub(crate) fn invalid_terms(field: &'static str, message: impl Into<String>) -> Self {
        ScheduleError::InvalidTerms {
            field,
            message: message.into(),
        }
    }

    pub(crate) fn overflow(message: impl Into<String>) -> Self {
        ScheduleError::Arithmetic {
            message: message.into(),
        }
    }

    pub(crate) fn date_overflow(message: impl Into<String>) -> Self {
        ScheduleError::InvalidDate {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
