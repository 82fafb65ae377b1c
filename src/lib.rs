pub mod amortization;
pub mod calendar;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod interest;
pub mod schedule;
pub mod terms;
pub mod types;
pub mod validation;
pub mod wire;

// re-export key types
pub use amortization::{AllocationStrategy, AmortizationCalculator};
pub use decimal::{Money, Rate, RoundingMode};
pub use errors::{Result, ScheduleError};
pub use schedule::{
    compute_repayment_plan, NormalizedPlan, PeriodDateCalculator, PeriodRecord, PeriodWindow,
    ScheduleSummary,
};
pub use terms::{LoanTerms, LoanTermsBuilder};
pub use types::{PeriodCountUnit, RepaymentCycle, RepaymentMethod};
pub use validation::validate_terms;
pub use wire::{calculate_repayment_plan, RepaymentRecord, RepaymentRequest, RepaymentResponse};

// re-export external dependencies that users will need
pub use chrono;
pub use rust_decimal::Decimal;
