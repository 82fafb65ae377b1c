/// quick start - compute a monthly equal installment schedule and print it
use repayment_plan_rs::chrono::NaiveDate;
use repayment_plan_rs::{
    calculate_repayment_plan, compute_repayment_plan, Decimal, LoanTerms, Money, RepaymentCycle,
    RepaymentMethod, RepaymentRequest,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 12,000 over 12 months at 12% a year, due on the 15th
    let terms = LoanTerms::builder()
        .principal(Money::from_major(12_000))
        .annual_rate_percent(Decimal::from(12))
        .start_date(NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("bad date")?)
        .cycle(RepaymentCycle::Monthly)
        .due_day(15)
        .period_count(12)
        .method(RepaymentMethod::EqualInstallment)
        .build()?;

    let summary = compute_repayment_plan(&terms)?;

    println!(
        "{} ({}), {} periods",
        summary.method,
        summary.method.label_zh(),
        summary.total_period_count
    );
    println!(
        "{:>3}  {:<10}  {:>4}  {:>10}  {:>10}  {:>10}  {:>10}",
        "#", "due", "days", "principal", "interest", "total", "remaining"
    );
    for record in &summary.records {
        println!(
            "{:>3}  {}  {:>4}  {:>10}  {:>10}  {:>10}  {:>10}",
            record.period_number(),
            record.due_date,
            record.days_in_period,
            record.principal_due.to_cents_string(),
            record.interest_due.to_cents_string(),
            record.total_due.to_cents_string(),
            record.remaining_principal.to_cents_string(),
        );
    }
    println!(
        "total interest {}, total repay {}",
        summary.total_interest, summary.total_repay_amount
    );

    // same kind of schedule through the json boundary
    let request: RepaymentRequest = serde_json::from_str(
        r#"{
            "loanAmount": "100000",
            "loanStartDate": "2022-01-01",
            "loanEndDate": "2022-02-01",
            "loanCycleCode": "03",
            "interestRate": "12",
            "repayMethod": "3",
            "repayDay": 1
        }"#,
    )?;
    println!("{}", calculate_repayment_plan(&request)?.to_json_pretty()?);

    Ok(())
}
