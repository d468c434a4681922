use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use savings_calc_core::interest::{self, PeriodUnit, SavingsInput};

use crate::input;

/// Arguments for a one-shot payout calculation
#[derive(Args)]
pub struct CalculateArgs {
    /// Path to a JSON input file (same shape as piped stdin)
    #[arg(long)]
    pub input: Option<String>,

    /// Savings period magnitude (e.g. 12)
    #[arg(long)]
    pub period: Option<Decimal>,

    /// Period unit: day, week, month or year
    #[arg(long, default_value = "month")]
    pub unit: String,

    /// Amount deposited per payment interval
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 3.5)
    #[arg(long, default_value = "0")]
    pub rate: Decimal,
}

pub fn run_calculate(args: CalculateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let calc_input: SavingsInput = if let Some(ref path) = args.input {
        input::read_json_file(path)?
    } else if let (Some(period), Some(amount)) = (args.period, args.amount) {
        SavingsInput {
            period,
            period_unit: args.unit.parse::<PeriodUnit>()?,
            payment_amount: amount,
            annual_rate: args.rate,
        }
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--period and --amount (or --input <file.json> / piped stdin) required".into());
    };

    let report = interest::calculate_payout_report(&calc_input)?;
    Ok(serde_json::to_value(report)?)
}
