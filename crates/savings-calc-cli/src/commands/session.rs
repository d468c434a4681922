use clap::Args;
use colored::Colorize;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::io::{self, BufRead, Write};

use savings_calc_core::display::{format_won, format_won_exact};
use savings_calc_core::interest::{PeriodUnit, INTEREST_TAX_RATE};
use savings_calc_core::session::{apply_change, FieldChange, FormUpdate, SavingsForm};

/// Arguments for the reactive session
#[derive(Args)]
pub struct SessionArgs {
    /// Suppress the field help banner
    #[arg(long)]
    pub quiet: bool,
}

/// Line-oriented stand-in for the form UI: each `<field> <value>` line is one
/// input change, and the breakdown (or the validation message) re-renders
/// after every line.
pub fn run_session(args: SessionArgs) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let mut form = SavingsForm::default();

    if !args.quiet {
        println!("Fields: period <n> | unit <day|week|month|year> | amount <n> | rate <pct>");
        println!("An empty line or 'quit' exits.");
    }

    print_prompt()?;
    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("quit") {
            break;
        }

        match parse_command(trimmed) {
            Ok(change) => {
                let update = apply_change(&form, change);
                form = update.form.clone();
                render_update(&update);
            }
            Err(msg) => println!("{}: {}", "error".red().bold(), msg),
        }
        print_prompt()?;
    }

    Ok(())
}

fn print_prompt() -> io::Result<()> {
    print!("> ");
    io::stdout().flush()
}

fn parse_command(line: &str) -> Result<FieldChange, String> {
    let (key, value) = line
        .split_once(char::is_whitespace)
        .ok_or_else(|| format!("expected '<field> <value>', got '{line}'"))?;
    let value = value.trim();

    match key {
        "period" => parse_decimal(value).map(FieldChange::Period),
        "unit" => value
            .parse::<PeriodUnit>()
            .map(FieldChange::PeriodUnit)
            .map_err(|e| e.to_string()),
        "amount" => parse_decimal(value).map(FieldChange::PaymentAmount),
        "rate" => parse_decimal(value).map(FieldChange::AnnualRate),
        other => Err(format!("unknown field '{other}'")),
    }
}

fn parse_decimal(value: &str) -> Result<Decimal, String> {
    value
        .parse::<Decimal>()
        .map_err(|_| format!("'{value}' is not a number"))
}

fn render_update(update: &FormUpdate) {
    if let Some(ref msg) = update.error {
        println!("{}", msg.yellow());
        return;
    }
    let Some(ref b) = update.result else { return };

    let tax_pct = (INTEREST_TAX_RATE * dec!(100)).normalize();
    println!("  {:<22} {}", "Total principal", format_won(b.total_principal));
    println!("  {:<22} {}", "Total interest", format_won_exact(b.total_interest));
    println!(
        "  {:<22} {}",
        format!("Tax ({tax_pct}%)"),
        format_won_exact(b.tax_amount)
    );
    println!(
        "  {:<22} {}",
        "After-tax interest",
        format_won_exact(b.after_tax_interest)
    );
    println!(
        "  {:<22} {}",
        "Final payout".bold(),
        format_won(b.final_amount).bold()
    );
    println!(
        "  {} payments, {} cadence, simple interest",
        b.payment_count.normalize(),
        update.form.period_unit
    );
}
