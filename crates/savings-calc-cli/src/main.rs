mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::calculate::CalculateArgs;
use commands::session::SessionArgs;

/// Installment-savings interest calculations
#[derive(Parser)]
#[command(
    name = "savcalc",
    version,
    about = "Installment-savings simple-interest calculator",
    long_about = "Computes total principal, simple interest, interest-income tax and \
                  final payout for an installment savings schedule with decimal \
                  precision. Supports one-shot calculation and a line-oriented \
                  session that recomputes after every field edit."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the payout breakdown for a deposit schedule
    Calculate(CalculateArgs),
    /// Edit fields interactively; the breakdown re-renders on every change
    Session(SessionArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Calculate(args) => commands::calculate::run_calculate(args),
        Commands::Session(args) => {
            // The session owns its own incremental rendering.
            match commands::session::run_session(args) {
                Ok(()) => process::exit(0),
                Err(e) => {
                    eprintln!("{}: {}", "error".red().bold(), e);
                    process::exit(1);
                }
            }
        }
        Commands::Version => {
            println!("savcalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
