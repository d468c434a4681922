//! Currency rendering rules for the presentation layer: principal and final
//! payout show whole currency units (truncated), interest and tax figures
//! show two decimals. Grouping uses comma thousands separators.

use rust_decimal::{Decimal, RoundingStrategy};

/// Whole-unit rendering, truncated toward zero: `1,235,532`.
pub fn format_won(amount: Decimal) -> String {
    group_digits(&amount.trunc().to_string())
}

/// Two-decimal rendering, half rounded away from zero: `6,468.00`.
pub fn format_won_exact(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    group_digits(&format!("{rounded:.2}"))
}

fn group_digits(s: &str) -> String {
    let (sign, rest) = match s.strip_prefix('-') {
        Some(r) => ("-", r),
        None => ("", s),
    };
    let (int_part, frac_part) = match rest.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rest, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}
