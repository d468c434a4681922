use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use crate::error::SavingsCalcError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::SavingsCalcResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Average days per month, used to normalise day-denominated periods to an
/// equivalent month count for accrual. Fixed, not configurable.
pub const AVG_DAYS_PER_MONTH: Decimal = dec!(30.417);

/// Average weeks per month, used to normalise week-denominated periods to an
/// equivalent month count for accrual. Fixed, not configurable.
pub const AVG_WEEKS_PER_MONTH: Decimal = dec!(4.345);

/// Statutory withholding on interest income: 14% income tax plus 1.4% local
/// income tax.
pub const INTEREST_TAX_RATE: Decimal = dec!(0.154);

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT_SCALE: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Time granularity in which the saver expresses the deposit schedule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodUnit {
    Day,
    Week,
    #[default]
    Month,
    Year,
}

impl PeriodUnit {
    /// Number of deposits made over `period` units.
    ///
    /// Day and week schedules deposit once per day/week; a year schedule
    /// still deposits monthly.
    pub fn payment_count(&self, period: Decimal) -> Decimal {
        match self {
            PeriodUnit::Day | PeriodUnit::Week | PeriodUnit::Month => period,
            PeriodUnit::Year => period * MONTHS_PER_YEAR,
        }
    }

    /// Equivalent month count used for interest accrual.
    ///
    /// Day/week divide by fixed average-month constants while payment
    /// counting treats each day/week as one full deposit. The mismatch in
    /// effective interest across units covering the same real duration is
    /// intentional and preserved as-is.
    pub fn months_equivalent(&self, period: Decimal) -> Decimal {
        match self {
            PeriodUnit::Day => period / AVG_DAYS_PER_MONTH,
            PeriodUnit::Week => period / AVG_WEEKS_PER_MONTH,
            PeriodUnit::Month => period,
            PeriodUnit::Year => period * MONTHS_PER_YEAR,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodUnit::Day => "day",
            PeriodUnit::Week => "week",
            PeriodUnit::Month => "month",
            PeriodUnit::Year => "year",
        }
    }
}

impl fmt::Display for PeriodUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodUnit {
    type Err = SavingsCalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "day" | "days" | "d" => Ok(PeriodUnit::Day),
            "week" | "weeks" | "w" => Ok(PeriodUnit::Week),
            "month" | "months" | "m" => Ok(PeriodUnit::Month),
            "year" | "years" | "y" => Ok(PeriodUnit::Year),
            other => Err(SavingsCalcError::InvalidInput {
                field: "period_unit".into(),
                reason: format!("unknown period unit '{other}' (expected day, week, month or year)"),
            }),
        }
    }
}

/// Input parameters for a deposit schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsInput {
    /// Duration magnitude, in `period_unit` units.
    pub period: Decimal,
    pub period_unit: PeriodUnit,
    /// Amount deposited per payment interval.
    pub payment_amount: Money,
    /// Annual interest rate in percent (3.5 = 3.5%).
    pub annual_rate: Percent,
}

/// Payout breakdown for a deposit schedule. Recomputed fresh per input
/// change; superseded by the next computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsBreakdown {
    pub payment_count: Decimal,
    pub total_principal: Money,
    /// Gross simple interest before tax.
    pub total_interest: Money,
    pub tax_amount: Money,
    pub after_tax_interest: Money,
    pub final_amount: Money,
}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

/// Check input constraints in order: period, payment amount, rate.
/// Only the first violation is reported.
pub fn validate(input: &SavingsInput) -> SavingsCalcResult<()> {
    if input.period <= Decimal::ZERO {
        return Err(SavingsCalcError::InvalidInput {
            field: "period".into(),
            reason: "savings period must be at least 1".into(),
        });
    }
    if input.payment_amount <= Decimal::ZERO {
        return Err(SavingsCalcError::InvalidInput {
            field: "payment_amount".into(),
            reason: "payment amount must be greater than 0".into(),
        });
    }
    if input.annual_rate < Decimal::ZERO {
        return Err(SavingsCalcError::InvalidInput {
            field: "annual_rate".into(),
            reason: "interest rate must be 0 or higher".into(),
        });
    }
    Ok(())
}

/// Compute the payout breakdown for a deposit schedule.
///
/// Simple interest, accrued monthly on the full principal. No rounding is
/// applied here; rendering to whole or two-decimal currency units is a
/// presentation concern.
pub fn calculate_payout(input: &SavingsInput) -> SavingsCalcResult<SavingsBreakdown> {
    validate(input)?;

    let payment_count = input.period_unit.payment_count(input.period);
    let total_principal = input.payment_amount * payment_count;

    let months = input.period_unit.months_equivalent(input.period);
    let monthly_rate = input.annual_rate / PERCENT_SCALE / MONTHS_PER_YEAR;
    let total_interest = total_principal * monthly_rate * months;

    let tax_amount = total_interest * INTEREST_TAX_RATE;
    let after_tax_interest = total_interest - tax_amount;
    let final_amount = total_principal + after_tax_interest;

    Ok(SavingsBreakdown {
        payment_count,
        total_principal,
        total_interest,
        tax_amount,
        after_tax_interest,
        final_amount,
    })
}

/// Compute the payout breakdown wrapped in the standard output envelope,
/// for the CLI and bindings boundary.
pub fn calculate_payout_report(
    input: &SavingsInput,
) -> SavingsCalcResult<ComputationOutput<SavingsBreakdown>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    match input.period_unit {
        PeriodUnit::Day => warnings.push(format!(
            "Day-denominated period: accrual assumes {AVG_DAYS_PER_MONTH} days per month on average"
        )),
        PeriodUnit::Week => warnings.push(format!(
            "Week-denominated period: accrual assumes {AVG_WEEKS_PER_MONTH} weeks per month on average"
        )),
        PeriodUnit::Month | PeriodUnit::Year => {}
    }

    let breakdown = calculate_payout(input)?;

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Simple interest on an installment deposit schedule, accrued monthly, 15.4% interest-income withholding",
        &serde_json::json!({
            "period": input.period.to_string(),
            "period_unit": input.period_unit.as_str(),
            "payment_count": breakdown.payment_count.to_string(),
            "months_equivalent": input.period_unit.months_equivalent(input.period).to_string(),
            "annual_rate_pct": input.annual_rate.to_string(),
            "interest_tax_rate": INTEREST_TAX_RATE.to_string(),
        }),
        warnings,
        elapsed,
        breakdown,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    /// Twelve monthly deposits of 100,000 at 3.5% p.a.
    fn monthly_input() -> SavingsInput {
        SavingsInput {
            period: dec!(12),
            period_unit: PeriodUnit::Month,
            payment_amount: dec!(100_000),
            annual_rate: dec!(3.5),
        }
    }

    // ---------------------------------------------------------------
    // 1. Twelve monthly deposits at 3.5%
    // ---------------------------------------------------------------
    #[test]
    fn test_twelve_monthly_deposits() {
        let result = calculate_payout(&monthly_input()).unwrap();

        assert_eq!(result.payment_count, dec!(12));
        assert_eq!(result.total_principal, dec!(1_200_000));
        // 1,200,000 * (0.035 / 12) * 12 = 42,000
        assert!((result.total_interest - dec!(42_000)).abs() < dec!(0.01));
        assert!((result.tax_amount - dec!(6_468)).abs() < dec!(0.01));
        assert!((result.after_tax_interest - dec!(35_532)).abs() < dec!(0.01));
        assert!((result.final_amount - dec!(1_235_532)).abs() < dec!(0.01));
    }

    // ---------------------------------------------------------------
    // 2. Zero rate: no interest, no tax, payout equals principal
    // ---------------------------------------------------------------
    #[test]
    fn test_zero_rate_one_year() {
        let input = SavingsInput {
            period: dec!(1),
            period_unit: PeriodUnit::Year,
            payment_amount: dec!(50_000),
            annual_rate: Decimal::ZERO,
        };
        let result = calculate_payout(&input).unwrap();

        assert_eq!(result.payment_count, dec!(12));
        assert_eq!(result.total_principal, dec!(600_000));
        assert_eq!(result.total_interest, Decimal::ZERO);
        assert_eq!(result.tax_amount, Decimal::ZERO);
        assert_eq!(result.final_amount, dec!(600_000));
    }

    // ---------------------------------------------------------------
    // 3. Day-denominated schedule matches the formula
    // ---------------------------------------------------------------
    #[test]
    fn test_thirty_daily_deposits() {
        let input = SavingsInput {
            period: dec!(30),
            period_unit: PeriodUnit::Day,
            payment_amount: dec!(10_000),
            annual_rate: dec!(5),
        };
        let result = calculate_payout(&input).unwrap();

        assert_eq!(result.payment_count, dec!(30));
        assert_eq!(result.total_principal, dec!(300_000));

        let months = dec!(30) / AVG_DAYS_PER_MONTH;
        assert!(months > dec!(0.986) && months < dec!(0.987));

        let expected = dec!(300_000) * (dec!(5) / dec!(100) / dec!(12)) * months;
        assert!(
            (result.total_interest - expected).abs() < dec!(0.000001),
            "interest {} vs expected {}",
            result.total_interest,
            expected
        );
    }

    // ---------------------------------------------------------------
    // 4. Accounting identities hold exactly
    // ---------------------------------------------------------------
    #[test]
    fn test_breakdown_identities() {
        let inputs = [
            monthly_input(),
            SavingsInput {
                period: dec!(90),
                period_unit: PeriodUnit::Day,
                payment_amount: dec!(5_000),
                annual_rate: dec!(2.1),
            },
            SavingsInput {
                period: dec!(26),
                period_unit: PeriodUnit::Week,
                payment_amount: dec!(70_000),
                annual_rate: dec!(4.25),
            },
            SavingsInput {
                period: dec!(3),
                period_unit: PeriodUnit::Year,
                payment_amount: dec!(250_000),
                annual_rate: dec!(6),
            },
        ];

        for input in &inputs {
            let r = calculate_payout(input).unwrap();
            assert_eq!(r.tax_amount, r.total_interest * INTEREST_TAX_RATE);
            assert_eq!(r.after_tax_interest, r.total_interest - r.tax_amount);
            assert_eq!(r.final_amount, r.total_principal + r.after_tax_interest);
        }
    }

    // ---------------------------------------------------------------
    // 5. Higher rate never decreases gross interest
    // ---------------------------------------------------------------
    #[test]
    fn test_interest_monotone_in_rate() {
        let mut prev = Decimal::MIN;
        for rate in [dec!(0), dec!(0.5), dec!(1), dec!(3.5), dec!(7), dec!(12)] {
            let mut input = monthly_input();
            input.annual_rate = rate;
            let interest = calculate_payout(&input).unwrap().total_interest;
            assert!(interest >= prev, "rate {rate} decreased interest");
            prev = interest;
        }
    }

    // ---------------------------------------------------------------
    // 6. Higher payment or longer period never decreases principal
    // ---------------------------------------------------------------
    #[test]
    fn test_principal_monotone_in_payment_and_period() {
        let mut prev = Decimal::MIN;
        for amount in [dec!(1_000), dec!(50_000), dec!(100_000), dec!(900_000)] {
            let mut input = monthly_input();
            input.payment_amount = amount;
            let principal = calculate_payout(&input).unwrap().total_principal;
            assert!(principal >= prev);
            prev = principal;
        }

        prev = Decimal::MIN;
        for period in [dec!(1), dec!(6), dec!(12), dec!(36)] {
            let mut input = monthly_input();
            input.period = period;
            let principal = calculate_payout(&input).unwrap().total_principal;
            assert!(principal >= prev);
            prev = principal;
        }
    }

    // ---------------------------------------------------------------
    // 7. Payment counting vs month normalisation per unit
    // ---------------------------------------------------------------
    #[test]
    fn test_unit_conversions() {
        assert_eq!(PeriodUnit::Day.payment_count(dec!(30)), dec!(30));
        assert_eq!(PeriodUnit::Week.payment_count(dec!(8)), dec!(8));
        assert_eq!(PeriodUnit::Month.payment_count(dec!(12)), dec!(12));
        assert_eq!(PeriodUnit::Year.payment_count(dec!(2)), dec!(24));

        assert_eq!(
            PeriodUnit::Day.months_equivalent(dec!(30)),
            dec!(30) / AVG_DAYS_PER_MONTH
        );
        assert_eq!(
            PeriodUnit::Week.months_equivalent(dec!(8)),
            dec!(8) / AVG_WEEKS_PER_MONTH
        );
        assert_eq!(PeriodUnit::Month.months_equivalent(dec!(12)), dec!(12));
        assert_eq!(PeriodUnit::Year.months_equivalent(dec!(2)), dec!(24));
    }

    // ---------------------------------------------------------------
    // 8. Validation: zero period rejected, names the field
    // ---------------------------------------------------------------
    #[test]
    fn test_validation_zero_period() {
        let mut input = monthly_input();
        input.period = Decimal::ZERO;

        let err = calculate_payout(&input).unwrap_err();
        assert!(err.to_string().contains("period"), "got: {err}");
    }

    // ---------------------------------------------------------------
    // 9. Validation: zero payment rejected, names the field
    // ---------------------------------------------------------------
    #[test]
    fn test_validation_zero_payment() {
        let mut input = monthly_input();
        input.payment_amount = Decimal::ZERO;

        let err = calculate_payout(&input).unwrap_err();
        assert!(err.to_string().contains("payment"), "got: {err}");
    }

    // ---------------------------------------------------------------
    // 10. Validation: negative rate rejected, names the field
    // ---------------------------------------------------------------
    #[test]
    fn test_validation_negative_rate() {
        let mut input = monthly_input();
        input.annual_rate = dec!(-1);

        let err = calculate_payout(&input).unwrap_err();
        assert!(err.to_string().contains("rate"), "got: {err}");
    }

    // ---------------------------------------------------------------
    // 11. Validation order: period reported before payment and rate
    // ---------------------------------------------------------------
    #[test]
    fn test_validation_first_violation_wins() {
        let input = SavingsInput {
            period: Decimal::ZERO,
            period_unit: PeriodUnit::Month,
            payment_amount: Decimal::ZERO,
            annual_rate: dec!(-1),
        };
        let err = calculate_payout(&input).unwrap_err();
        assert!(err.to_string().contains("period"), "got: {err}");

        let input = SavingsInput {
            period: dec!(6),
            period_unit: PeriodUnit::Month,
            payment_amount: Decimal::ZERO,
            annual_rate: dec!(-1),
        };
        let err = calculate_payout(&input).unwrap_err();
        assert!(err.to_string().contains("payment"), "got: {err}");
    }

    // ---------------------------------------------------------------
    // 12. Fractional periods flow through both conversions
    // ---------------------------------------------------------------
    #[test]
    fn test_fractional_period() {
        let input = SavingsInput {
            period: dec!(1.5),
            period_unit: PeriodUnit::Year,
            payment_amount: dec!(100_000),
            annual_rate: dec!(3),
        };
        let result = calculate_payout(&input).unwrap();

        assert_eq!(result.payment_count, dec!(18));
        assert_eq!(result.total_principal, dec!(1_800_000));
    }

    // ---------------------------------------------------------------
    // 13. Unit parsing
    // ---------------------------------------------------------------
    #[test]
    fn test_period_unit_from_str() {
        assert_eq!("day".parse::<PeriodUnit>().unwrap(), PeriodUnit::Day);
        assert_eq!("Weeks".parse::<PeriodUnit>().unwrap(), PeriodUnit::Week);
        assert_eq!("m".parse::<PeriodUnit>().unwrap(), PeriodUnit::Month);
        assert_eq!("YEAR".parse::<PeriodUnit>().unwrap(), PeriodUnit::Year);

        let err = "fortnight".parse::<PeriodUnit>().unwrap_err();
        assert!(err.to_string().contains("fortnight"));
    }

    // ---------------------------------------------------------------
    // 14. Envelope: approximation warning only for day/week units
    // ---------------------------------------------------------------
    #[test]
    fn test_report_warnings_by_unit() {
        let mut input = monthly_input();
        let report = calculate_payout_report(&input).unwrap();
        assert!(report.warnings.is_empty());

        input.period_unit = PeriodUnit::Day;
        input.period = dec!(60);
        let report = calculate_payout_report(&input).unwrap();
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("30.417"));

        input.period_unit = PeriodUnit::Week;
        let report = calculate_payout_report(&input).unwrap();
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("4.345"));
    }

    // ---------------------------------------------------------------
    // 15. Envelope: assumptions record the fixed tax rate
    // ---------------------------------------------------------------
    #[test]
    fn test_report_assumptions() {
        let report = calculate_payout_report(&monthly_input()).unwrap();
        let assumptions = report.assumptions.as_object().unwrap();

        assert_eq!(
            assumptions.get("interest_tax_rate").unwrap().as_str(),
            Some("0.154")
        );
        assert_eq!(assumptions.get("period_unit").unwrap().as_str(), Some("month"));
        assert_eq!(assumptions.get("payment_count").unwrap().as_str(), Some("12"));
    }

    // ---------------------------------------------------------------
    // 16. Envelope rejects invalid input the same way the core does
    // ---------------------------------------------------------------
    #[test]
    fn test_report_propagates_validation() {
        let mut input = monthly_input();
        input.period = dec!(-3);
        assert!(calculate_payout_report(&input).is_err());
    }
}
