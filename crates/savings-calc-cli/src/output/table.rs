use rust_decimal::Decimal;
use serde_json::Value;
use tabled::{builder::Builder, Table};

use savings_calc_core::display::{format_won, format_won_exact};

/// Principal and payout render as whole currency units.
const WHOLE_UNIT_FIELDS: &[&str] = &["total_principal", "final_amount"];
/// Interest and tax figures render with two decimals.
const TWO_DECIMAL_FIELDS: &[&str] = &["total_interest", "tax_amount", "after_tax_interest"];

/// Render the computation envelope as a Field/Value table, applying the
/// currency rules per breakdown field, then the assumption and warning notes.
pub fn print_table(value: &Value) {
    let Some(map) = value.as_object() else {
        println!("{}", value);
        return;
    };

    match map.get("result") {
        Some(Value::Object(result)) => {
            let mut builder = Builder::default();
            builder.push_record(["Field", "Value"]);
            for (key, val) in result {
                builder.push_record([key.as_str(), &format_field(key, val)]);
            }
            println!("{}", Table::from(builder));
            print_notes(map);
        }
        _ => {
            let mut builder = Builder::default();
            builder.push_record(["Field", "Value"]);
            for (key, val) in map {
                builder.push_record([key.as_str(), &raw_value(val)]);
            }
            println!("{}", Table::from(builder));
        }
    }
}

fn format_field(key: &str, val: &Value) -> String {
    if let Some(amount) = decimal_of(val) {
        if WHOLE_UNIT_FIELDS.contains(&key) {
            return format_won(amount);
        }
        if TWO_DECIMAL_FIELDS.contains(&key) {
            return format_won_exact(amount);
        }
        return amount.normalize().to_string();
    }
    raw_value(val)
}

/// Decimal fields arrive as JSON strings; plain numbers are also accepted.
fn decimal_of(val: &Value) -> Option<Decimal> {
    match val {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => n.to_string().parse().ok(),
        _ => None,
    }
}

fn raw_value(val: &Value) -> String {
    match val {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

fn print_notes(envelope: &serde_json::Map<String, Value>) {
    if let Some(Value::Object(assumptions)) = envelope.get("assumptions") {
        println!("\nAssumptions:");
        for (key, val) in assumptions {
            println!("  {}: {}", key, raw_value(val));
        }
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}
