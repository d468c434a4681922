use serde_json::Value;
use std::io;

/// Write the result as two-column CSV.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let rows = match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => result,
            _ => map,
        },
        _ => {
            let _ = wtr.write_record([&cell(value)]);
            let _ = wtr.flush();
            return;
        }
    };

    let _ = wtr.write_record(["field", "value"]);
    for (key, val) in rows {
        let _ = wtr.write_record([key.as_str(), &cell(val)]);
    }
    let _ = wtr.flush();
}

fn cell(val: &Value) -> String {
    match val {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
