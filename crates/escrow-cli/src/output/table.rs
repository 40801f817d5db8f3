use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::month_series;

/// Format output as tables using the tabled crate.
///
/// Analysis results get two tables: the scalar summary fields, then the
/// month-by-month disbursement/balance trajectory. Anything else falls back
/// to a generic field/value rendering.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_tables(result, map);
            } else {
                print_summary_table(value);
                print_month_table(value);
            }
        }
        Value::Array(arr) => {
            print_array_table(arr);
        }
        _ => {
            println!("{}", value);
        }
    }
}

fn print_result_tables(result: &Value, envelope: &serde_json::Map<String, Value>) {
    print_summary_table(result);
    print_month_table(result);

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

/// Scalar fields only; the month arrays get their own table.
fn print_summary_table(result: &Value) {
    let Value::Object(map) = result else {
        println!("{}", result);
        return;
    };
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        if matches!(key.as_str(), "monthly_schedule" | "month_end_balances") {
            continue;
        }
        builder.push_record([key.as_str(), &format_value(val)]);
    }
    let table = Table::from(builder);
    println!("{}", table);
}

fn print_month_table(result: &Value) {
    let Some((schedule, balances)) = month_series(result) else {
        return;
    };
    let mut builder = Builder::default();
    builder.push_record(["Month", "Disbursements", "End Balance"]);
    for (i, (disb, bal)) in schedule.iter().zip(balances).enumerate() {
        builder.push_record([
            (i + 1).to_string(),
            format_value(disb),
            format_value(bal),
        ]);
    }
    let table = Table::from(builder);
    println!("\n{}", table);
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| {
                        map.get(h.as_str())
                            .map(format_value)
                            .unwrap_or_default()
                    })
                    .collect();
                builder.push_record(row);
            }
        }

        let table = Table::from(builder);
        println!("{}", table);
    } else {
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
