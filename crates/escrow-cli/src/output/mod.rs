pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Pull the month-by-month trajectory out of an analysis result, if present:
/// (monthly_schedule, month_end_balances) as parallel 12-entry arrays.
pub(crate) fn month_series(result: &Value) -> Option<(&Vec<Value>, &Vec<Value>)> {
    let map = result.as_object()?;
    let schedule = map.get("monthly_schedule")?.as_array()?;
    let balances = map.get("month_end_balances")?.as_array()?;
    if schedule.len() == balances.len() {
        Some((schedule, balances))
    } else {
        None
    }
}
