pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Result fields that hold a row series, in the order they are looked up.
pub const SERIES_KEYS: [&str; 4] = ["monthly_results", "yearly", "scenarios", "categories"];

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Flatten nested objects into dotted keys (`income.total`). Arrays stay as
/// leaf values.
pub fn flatten_object(map: &Map<String, Value>) -> Vec<(String, Value)> {
    let mut out = Vec::new();
    flatten_into("", map, &mut out);
    out
}

fn flatten_into(prefix: &str, map: &Map<String, Value>, out: &mut Vec<(String, Value)>) {
    for (key, val) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(inner) => flatten_into(&path, inner, out),
            _ => out.push((path, val.clone())),
        }
    }
}

/// Split a result object into its scalar fields and its first row series.
pub fn split_series(result: &Map<String, Value>) -> (Map<String, Value>, Option<(&str, &[Value])>) {
    let series = SERIES_KEYS.iter().find_map(|key| match result.get(*key) {
        Some(Value::Array(rows)) => Some((*key, rows.as_slice())),
        _ => None,
    });
    let scalars = result
        .iter()
        .filter(|(key, _)| series.map_or(true, |(name, _)| name != key.as_str()))
        .map(|(key, val)| (key.clone(), val.clone()))
        .collect();
    (scalars, series)
}
