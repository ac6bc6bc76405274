use serde_json::Value;

use super::flatten_object;

/// Key answer fields, matched against the last segment of a flattened key.
const PRIORITY_KEYS: [&str; 6] = [
    "final_net_worth",
    "total_tax",
    "contribution",
    "net_cashflow",
    "recurring_total",
    "coverage_until_year",
];

/// Print just the key answer value from the output.
///
/// Looks for well-known result fields (including inside nested objects such
/// as `kpis`), then falls back to the first field in the result object.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        let flat = flatten_object(map);
        for key in &PRIORITY_KEYS {
            let hit = flat.iter().find(|(path, val)| {
                !val.is_null() && (path == key || path.ends_with(&format!(".{key}")))
            });
            if let Some((_, val)) = hit {
                println!("{}", format_minimal(val));
                return;
            }
        }

        if let Some((key, val)) = flat.first() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result_obj));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
