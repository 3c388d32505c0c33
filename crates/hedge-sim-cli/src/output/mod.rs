pub mod csv_out;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("JSON serialization error: {}", e),
    }
}

/// Flatten nested objects into dotted keys, leaving arrays and scalars as
/// leaves: `{"totals": {"roi_percentage": 1}}` -> `totals.roi_percentage`.
pub fn flatten_object(value: &Value) -> Vec<(String, Value)> {
    let mut out = Vec::new();
    if let Value::Object(map) = value {
        for (key, val) in map {
            push_flat(&mut out, key.clone(), val);
        }
    }
    out
}

fn push_flat(out: &mut Vec<(String, Value)>, prefix: String, value: &Value) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                push_flat(out, format!("{prefix}.{key}"), val);
            }
        }
        _ => out.push((prefix, value.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_object() {
        let value = serde_json::json!({
            "phase_1": { "ratio": 0.072, "phase_cost": 576.0 },
            "lot_tables": [1, 2],
            "name": "x"
        });
        let flat = flatten_object(&value);
        let keys: Vec<&str> = flat.iter().map(|(k, _)| k.as_str()).collect();
        assert!(keys.contains(&"phase_1.ratio"));
        assert!(keys.contains(&"phase_1.phase_cost"));
        assert!(keys.contains(&"lot_tables"));
        assert!(keys.contains(&"name"));
        assert_eq!(flat.len(), 4);
    }
}
