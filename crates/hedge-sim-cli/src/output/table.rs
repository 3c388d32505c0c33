use serde_json::Value;
use tabled::{builder::Builder, Table};

use hedge_sim_core::format::{format_currency, format_percent};

use super::flatten_object;

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                print_flat_object(value);
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

fn print_result_table(result: &Value, envelope: &serde_json::Map<String, Value>) {
    if result.is_object() {
        print_flat_object(result);
    } else {
        println!("{}", format_value("", result));
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

/// Scalars and nested objects go in a Field/Value table; arrays of objects
/// get their own table underneath.
fn print_flat_object(value: &Value) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    let mut nested: Vec<(String, Vec<Value>)> = Vec::new();

    for (key, val) in flatten_object(value) {
        match val {
            Value::Array(items) if items.iter().any(|v| v.is_object() || v.is_array()) => {
                nested.push((key, items));
            }
            other => {
                builder.push_record([key.clone(), format_value(&key, &other)]);
            }
        }
    }
    println!("{}", Table::from(builder));

    for (key, items) in nested {
        println!("\n{}:", key);
        print_array_table(&items);
    }
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        // Array-valued columns (e.g. lot-table rows) are printed per item below.
        let headers: Vec<String> = first
            .iter()
            .filter(|(_, v)| !v.is_array())
            .map(|(k, _)| k.clone())
            .collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| {
                        map.get(h.as_str())
                            .map(|v| format_value(h, v))
                            .unwrap_or_default()
                    })
                    .collect();
                builder.push_record(row);
            }
        }
        println!("{}", Table::from(builder));

        for (i, item) in arr.iter().enumerate() {
            if let Value::Object(map) = item {
                let label = map
                    .values()
                    .find_map(|v| v.as_str().map(str::to_string))
                    .unwrap_or_else(|| format!("#{}", i + 1));
                for (key, val) in map {
                    if let Value::Array(inner) = val {
                        println!("\n{} {}:", label, key);
                        print_array_table(inner);
                    }
                }
            }
        }
    } else if arr.iter().all(|v| v.is_array()) {
        // matrix
        let mut builder = Builder::default();
        for row in arr {
            if let Value::Array(cells) = row {
                let cells: Vec<String> = cells.iter().map(|v| format_value("", v)).collect();
                builder.push_record(cells);
            }
        }
        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_value("", item));
        }
    }
}

#[derive(Debug, PartialEq)]
enum FigureKind {
    Percent,
    Currency,
    Plain,
}

/// Guess how a numeric field should be shown from its (dotted) name.
fn figure_kind(key: &str) -> FigureKind {
    let field = key.rsplit('.').next().unwrap_or(key).to_ascii_lowercase();
    const PERCENT: [&str; 4] = ["pct", "percentage", "projection", "breakeven"];
    const PLAIN: [&str; 4] = ["ratio", "lot", "multiplier", "time_us"];
    const MONEY: [&str; 9] = [
        "amount", "cost", "deposit", "balance", "share", "total_", "size", "withdraw", "profit",
    ];

    if PERCENT.iter().any(|p| field.contains(p)) {
        FigureKind::Percent
    } else if PLAIN.iter().any(|p| field.contains(p)) {
        FigureKind::Plain
    } else if MONEY.iter().any(|p| field.contains(p)) {
        FigureKind::Currency
    } else {
        FigureKind::Plain
    }
}

fn format_value(key: &str, value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match (figure_kind(key), n.as_f64()) {
            (FigureKind::Percent, Some(x)) => format_percent(x),
            (FigureKind::Currency, Some(x)) => format_currency(x),
            _ => n.to_string(),
        },
        Value::Bool(b) => b.to_string(),
        // serde_json writes NaN and infinities as null
        Value::Null => "N/A".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(|v| format_value(key, v)).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
