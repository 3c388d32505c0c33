use serde_json::Value;
use std::io;

use super::flatten_object;

/// Write output as CSV to stdout. Write failures (a closed pipe, say) are
/// logged rather than aborting the command.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    if let Err(e) = write_csv(stdout.lock(), value) {
        tracing::warn!(error = %e, "failed to write CSV output");
    }
}

fn write_csv<W: io::Write>(out: W, value: &Value) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);

    match value {
        Value::Object(map) => {
            // Two-column CSV of the result (or the whole object): field, value
            let body = map.get("result").filter(|r| r.is_object()).unwrap_or(value);
            wtr.write_record(["field", "value"])?;
            for (key, val) in flatten_object(body) {
                wtr.write_record([key.as_str(), &format_csv_value(&val)])?;
            }
        }
        Value::Array(arr) => {
            write_array_csv(&mut wtr, arr)?;
        }
        _ => {
            wtr.write_record([&format_csv_value(value)])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

fn write_array_csv<W: io::Write>(wtr: &mut csv::Writer<W>, arr: &[Value]) -> csv::Result<()> {
    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        wtr.write_record(&headers)?;

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(*h).map(format_csv_value).unwrap_or_default())
                    .collect();
                wtr.write_record(&row)?;
            }
        }
    } else {
        for item in arr {
            wtr.write_record([&format_csv_value(item)])?;
        }
    }
    Ok(())
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lot_rows_to_csv() {
        let rows = serde_json::json!([
            { "propfirmLot": 5.0, "realAccountLot": 0.36 },
            { "propfirmLot": 4.0, "realAccountLot": 0.288 }
        ]);
        let mut wtr = csv::Writer::from_writer(Vec::new());
        write_array_csv(&mut wtr, rows.as_array().unwrap()).unwrap();
        let text = String::from_utf8(wtr.into_inner().unwrap()).unwrap();
        assert_eq!(text, "propfirmLot,realAccountLot\n5.0,0.36\n4.0,0.288\n");
    }

    #[test]
    fn test_result_object_to_field_value_rows() {
        let out = serde_json::json!({ "result": { "totals": { "roi_percentage": 72.5 } } });
        let mut buf = Vec::new();
        write_csv(&mut buf, &out).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "field,value\ntotals.roi_percentage,72.5\n");
    }

    struct ClosedPipe;

    impl io::Write for ClosedPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    #[test]
    fn test_write_error_is_returned() {
        let out = serde_json::json!({ "account_size": 100000.0 });
        assert!(write_csv(ClosedPipe, &out).is_err());
    }
}
