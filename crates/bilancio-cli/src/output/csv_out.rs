use serde_json::{Map, Value};
use std::io;

type StdoutWriter<'a> = csv::Writer<io::StdoutLock<'a>>;

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) if result.contains_key("columns") => {
                write_comparison_csv(&mut wtr, result)
            }
            Some(Value::Object(result)) => {
                if let Some(Value::Array(indicators)) = map.get("indicators") {
                    write_array_csv(&mut wtr, indicators);
                } else if let Some(Value::Array(rows)) = map.get("rows") {
                    write_array_csv(&mut wtr, rows);
                } else {
                    write_fields(&mut wtr, result);
                }
            }
            Some(Value::Array(results)) => write_array_csv(&mut wtr, results),
            _ => write_fields(&mut wtr, map),
        },
        Value::Array(arr) => write_array_csv(&mut wtr, arr),
        _ => {
            let _ = wtr.write_record([&format_csv_value(value)]);
        }
    }

    let _ = wtr.flush();
}

fn write_fields(wtr: &mut StdoutWriter<'_>, map: &Map<String, Value>) {
    let _ = wtr.write_record(["field", "value"]);
    for (key, val) in map {
        let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
    }
}

/// `label,<column>...` with one record per statement row.
fn write_comparison_csv(wtr: &mut StdoutWriter<'_>, result: &Map<String, Value>) {
    let Some(Value::Array(columns)) = result.get("columns") else {
        return;
    };
    let mut header = vec!["label".to_string()];
    header.extend(
        columns
            .iter()
            .map(|c| c.get("label").map(format_csv_value).unwrap_or_default()),
    );
    let _ = wtr.write_record(&header);

    if let Some(Value::Array(rows)) = result.get("rows") {
        for row in rows {
            let mut record = vec![row
                .get("row")
                .and_then(|r| r.get("label"))
                .map(format_csv_value)
                .unwrap_or_default()];
            if let Some(Value::Array(values)) = row.get("values") {
                record.extend(values.iter().map(format_csv_value));
            }
            let _ = wtr.write_record(&record);
        }
    }
}

fn write_array_csv(wtr: &mut StdoutWriter<'_>, arr: &[Value]) {
    if arr.is_empty() {
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        let _ = wtr.write_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(*h).map(format_csv_value).unwrap_or_default())
                    .collect();
                let _ = wtr.write_record(&row);
            }
        }
    } else {
        for item in arr {
            let _ = wtr.write_record([&format_csv_value(item)]);
        }
    }
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
