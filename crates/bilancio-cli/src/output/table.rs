use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                print_flat_object(map);
            }
        }
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", value),
    }
}

fn print_result_table(result: &Value, envelope: &Map<String, Value>) {
    match result {
        Value::Object(res_map) if res_map.contains_key("columns") => print_comparison(res_map),
        Value::Object(res_map) => print_flat_object(res_map),
        Value::Array(arr) => print_array_table(arr),
        other => println!("{}", format_value(other)),
    }

    // Labelled statement rows from `reclassify --rows`
    if let Some(Value::Array(rows)) = envelope.get("rows") {
        println!();
        print_array_table(rows);
    }
    if let Some(Value::Array(indicators)) = envelope.get("indicators") {
        println!();
        print_array_table(indicators);
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

/// One line per statement row, one column per fiscal column, then the
/// rating of each column.
fn print_comparison(result: &Map<String, Value>) {
    let columns = match result.get("columns") {
        Some(Value::Array(c)) => c,
        _ => return,
    };
    let mut header = vec!["".to_string()];
    header.extend(columns.iter().map(|c| field(c, "label")));

    let mut builder = Builder::default();
    builder.push_record(header);

    if let Some(Value::Array(rows)) = result.get("rows") {
        for row in rows {
            let label = row
                .get("row")
                .map(|r| field(r, "label"))
                .unwrap_or_default();
            let mut record = vec![label];
            if let Some(Value::Array(values)) = row.get("values") {
                record.extend(values.iter().map(|v| match v {
                    Value::Null => String::new(),
                    other => format_value(other),
                }));
            }
            builder.push_record(record);
        }
    }

    let mut rating = vec!["Rating".to_string()];
    rating.extend(columns.iter().map(|c| field(c, "rating")));
    builder.push_record(rating);

    println!("{}", Table::from(builder));
}

fn field(value: &Value, key: &str) -> String {
    value.get(key).map(format_value).unwrap_or_default()
}

fn print_flat_object(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &format_value(val)]);
    }
    println!("{}", Table::from(builder));
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
                    .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        println!("{}", Table::from(builder));
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
        Value::Null => "-".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
