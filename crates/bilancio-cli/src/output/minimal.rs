use serde_json::Value;

/// Headline value per command, as JSON pointers into the `result` object:
/// classify, score, indicators, annualize, reclassify, project.
const HEADLINE_POINTERS: [&str; 7] = [
    "/rating",
    "/oltre_count",
    "/dscr",
    "/factor",
    "/income/net_profit",
    "/income/aggregates/net_profit",
    "/forecast_year",
];

/// Print the headline value of a command's output.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_line(value));
}

fn minimal_line(value: &Value) -> String {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Some(headline) = HEADLINE_POINTERS
        .iter()
        .filter_map(|p| result.pointer(p))
        .find(|v| !v.is_null())
    {
        return format_minimal(headline);
    }

    match result {
        // Multi-year projections: one line per forecast year.
        Value::Array(items) => items
            .iter()
            .map(minimal_line)
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Object(map) => map
            .iter()
            .next()
            .map(|(key, val)| format!("{key}: {}", format_minimal(val)))
            .unwrap_or_default(),
        other => format_minimal(other),
    }
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rating_wins() {
        let v = json!({ "result": { "rating": "B2", "oltre_count": 4 } });
        assert_eq!(minimal_line(&v), "B2");
    }

    #[test]
    fn test_reclassify_reports_net_profit() {
        let v = json!({
            "result": {
                "income": { "ebitda": "120000", "net_profit": "45000" },
                "balance": { "ccn": "10000" }
            }
        });
        assert_eq!(minimal_line(&v), "45000");
    }

    #[test]
    fn test_projection_reports_net_profit() {
        let v = json!({
            "result": {
                "forecast_year": 2025,
                "income": { "aggregates": { "net_profit": "280000" } }
            }
        });
        assert_eq!(minimal_line(&v), "280000");
    }

    #[test]
    fn test_multi_year_one_line_per_year() {
        let v = json!({
            "result": [
                { "forecast_year": 2025, "income": { "aggregates": { "net_profit": "1" } } },
                { "forecast_year": 2026, "income": { "aggregates": { "net_profit": "2" } } }
            ]
        });
        assert_eq!(minimal_line(&v), "1\n2");
    }

    #[test]
    fn test_falls_back_to_first_field() {
        let v = json!({ "result": { "sectors": ["manifattura"] } });
        assert_eq!(minimal_line(&v), "sectors: [\"manifattura\"]");
    }
}
