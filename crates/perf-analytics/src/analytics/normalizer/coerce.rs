use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};

/// Number or decimal string (`.` or `,` separator). Everything else,
/// including non-finite values, is `0`.
pub fn coerce_score(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => parse_decimal(raw),
        _ => None,
    };

    parsed.filter(|score| score.is_finite()).unwrap_or(0.0)
}

fn parse_decimal(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    trimmed.replace(',', ".").parse::<f64>().ok()
}

/// Non-empty trimmed text; numeric identifiers are rendered as strings.
pub(crate) fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(raw) => {
            let trimmed = raw.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

pub(crate) fn first_text(record: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| text(record.get(*key)))
}

/// Accepts ISO dates, RFC 3339 and naive timestamps, `DD/MM/YYYY`, `YYYY-MM`
/// and Firestore timestamp objects (`seconds` / `_seconds`).
pub(crate) fn parse_date(value: Option<&Value>) -> Option<NaiveDate> {
    match value? {
        Value::String(raw) => parse_date_str(raw),
        Value::Object(fields) => {
            let seconds = fields
                .get("seconds")
                .or_else(|| fields.get("_seconds"))
                .and_then(Value::as_i64)?;
            DateTime::from_timestamp(seconds, 0).map(|dt| dt.date_naive())
        }
        _ => None,
    }
}

pub(crate) fn parse_date_str(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Calendar date as written in the document; the offset is not applied.
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }

    for format in ["%Y-%m-%d", "%d/%m/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }

    NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d").ok()
}

/// Lowercased, whitespace-collapsed name used as a matching key.
pub(crate) fn normalize_name(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_lowercase()
}
