//! Helpers over form values and backend records.

use fonon_core::Record;
use serde_json::Value;

/// String value of a key, when it holds a string.
pub fn get_str<'a>(record: &'a Record, key: &str) -> Option<&'a str> {
    record.get(key).and_then(Value::as_str)
}

/// Non-empty string value of a key.
pub fn get_non_empty(record: &Record, key: &str) -> Option<String> {
    get_str(record, key)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// String value of the first key that holds a non-empty string.
pub fn first_non_empty(record: &Record, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| get_non_empty(record, key))
}

pub fn get_bool(record: &Record, key: &str) -> Option<bool> {
    record.get(key).and_then(Value::as_bool)
}

/// Strings held by an array value; a lone non-empty string counts as one item.
pub fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        Some(Value::String(s)) if !s.is_empty() => vec![s.clone()],
        _ => Vec::new(),
    }
}

pub fn string_array(items: &[String]) -> Value {
    Value::Array(items.iter().cloned().map(Value::String).collect())
}

/// Insert the value when present, remove the key otherwise.
pub fn set_optional(record: &mut Record, key: &str, value: Option<String>) {
    match value {
        Some(v) => {
            record.insert(key.to_string(), Value::String(v));
        }
        None => {
            record.remove(key);
        }
    }
}

/// Numeric record id; zero and non-numeric ids count as absent.
pub fn record_id(record: &Record) -> Option<i64> {
    let id = match record.get("id")? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }?;
    (id != 0).then_some(id)
}

/// Drop empty values from a validated payload before it is sent.
///
/// Empty strings and nulls become absent, empty strings inside arrays are
/// removed. Non-finite numbers cannot exist in JSON, so there is nothing to
/// strip for them here; the number parsers never produce them.
pub fn sanitize_payload(values: Record) -> Record {
    values
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::Null => None,
            Value::String(s) if s.is_empty() => None,
            Value::Array(items) => Some((
                key,
                Value::Array(
                    items
                        .into_iter()
                        .filter(|item| !matches!(item, Value::String(s) if s.is_empty()))
                        .collect(),
                ),
            )),
            other => Some((key, other)),
        })
        .collect()
}

/// Merge a record's form values over the defaults, replacing nulls with an
/// empty value shaped like the default.
pub fn normalize_form_values(defaults: &Record, source: Record) -> Record {
    let mut merged = defaults.clone();
    merged.extend(source);

    merged
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                Value::Null => match defaults.get(&key) {
                    Some(Value::Array(_)) => Value::Array(Vec::new()),
                    Some(Value::Bool(b)) => Value::Bool(*b),
                    Some(Value::Number(n)) => Value::Number(n.clone()),
                    _ => Value::String(String::new()),
                },
                other => other,
            };
            (key, value)
        })
        .collect()
}

/// Plain text rendering of a value for table cells.
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
    }
}
