use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Time of day as the backend serialises it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalTime {
    #[serde(default)]
    pub hour: u32,
    #[serde(default)]
    pub minute: u32,
    #[serde(default)]
    pub second: u32,
    #[serde(default)]
    pub nano: u32,
}

impl LocalTime {
    /// Parse an `HH:MM` form value. Missing minutes count as zero.
    pub fn parse(value: &str) -> Option<Self> {
        if value.is_empty() {
            return None;
        }
        let mut parts = value.split(':');
        let hour = parse_component(parts.next())?;
        let minute = parse_component(parts.next())?;
        Some(Self {
            hour,
            minute,
            second: 0,
            nano: 0,
        })
    }

    pub fn to_form_string(&self) -> String {
        format!("{:02}:{:02}", self.hour, self.minute)
    }
}

fn parse_component(raw: Option<&str>) -> Option<u32> {
    match raw.map(str::trim) {
        None | Some("") => Some(0),
        Some(s) => s.parse().ok(),
    }
}

/// Render a backend time value (structured or `H:M` string) as `HH:MM`.
///
/// Returns an empty string for missing values.
pub fn local_time_to_string(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => string_time_to_form(s),
        Some(other) => serde_json::from_value::<LocalTime>(other.clone())
            .map(|t| t.to_form_string())
            .unwrap_or_default(),
    }
}

fn string_time_to_form(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    let mut parts = value.split(':');
    let hour_raw = parts.next().unwrap_or("").trim();
    let minute_raw = parts.next().unwrap_or("").trim();
    if hour_raw.is_empty() {
        return String::new();
    }
    let minute_raw = if minute_raw.is_empty() { "0" } else { minute_raw };
    format!("{}:{}", last_two_padded(hour_raw), last_two_padded(minute_raw))
}

fn last_two_padded(value: &str) -> String {
    let padded = format!("{:0>2}", value);
    let chars: Vec<char> = padded.chars().collect();
    chars[chars.len() - 2..].iter().collect()
}
