//! Date formatting for table cells and date inputs.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

/// Placeholder shown in table cells for missing dates.
pub const EMPTY_CELL: &str = "—";

fn parse_date_time(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc).naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// `yyyy-MM-dd HH:mm`; the raw value when unparseable; `—` when empty.
pub fn format_date_time(value: Option<&str>) -> String {
    match value.filter(|v| !v.is_empty()) {
        None => EMPTY_CELL.to_string(),
        Some(raw) => parse_date_time(raw)
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| raw.to_string()),
    }
}

/// `yyyy-MM-dd`; the raw value when unparseable; `—` when empty.
pub fn format_date(value: Option<&str>) -> String {
    match value.filter(|v| !v.is_empty()) {
        None => EMPTY_CELL.to_string(),
        Some(raw) => parse_date_time(raw)
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| raw.to_string()),
    }
}

/// Backend timestamp to a date input value (`YYYY-MM-DD`, UTC).
pub fn to_date_input_value(value: Option<&str>) -> String {
    let trimmed = match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => return String::new(),
    };
    if let Some(dt) = parse_date_time(trimmed) {
        return dt.format("%Y-%m-%d").to_string();
    }
    match trimmed.get(..10) {
        Some(prefix) if NaiveDate::parse_from_str(prefix, "%Y-%m-%d").is_ok() => prefix.to_string(),
        _ => String::new(),
    }
}

/// Date input value to an offset date-time string for the backend.
pub fn to_offset_date_time_string(value: Option<&str>) -> Option<String> {
    let trimmed = value.map(str::trim).filter(|v| !v.is_empty())?;
    if trimmed.len() == 10 && NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").is_ok() {
        return Some(format!("{}T00:00:00Z", trimmed));
    }
    parse_date_time(trimmed).map(|dt| {
        dt.and_utc()
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_time_cells() {
        assert_eq!(format_date_time(Some("2024-03-05T14:07:00Z")), "2024-03-05 14:07");
        assert_eq!(format_date_time(Some("garbage")), "garbage");
        assert_eq!(format_date_time(None), "—");
        assert_eq!(format_date(Some("2024-03-05T23:59:00+00:00")), "2024-03-05");
    }

    #[test]
    fn date_input_round_trip() {
        let input = to_date_input_value(Some("2024-06-01T10:00:00+05:00"));
        assert_eq!(input, "2024-06-01");
        assert_eq!(
            to_offset_date_time_string(Some(&input)).as_deref(),
            Some("2024-06-01T00:00:00Z")
        );
        assert_eq!(to_date_input_value(Some("2024-06-01 junk")), "2024-06-01");
        assert_eq!(to_date_input_value(Some("  ")), "");
    }

    #[test]
    fn offset_string_normalises_timestamps() {
        assert_eq!(
            to_offset_date_time_string(Some("2024-06-01T10:00:00+05:00")).as_deref(),
            Some("2024-06-01T05:00:00.000Z")
        );
        assert_eq!(to_offset_date_time_string(Some("nope")), None);
        assert_eq!(to_offset_date_time_string(None), None);
    }
}
