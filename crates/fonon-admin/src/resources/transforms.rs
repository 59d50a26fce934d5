//! Record ↔ form value conversions for resources whose backend shape differs
//! from their form shape.

use fonon_core::formatters::{to_date_input_value, to_offset_date_time_string};
use fonon_core::models::time::local_time_to_string;
use fonon_core::{LocalTime, Record};
use serde_json::{json, Value};

use crate::fields::social_links::read_social_links;
use crate::values::{get_non_empty, get_str, record_id, set_optional, string_array, string_list};

fn string_or_empty(record: &Record, key: &str) -> Value {
    Value::String(get_str(record, key).unwrap_or_default().to_string())
}

fn non_empty_strings(value: Option<&Value>) -> Value {
    let items: Vec<String> = string_list(value)
        .into_iter()
        .filter(|item| !item.is_empty())
        .collect();
    string_array(&items)
}

fn copy_strings(source: &Record, target: &mut Record, keys: &[&str]) {
    for key in keys {
        target.insert(key.to_string(), string_or_empty(source, key));
    }
}

/// `{base}Uz` required, `{base}Ru`/`{base}En` only when non-empty.
fn put_multilingual(values: &Record, payload: &mut Record, base: &str) -> String {
    let uz = get_str(values, &format!("{base}Uz")).unwrap_or_default().to_string();
    payload.insert(format!("{base}Uz"), Value::String(uz.clone()));
    for suffix in ["Ru", "En"] {
        let key = format!("{base}{suffix}");
        set_optional(payload, &key, get_non_empty(values, &key));
    }
    uz
}

pub fn about_form_values(record: &Record) -> Record {
    let mut values: Record = record
        .iter()
        .filter(|(key, _)| !matches!(key.as_str(), "body_uz" | "body_ru" | "body_en"))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    for (camel, snake) in [("bodyUz", "body_uz"), ("bodyRu", "body_ru"), ("bodyEn", "body_en")] {
        let body = get_str(record, camel)
            .or_else(|| get_str(record, snake))
            .unwrap_or_default();
        values.insert(camel.to_string(), Value::String(body.to_string()));
    }
    values.insert("slug".to_string(), string_or_empty(record, "slug"));
    values
}

/// Bodies are sent under both spellings; older backends read `body_uz`.
pub fn about_payload(values: &Record, _original: Option<&Record>) -> Record {
    let mut payload = Record::new();
    put_multilingual(values, &mut payload, "title");
    let body_uz = put_multilingual(values, &mut payload, "body");
    payload.insert("slug".to_string(), string_or_empty(values, "slug"));
    payload.insert("body_uz".to_string(), Value::String(body_uz));
    set_optional(&mut payload, "body_ru", get_non_empty(values, "bodyRu"));
    set_optional(&mut payload, "body_en", get_non_empty(values, "bodyEn"));
    payload.insert("images".to_string(), string_array(&string_list(values.get("images"))));
    payload
}

const TITLE_BODY_KEYS: [&str; 6] = ["titleUz", "titleRu", "titleEn", "bodyUz", "bodyRu", "bodyEn"];

pub fn news_form_values(record: &Record) -> Record {
    let mut values = Record::new();
    copy_strings(record, &mut values, &TITLE_BODY_KEYS);
    values.insert("images".to_string(), non_empty_strings(record.get("images")));
    values.insert(
        "publishedAt".to_string(),
        Value::String(to_date_input_value(get_str(record, "publishedAt"))),
    );
    values
}

pub fn news_payload(values: &Record, _original: Option<&Record>) -> Record {
    let mut payload = Record::new();
    put_multilingual(values, &mut payload, "title");
    put_multilingual(values, &mut payload, "body");
    payload.insert("images".to_string(), string_array(&string_list(values.get("images"))));
    set_optional(
        &mut payload,
        "publishedAt",
        to_offset_date_time_string(get_str(values, "publishedAt")),
    );
    payload
}

pub fn gallery_form_values(record: &Record) -> Record {
    let mut values = Record::new();
    copy_strings(record, &mut values, &["title", "url"]);
    let media_type = get_str(record, "mediaType")
        .map(str::to_lowercase)
        .unwrap_or_else(|| "image".to_string());
    values.insert("mediaType".to_string(), Value::String(media_type));
    values
}

pub fn gallery_payload(values: &Record, _original: Option<&Record>) -> Record {
    let mut payload = Record::new();
    copy_strings(values, &mut payload, &["title", "url"]);
    let media_type = get_str(values, "mediaType")
        .map(str::to_lowercase)
        .filter(|kind| kind == "image" || kind == "video");
    set_optional(&mut payload, "mediaType", media_type);
    payload
}

pub fn journal_form_values(record: &Record) -> Record {
    let mut values = Record::new();
    copy_strings(record, &mut values, &["image"]);
    values
}

pub fn journal_payload(values: &Record, _original: Option<&Record>) -> Record {
    let mut payload = Record::new();
    copy_strings(values, &mut payload, &["image"]);
    payload
}

pub fn famous_form_values(record: &Record) -> Record {
    let mut values = Record::new();
    copy_strings(record, &mut values, &TITLE_BODY_KEYS);
    copy_strings(record, &mut values, &["slug"]);
    values.insert("images".to_string(), non_empty_strings(record.get("images")));
    values
}

pub fn famous_payload(values: &Record, _original: Option<&Record>) -> Record {
    let mut payload = Record::new();
    put_multilingual(values, &mut payload, "title");
    put_multilingual(values, &mut payload, "body");
    payload.insert("images".to_string(), string_array(&string_list(values.get("images"))));
    payload.insert("slug".to_string(), string_or_empty(values, "slug"));
    payload
}

/// Stored social entries are JSON strings; rows with neither half are dropped.
pub fn contacts_form_values(record: &Record) -> Record {
    let mut values = Record::new();
    copy_strings(record, &mut values, &["phoneNumber", "email", "address"]);
    let links: Vec<Value> = read_social_links(record.get("socialMedia"))
        .into_iter()
        .filter(|link| !link.platform.is_empty() || !link.link.is_empty())
        .map(|link| link.to_value())
        .collect();
    values.insert("socialMedia".to_string(), Value::Array(links));
    values
}

/// Only complete rows are sent, each serialised as a JSON string.
pub fn contacts_payload(values: &Record, _original: Option<&Record>) -> Record {
    let mut payload = Record::new();
    copy_strings(values, &mut payload, &["phoneNumber", "email", "address"]);
    let entries: Vec<Value> = match values.get("socialMedia") {
        Some(Value::Array(items)) => items
            .iter()
            .filter(|item| item.is_object())
            .map(crate::fields::SocialLink::from_value)
            .filter(|link| !link.platform.is_empty() && !link.link.is_empty())
            .map(|link| Value::String(link.to_value().to_string()))
            .collect(),
        _ => Vec::new(),
    };
    payload.insert("socialMedia".to_string(), Value::Array(entries));
    payload
}

pub fn locations_form_values(record: &Record) -> Record {
    let mut values = record.clone();
    for key in ["openTime", "closeTime"] {
        values.insert(key.to_string(), Value::String(local_time_to_string(record.get(key))));
    }
    for key in ["workDays", "images"] {
        let list = match record.get(key) {
            Some(Value::Array(items)) => Value::Array(items.clone()),
            _ => Value::Array(Vec::new()),
        };
        values.insert(key.to_string(), list);
    }
    values.insert("mapTag".to_string(), string_or_empty(record, "mapTag"));
    values
}

pub fn locations_payload(values: &Record, _original: Option<&Record>) -> Record {
    let mut payload = Record::new();
    put_multilingual(values, &mut payload, "name");
    set_optional(&mut payload, "mapTag", get_non_empty(values, "mapTag"));
    payload.insert("address".to_string(), string_or_empty(values, "address"));
    payload.insert("workDays".to_string(), string_array(&string_list(values.get("workDays"))));
    payload.insert("images".to_string(), string_array(&string_list(values.get("images"))));
    set_optional(&mut payload, "openTime", get_non_empty(values, "openTime"));
    set_optional(&mut payload, "closeTime", get_non_empty(values, "closeTime"));
    payload
}

/// Id of a nested `{ "id": .. }` reference, falling back to a flat `{key}Id`.
fn reference_id(record: &Record, key: &str) -> Value {
    let flat = || {
        match record.get(&format!("{key}Id"))? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
        .filter(|id| *id != 0)
    };
    record
        .get(key)
        .and_then(Value::as_object)
        .and_then(record_id)
        .or_else(flat)
        .map(Value::from)
        .unwrap_or(Value::Null)
}

/// Send a picked id as `{ "id": .. }` under `key`; nothing picked sends nothing.
fn put_reference(values: &Record, payload: &mut Record, field: &str, key: &str) {
    if let Some(id) = values.get(field).and_then(Value::as_i64).filter(|id| *id != 0) {
        payload.insert(key.to_string(), json!({ "id": id }));
    }
}

fn put_optional_strings(values: &Record, payload: &mut Record, keys: &[&str]) {
    for key in keys {
        set_optional(payload, key, get_non_empty(values, key));
    }
}

pub fn nav_item_form_values(record: &Record) -> Record {
    let mut values = Record::new();
    copy_strings(record, &mut values, &["nameUz", "nameRu", "nameEn", "slug"]);
    values.insert("parentId".to_string(), reference_id(record, "parent"));
    values
}

pub fn nav_item_payload(values: &Record, _original: Option<&Record>) -> Record {
    let mut payload = Record::new();
    put_multilingual(values, &mut payload, "name");
    payload.insert("slug".to_string(), string_or_empty(values, "slug"));
    put_reference(values, &mut payload, "parentId", "parent");
    payload
}

pub fn nav_item_product_form_values(record: &Record) -> Record {
    let mut values = Record::new();
    values.insert("navItemId".to_string(), reference_id(record, "navitem"));
    values.insert("parentId".to_string(), reference_id(record, "parent"));
    copy_strings(record, &mut values, &["img", "link"]);
    values
}

pub fn nav_item_product_payload(values: &Record, _original: Option<&Record>) -> Record {
    let mut payload = Record::new();
    put_reference(values, &mut payload, "navItemId", "navitem");
    put_reference(values, &mut payload, "parentId", "parent");
    put_optional_strings(values, &mut payload, &["img", "link"]);
    payload
}

pub fn appointment_service_form_values(record: &Record) -> Record {
    let mut values = Record::new();
    values.insert("appointmentId".to_string(), reference_id(record, "appointment"));
    values.insert("locationId".to_string(), reference_id(record, "location"));
    copy_strings(
        record,
        &mut values,
        &[
            "titleUz",
            "titleRu",
            "titleEn",
            "descriptionUz",
            "descriptionRu",
            "descriptionEn",
            "date",
        ],
    );
    values.insert("time".to_string(), Value::String(local_time_to_string(record.get("time"))));
    values
}

/// The time goes out in the backend's structured shape.
pub fn appointment_service_payload(values: &Record, _original: Option<&Record>) -> Record {
    let mut payload = Record::new();
    put_reference(values, &mut payload, "appointmentId", "appointment");
    put_reference(values, &mut payload, "locationId", "location");
    put_multilingual(values, &mut payload, "title");
    put_optional_strings(values, &mut payload, &["descriptionUz", "descriptionRu", "descriptionEn"]);
    payload.insert("date".to_string(), string_or_empty(values, "date"));
    if let Some(time) = get_str(values, "time").and_then(LocalTime::parse) {
        if let Ok(value) = serde_json::to_value(time) {
            payload.insert("time".to_string(), value);
        }
    }
    payload
}

pub fn client_details_form_values(record: &Record) -> Record {
    let mut values = Record::new();
    values.insert("serviceId".to_string(), reference_id(record, "service"));
    copy_strings(
        record,
        &mut values,
        &["firstname", "lastname", "email", "phoneNumber", "address", "comment"],
    );
    values
}

pub fn client_details_payload(values: &Record, _original: Option<&Record>) -> Record {
    let mut payload = Record::new();
    put_reference(values, &mut payload, "serviceId", "service");
    copy_strings(values, &mut payload, &["firstname", "lastname", "email", "phoneNumber"]);
    put_optional_strings(values, &mut payload, &["address", "comment"]);
    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_about_reads_snake_case_bodies() {
        let values = about_form_values(&record(json!({
            "id": 1,
            "titleUz": "Biz haqimizda",
            "body_uz": "<p>Matn</p>",
            "bodyRu": "<p>Текст</p>",
            "body_ru": "<p>old</p>"
        })));
        assert_eq!(values["bodyUz"], json!("<p>Matn</p>"));
        assert_eq!(values["bodyRu"], json!("<p>Текст</p>"));
        assert_eq!(values["bodyEn"], json!(""));
        assert_eq!(values["slug"], json!(""));
        assert!(!values.contains_key("body_uz"));
        assert_eq!(values["id"], json!(1));
    }

    #[test]
    fn test_about_payload_sends_both_spellings() {
        let payload = about_payload(
            &record(json!({
                "titleUz": "Sarlavha",
                "bodyUz": "<p>a</p>",
                "bodyEn": "<p>b</p>",
                "slug": "about",
                "images": ["/files/a.png"]
            })),
            None,
        );
        assert_eq!(payload["body_uz"], json!("<p>a</p>"));
        assert_eq!(payload["body_en"], json!("<p>b</p>"));
        assert!(!payload.contains_key("titleRu"));
        assert!(!payload.contains_key("body_ru"));
        assert_eq!(payload["images"], json!(["/files/a.png"]));
    }

    #[test]
    fn test_news_dates_round_trip() {
        let values = news_form_values(&record(json!({
            "titleUz": "Yangilik",
            "images": ["/files/a.png", "", 5],
            "publishedAt": "2024-05-01T10:30:00+05:00"
        })));
        assert_eq!(values["publishedAt"], json!("2024-05-01"));
        assert_eq!(values["images"], json!(["/files/a.png"]));

        let payload = news_payload(&values, None);
        assert_eq!(payload["publishedAt"], json!("2024-05-01T00:00:00Z"));

        let mut cleared = values.clone();
        cleared.insert("publishedAt".into(), json!(""));
        assert!(!news_payload(&cleared, None).contains_key("publishedAt"));
    }

    #[test]
    fn test_gallery_media_type() {
        let values = gallery_form_values(&record(json!({"title": "A", "mediaType": "VIDEO"})));
        assert_eq!(values["mediaType"], json!("video"));
        assert_eq!(values["url"], json!(""));

        let payload = gallery_payload(&record(json!({"title": "A", "url": "u", "mediaType": "audio"})), None);
        assert!(!payload.contains_key("mediaType"));
    }

    #[test]
    fn test_contacts_social_entries() {
        let values = contacts_form_values(&record(json!({
            "phoneNumber": "+998",
            "socialMedia": [
                "{\"platform\":\"/files/tg.png\",\"link\":\"https://t.me/fonon\"}",
                "/files/legacy.png",
                {"platform": "", "link": ""}
            ]
        })));
        assert_eq!(
            values["socialMedia"],
            json!([
                {"platform": "/files/tg.png", "link": "https://t.me/fonon"},
                {"platform": "/files/legacy.png", "link": ""}
            ])
        );

        let payload = contacts_payload(&values, None);
        let entries = payload["socialMedia"].as_array().unwrap();
        assert_eq!(entries.len(), 1);
        let decoded: Value = serde_json::from_str(entries[0].as_str().unwrap()).unwrap();
        assert_eq!(decoded, json!({"platform": "/files/tg.png", "link": "https://t.me/fonon"}));
    }

    #[test]
    fn test_locations_times_and_optional_fields() {
        let values = locations_form_values(&record(json!({
            "id": 2,
            "nameUz": "Chilonzor",
            "openTime": {"hour": 9, "minute": 5},
            "closeTime": "18:0",
            "workDays": null
        })));
        assert_eq!(values["openTime"], json!("09:05"));
        assert_eq!(values["closeTime"], json!("18:00"));
        assert_eq!(values["workDays"], json!([]));
        assert_eq!(values["mapTag"], json!(""));

        let payload = locations_payload(&values, None);
        assert_eq!(payload["openTime"], json!("09:05"));
        assert!(!payload.contains_key("mapTag"));
        assert!(!payload.contains_key("nameRu"));
        assert_eq!(payload["address"], json!(""));
    }

    #[test]
    fn test_nav_item_parent_reference() {
        let values = nav_item_form_values(&record(json!({
            "id": 4,
            "nameUz": "Kurslar",
            "slug": "kurslar",
            "parent": {"id": 1, "nameUz": "Asosiy"},
            "children": []
        })));
        assert_eq!(values["parentId"], json!(1));
        assert_eq!(values["nameRu"], json!(""));

        let payload = nav_item_payload(&values, None);
        assert_eq!(payload["parent"], json!({"id": 1}));
        assert_eq!(payload["slug"], json!("kurslar"));
        assert!(!payload.contains_key("parentId"));

        let root = nav_item_form_values(&record(json!({"nameUz": "Bosh", "slug": "bosh"})));
        assert_eq!(root["parentId"], Value::Null);
        assert!(!nav_item_payload(&root, None).contains_key("parent"));
    }

    #[test]
    fn test_nav_item_product_references() {
        let values = nav_item_product_form_values(&record(json!({
            "id": 9,
            "navitem": {"id": 3},
            "parentId": "5",
            "img": "https://cdn.fonon.uz/files/p.png"
        })));
        assert_eq!(values["navItemId"], json!(3));
        assert_eq!(values["parentId"], json!(5));
        assert_eq!(values["link"], json!(""));

        let payload = nav_item_product_payload(&values, None);
        assert_eq!(payload["navitem"], json!({"id": 3}));
        assert_eq!(payload["parent"], json!({"id": 5}));
        assert!(!payload.contains_key("link"));
    }

    #[test]
    fn test_appointment_service_time_shape() {
        let values = appointment_service_form_values(&record(json!({
            "appointment": {"id": 2, "titleUz": "Maslahat"},
            "location": {"id": 6},
            "titleUz": "Seans",
            "date": "2024-06-01",
            "time": {"hour": 14, "minute": 30, "second": 0, "nano": 0}
        })));
        assert_eq!(values["time"], json!("14:30"));
        assert_eq!(values["appointmentId"], json!(2));

        let payload = appointment_service_payload(&values, None);
        assert_eq!(payload["appointment"], json!({"id": 2}));
        assert_eq!(payload["location"], json!({"id": 6}));
        assert_eq!(payload["time"], json!({"hour": 14, "minute": 30, "second": 0, "nano": 0}));
        assert!(!payload.contains_key("descriptionUz"));
    }

    #[test]
    fn test_client_details_service_reference() {
        let values = client_details_form_values(&record(json!({
            "service": {"id": 11, "titleUz": "Seans"},
            "firstname": "Ali",
            "lastname": "Valiyev",
            "email": "ali@fonon.uz",
            "phoneNumber": "+998"
        })));
        let payload = client_details_payload(&values, None);
        assert_eq!(payload["service"], json!({"id": 11}));
        assert_eq!(payload["firstname"], json!("Ali"));
        assert!(!payload.contains_key("comment"));
    }
}
