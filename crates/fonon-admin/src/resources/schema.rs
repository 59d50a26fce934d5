//! Form schemas
//!
//! Each resource validates its form values through a typed struct: serde
//! does the shape check and `validator` the field rules. Failures come back
//! as [`FieldIssue`]s addressed by dotted camelCase paths, e.g.
//! `socialMedia.0.link`.

use std::marker::PhantomData;

use fonon_core::{FieldIssue, Record};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

/// Validates form values and produces the typed, stripped output.
pub trait FormSchema: Send + Sync {
    fn parse(&self, values: &Record) -> Result<Record, Vec<FieldIssue>>;
}

/// Schema backed by a serde + validator struct.
pub struct TypedSchema<T>(PhantomData<fn() -> T>);

impl<T> TypedSchema<T> {
    pub const fn new() -> Self {
        TypedSchema(PhantomData)
    }
}

impl<T> Default for TypedSchema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FormSchema for TypedSchema<T>
where
    T: DeserializeOwned + Serialize + Validate,
{
    fn parse(&self, values: &Record) -> Result<Record, Vec<FieldIssue>> {
        let typed: T = serde_json::from_value(Value::Object(values.clone()))
            .map_err(|err| vec![FieldIssue::root(err.to_string())])?;

        typed.validate().map_err(|errors| validation_issues(&errors))?;

        match serde_json::to_value(&typed) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(vec![FieldIssue::root("Form did not serialize to an object")]),
            Err(err) => Err(vec![FieldIssue::root(err.to_string())]),
        }
    }
}

/// Flatten validator errors into path-addressed issues, sorted by path.
pub fn validation_issues(errors: &ValidationErrors) -> Vec<FieldIssue> {
    let mut issues = Vec::new();
    collect_issues(None, errors, &mut issues);
    if issues.is_empty() {
        issues.push(FieldIssue::root("Maʼlumotlarni tekshiring"));
    }
    issues.sort_by(|a, b| a.path.cmp(&b.path));
    issues
}

fn collect_issues(prefix: Option<&str>, errors: &ValidationErrors, out: &mut Vec<FieldIssue>) {
    for (field, kind) in errors.errors() {
        let segment = to_form_path(field.as_ref());
        let path = match prefix {
            Some(prefix) => format!("{}.{}", prefix, segment),
            None => segment,
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    out.push(FieldIssue::new(path.clone(), error_message(error)));
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_issues(Some(&path), nested, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    let item_path = format!("{}.{}", path, index);
                    collect_issues(Some(&item_path), nested, out);
                }
            }
        }
    }
}

fn error_message(error: &ValidationError) -> String {
    error
        .message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| error.code.to_string())
}

/// `title_uz` → `titleUz`; struct-level errors land on `root`.
fn to_form_path(field: &str) -> String {
    if field == "__all__" {
        return "root".to_string();
    }
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Every item of a string list must be non-empty.
pub fn non_empty_items(items: &[String]) -> Result<(), ValidationError> {
    if items.iter().any(|item| item.is_empty()) {
        return Err(ValidationError::new("empty_item"));
    }
    Ok(())
}

/// Numbers typed into forms: numbers, numeric strings, or nothing.
pub fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    })
}

/// Record ids picked in a select: numbers or numeric strings. Blank,
/// zero and unparseable input mean "nothing picked".
pub fn lenient_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let id = match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    Ok(id.filter(|id| *id != 0))
}

/// Write whole numbers as integers so stored amounts keep their shape.
pub fn whole_number<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(v) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => serializer.serialize_i64(*v as i64),
        Some(v) => serializer.serialize_f64(*v),
        None => serializer.serialize_none(),
    }
}
