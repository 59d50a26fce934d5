//! Controllers for fields without uploads: plain inputs, string lists,
//! checkboxes and selects.

use fonon_core::{sanitize_absolute_url, AppError, AppResult, Record};
use serde_json::{Number, Value};

use super::descriptor::{
    ArrayField, ArrayValidation, BooleanField, SelectField, SelectOption, SelectValueType, SimpleField,
    SimpleKind, EMPTY_OPTION_VALUE,
};
use crate::values::{display_value, string_array, string_list};

/// Parse a numeric input. Empty or unparseable input is "no value".
pub fn parse_number(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if let Ok(int) = trimmed.parse::<i64>() {
        return Value::Number(int.into());
    }
    trimmed
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

#[derive(Debug, Clone)]
pub struct SimpleController {
    field: SimpleField,
}

impl SimpleController {
    pub fn new(field: SimpleField) -> Self {
        Self { field }
    }

    pub fn field(&self) -> &SimpleField {
        &self.field
    }

    /// Store the raw input; number inputs are parsed.
    pub fn set(&self, values: &mut Record, raw: &str) {
        let value = match self.field.kind {
            SimpleKind::Number => parse_number(raw),
            _ => Value::String(raw.to_string()),
        };
        values.insert(self.field.name.clone(), value);
    }

    /// Text shown in the input.
    pub fn input_value(&self, values: &Record) -> String {
        display_value(values.get(&self.field.name))
    }
}

#[derive(Debug, Clone)]
pub struct ArrayController {
    field: ArrayField,
}

impl ArrayController {
    pub fn new(field: ArrayField) -> Self {
        Self { field }
    }

    pub fn field(&self) -> &ArrayField {
        &self.field
    }

    pub fn items(&self, values: &Record) -> Vec<String> {
        string_list(values.get(&self.field.name))
    }

    /// Append the trimmed input. Blank input is ignored.
    pub fn add(&self, values: &mut Record, raw: &str) -> AppResult<()> {
        let item = raw.trim();
        if item.is_empty() {
            return Ok(());
        }
        if self.field.validation == ArrayValidation::Url && sanitize_absolute_url(Some(item)).is_none() {
            return Err(AppError::InvalidInput("URL noto‘g‘ri".to_string()));
        }
        let mut items = self.items(values);
        items.push(item.to_string());
        values.insert(self.field.name.clone(), string_array(&items));
        Ok(())
    }

    /// Remove the item at `index`; returns whether anything was removed.
    pub fn remove(&self, values: &mut Record, index: usize) -> bool {
        let mut items = self.items(values);
        if index >= items.len() {
            return false;
        }
        items.remove(index);
        values.insert(self.field.name.clone(), string_array(&items));
        true
    }
}

#[derive(Debug, Clone)]
pub struct BooleanController {
    field: BooleanField,
}

impl BooleanController {
    pub fn new(field: BooleanField) -> Self {
        Self { field }
    }

    pub fn field(&self) -> &BooleanField {
        &self.field
    }

    pub fn is_checked(&self, values: &Record) -> bool {
        matches!(values.get(&self.field.name), Some(Value::Bool(true)))
    }

    pub fn set(&self, values: &mut Record, checked: bool) {
        values.insert(self.field.name.clone(), Value::Bool(checked));
    }

    pub fn toggle(&self, values: &mut Record) -> bool {
        let checked = !self.is_checked(values);
        self.set(values, checked);
        checked
    }
}

#[derive(Debug, Clone)]
pub struct SelectController {
    field: SelectField,
}

impl SelectController {
    pub fn new(field: SelectField) -> Self {
        Self { field }
    }

    pub fn field(&self) -> &SelectField {
        &self.field
    }

    /// Option value currently selected, with the empty sentinel standing in
    /// for "nothing" when the field offers an empty option.
    pub fn selected(&self, values: &Record) -> String {
        let value = display_value(values.get(&self.field.name));
        if value.is_empty() && self.field.has_empty_option() {
            EMPTY_OPTION_VALUE.to_string()
        } else {
            value
        }
    }

    /// Replace the offered options, keeping a leading empty option when the
    /// new list has none.
    pub fn set_options(&mut self, options: Vec<SelectOption>) {
        let empty = self.field.options.iter().find(|o| o.value.is_empty()).cloned();
        let mut next: Vec<SelectOption> = match empty {
            Some(empty) if !options.iter().any(|o| o.value.is_empty()) => vec![empty],
            _ => Vec::new(),
        };
        next.extend(options);
        self.field.options = next;
    }

    pub fn choose(&self, values: &mut Record, option: &str) {
        let number = self.field.value_type == SelectValueType::Number;
        let value = if self.field.has_empty_option() && option == EMPTY_OPTION_VALUE {
            if number {
                Value::Null
            } else {
                Value::String(String::new())
            }
        } else if number {
            parse_number(option)
        } else {
            Value::String(option.to_string())
        };
        values.insert(self.field.name.clone(), value);
    }
}
