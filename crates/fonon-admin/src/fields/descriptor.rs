//! Declarative field descriptors
//!
//! A resource configuration lists its form fields as [`FieldDescriptor`]s. The
//! form session turns each descriptor into a controller when the form mounts.

use serde::Serialize;

/// Sentinel select value standing for "no selection".
pub const EMPTY_OPTION_VALUE: &str = "__empty__";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Language {
    Uz,
    Ru,
    En,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Uz, Language::Ru, Language::En];

    /// Suffix appended to a multilingual base name, e.g. `titleUz`.
    pub fn suffix(&self) -> &'static str {
        match self {
            Language::Uz => "Uz",
            Language::Ru => "Ru",
            Language::En => "En",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Language::Uz => "O‘zbekcha",
            Language::Ru => "Русский",
            Language::En => "English",
        }
    }

    pub fn field_name(&self, base_name: &str) -> String {
        format!("{}{}", base_name, self.suffix())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SimpleKind {
    #[default]
    Text,
    Number,
    Textarea,
    Date,
    Time,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleField {
    pub kind: SimpleKind,
    pub name: String,
    pub label: String,
    pub placeholder: Option<String>,
    pub required: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MultilingualKind {
    #[default]
    Text,
    Textarea,
    Editor,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MultilingualField {
    pub base_name: String,
    pub label: String,
    pub required: bool,
    pub kind: MultilingualKind,
    pub placeholder: Option<String>,
    /// Upload category for files embedded in editor content.
    pub upload_category: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrayValidation {
    Url,
    #[default]
    String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayField {
    pub name: String,
    pub label: String,
    pub item_label: Option<String>,
    pub placeholder: Option<String>,
    pub validation: ArrayValidation,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadMode {
    Single,
    #[default]
    Multiple,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaUploadField {
    pub name: String,
    pub label: String,
    pub upload_category: String,
    pub max_files: Option<usize>,
    pub accept: Option<String>,
    pub helper_text: Option<String>,
    pub mode: UploadMode,
    /// Sibling field whose value can switch this field to manual URL entry.
    pub media_type_field: Option<String>,
    /// Values of `media_type_field` that switch to manual entry.
    pub manual_input_when: Vec<String>,
    pub manual_input_placeholder: Option<String>,
    pub manual_input_helper_text: Option<String>,
    pub upload_button_label: Option<String>,
    pub counter_label: Option<String>,
}

impl MediaUploadField {
    /// Effective file limit: single mode always allows exactly one.
    pub fn resolved_max_files(&self) -> Option<usize> {
        match (self.max_files, self.mode) {
            (Some(max), _) => Some(max),
            (None, UploadMode::Single) => Some(1),
            (None, UploadMode::Multiple) => None,
        }
    }

    pub fn button_label(&self) -> &str {
        self.upload_button_label.as_deref().unwrap_or("Rasm")
    }

    pub fn counter_label(&self) -> &str {
        self.counter_label.as_deref().unwrap_or("rasm")
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLinksField {
    pub name: String,
    pub label: String,
    pub upload_category: String,
    pub helper_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectValueType {
    #[default]
    String,
    Number,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectField {
    pub name: String,
    pub label: String,
    pub placeholder: Option<String>,
    pub options: Vec<SelectOption>,
    pub value_type: SelectValueType,
    pub required: bool,
}

impl SelectField {
    /// Whether an option maps to "no selection".
    pub fn has_empty_option(&self) -> bool {
        self.options.iter().any(|o| o.value.is_empty())
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BooleanField {
    pub name: String,
    pub label: String,
}

/// One form field of a resource.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum FieldDescriptor {
    Simple(SimpleField),
    Multilingual(MultilingualField),
    Array(ArrayField),
    MediaUpload(MediaUploadField),
    SocialLinks(SocialLinksField),
    Select(SelectField),
    Boolean(BooleanField),
}

impl FieldDescriptor {
    pub fn text(name: &str, label: &str) -> Self {
        Self::simple(SimpleKind::Text, name, label)
    }

    pub fn number(name: &str, label: &str) -> Self {
        Self::simple(SimpleKind::Number, name, label)
    }

    pub fn textarea(name: &str, label: &str) -> Self {
        Self::simple(SimpleKind::Textarea, name, label)
    }

    pub fn date(name: &str, label: &str) -> Self {
        Self::simple(SimpleKind::Date, name, label)
    }

    pub fn time(name: &str, label: &str) -> Self {
        Self::simple(SimpleKind::Time, name, label)
    }

    pub fn boolean(name: &str, label: &str) -> Self {
        FieldDescriptor::Boolean(BooleanField {
            name: name.to_string(),
            label: label.to_string(),
        })
    }

    fn simple(kind: SimpleKind, name: &str, label: &str) -> Self {
        FieldDescriptor::Simple(SimpleField {
            kind,
            name: name.to_string(),
            label: label.to_string(),
            ..Default::default()
        })
    }

    /// Mark a simple, multilingual or select field as required.
    pub fn required(mut self) -> Self {
        match &mut self {
            FieldDescriptor::Simple(f) => f.required = true,
            FieldDescriptor::Multilingual(f) => f.required = true,
            FieldDescriptor::Select(f) => f.required = true,
            _ => {}
        }
        self
    }

    pub fn placeholder(mut self, placeholder: &str) -> Self {
        let value = Some(placeholder.to_string());
        match &mut self {
            FieldDescriptor::Simple(f) => f.placeholder = value,
            FieldDescriptor::Multilingual(f) => f.placeholder = value,
            FieldDescriptor::Array(f) => f.placeholder = value,
            FieldDescriptor::Select(f) => f.placeholder = value,
            _ => {}
        }
        self
    }

    /// Name of the form value (or base name for multilingual fields).
    pub fn key(&self) -> &str {
        match self {
            FieldDescriptor::Simple(f) => &f.name,
            FieldDescriptor::Multilingual(f) => &f.base_name,
            FieldDescriptor::Array(f) => &f.name,
            FieldDescriptor::MediaUpload(f) => &f.name,
            FieldDescriptor::SocialLinks(f) => &f.name,
            FieldDescriptor::Select(f) => &f.name,
            FieldDescriptor::Boolean(f) => &f.name,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            FieldDescriptor::Simple(f) => &f.label,
            FieldDescriptor::Multilingual(f) => &f.label,
            FieldDescriptor::Array(f) => &f.label,
            FieldDescriptor::MediaUpload(f) => &f.label,
            FieldDescriptor::SocialLinks(f) => &f.label,
            FieldDescriptor::Select(f) => &f.label,
            FieldDescriptor::Boolean(f) => &f.label,
        }
    }

    /// Form value names this field writes; multilingual fields expand per language.
    pub fn value_names(&self) -> Vec<String> {
        match self {
            FieldDescriptor::Multilingual(f) => Language::ALL
                .iter()
                .map(|lang| lang.field_name(&f.base_name))
                .collect(),
            other => vec![other.key().to_string()],
        }
    }

    /// Whether the field can upload files and therefore owns pending uploads.
    pub fn is_media_bearing(&self) -> bool {
        match self {
            FieldDescriptor::MediaUpload(_) | FieldDescriptor::SocialLinks(_) => true,
            FieldDescriptor::Multilingual(f) => f.kind == MultilingualKind::Editor,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multilingual_value_names() {
        let field = FieldDescriptor::Multilingual(MultilingualField {
            base_name: "title".to_string(),
            label: "Sarlavha".to_string(),
            ..Default::default()
        });
        assert_eq!(field.value_names(), vec!["titleUz", "titleRu", "titleEn"]);
        assert!(!field.is_media_bearing());
    }

    #[test]
    fn test_resolved_max_files() {
        let mut field = MediaUploadField {
            mode: UploadMode::Single,
            ..Default::default()
        };
        assert_eq!(field.resolved_max_files(), Some(1));
        field.mode = UploadMode::Multiple;
        assert_eq!(field.resolved_max_files(), None);
        field.max_files = Some(3);
        assert_eq!(field.resolved_max_files(), Some(3));
    }

    #[test]
    fn test_builder_helpers() {
        let field = FieldDescriptor::text("slug", "Slug")
            .required()
            .placeholder("about-us");
        match field {
            FieldDescriptor::Simple(f) => {
                assert!(f.required);
                assert_eq!(f.placeholder.as_deref(), Some("about-us"));
            }
            other => panic!("unexpected descriptor: {:?}", other),
        }
    }

    #[test]
    fn test_descriptor_serializes_with_type_tag() {
        let json = serde_json::to_value(FieldDescriptor::boolean("active", "Faol")).unwrap();
        assert_eq!(json["type"], "boolean");
        assert_eq!(json["name"], "active");
    }
}
