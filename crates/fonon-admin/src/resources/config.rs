//! Resource configuration types.

use std::fmt;
use std::str::FromStr;

use fonon_core::formatters::{format_date, format_date_time};
use fonon_core::models::time::local_time_to_string;
use fonon_core::{AppError, Record};
use serde::Serialize;
use serde_json::Value;

use super::relations::{flatten_tree, indent_label, OptionSource};
use super::schema::FormSchema;
use crate::fields::FieldDescriptor;
use crate::values::{display_value, get_bool, get_str, string_list};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKey {
    About,
    News,
    Gallery,
    Journal,
    Famous,
    Contacts,
    Locations,
    UserEmails,
    Vacancies,
    JobRequests,
    NavItems,
    NavItemProducts,
    Appointments,
    AppointmentServices,
    ClientDetails,
}

impl ResourceKey {
    pub const ALL: [ResourceKey; 15] = [
        ResourceKey::About,
        ResourceKey::News,
        ResourceKey::Gallery,
        ResourceKey::Journal,
        ResourceKey::Famous,
        ResourceKey::Contacts,
        ResourceKey::Locations,
        ResourceKey::UserEmails,
        ResourceKey::Vacancies,
        ResourceKey::JobRequests,
        ResourceKey::NavItems,
        ResourceKey::NavItemProducts,
        ResourceKey::Appointments,
        ResourceKey::AppointmentServices,
        ResourceKey::ClientDetails,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            ResourceKey::About => "about",
            ResourceKey::News => "news",
            ResourceKey::Gallery => "gallery",
            ResourceKey::Journal => "journal",
            ResourceKey::Famous => "famous",
            ResourceKey::Contacts => "contacts",
            ResourceKey::Locations => "locations",
            ResourceKey::UserEmails => "user-emails",
            ResourceKey::Vacancies => "vacancies",
            ResourceKey::JobRequests => "job-requests",
            ResourceKey::NavItems => "nav-items",
            ResourceKey::NavItemProducts => "nav-item-products",
            ResourceKey::Appointments => "appointments",
            ResourceKey::AppointmentServices => "appointment-services",
            ResourceKey::ClientDetails => "client-details",
        }
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ResourceKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceKey::ALL
            .into_iter()
            .find(|key| key.slug() == s)
            .ok_or_else(|| AppError::UnknownResource(s.to_string()))
    }
}

/// How a table cell renders its value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CellFormat {
    #[default]
    Plain,
    DateTime,
    Date,
    LocalTime,
    JoinList,
    YesNo,
    MediaKindLabel,
    /// A string inside the nested object under the column key.
    Nested(&'static str),
    /// Plain text indented by the record's depth in a tree list.
    TreeLabel,
}

#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub key: &'static str,
    pub header: &'static str,
    pub format: CellFormat,
}

impl ColumnDef {
    pub const fn plain(key: &'static str, header: &'static str) -> Self {
        Self {
            key,
            header,
            format: CellFormat::Plain,
        }
    }

    pub const fn formatted(key: &'static str, header: &'static str, format: CellFormat) -> Self {
        Self { key, header, format }
    }

    pub fn render(&self, record: &Record) -> String {
        match self.format {
            CellFormat::Plain | CellFormat::TreeLabel => display_value(record.get(self.key)),
            CellFormat::Nested(inner) => display_value(record.get(self.key).and_then(|v| v.get(inner))),
            CellFormat::DateTime => format_date_time(get_str(record, self.key)),
            CellFormat::Date => format_date(get_str(record, self.key)),
            CellFormat::LocalTime => local_time_to_string(record.get(self.key)),
            CellFormat::JoinList => string_list(record.get(self.key)).join(", "),
            CellFormat::YesNo => {
                if get_bool(record, self.key).unwrap_or(false) {
                    "Ha".to_string()
                } else {
                    "Yo‘q".to_string()
                }
            }
            CellFormat::MediaKindLabel => match record.get(self.key) {
                Some(Value::String(kind)) if kind == "video" => "Video".to_string(),
                _ => "Rasm".to_string(),
            },
        }
    }
}

/// Where a record keeps the media shown in its preview dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewSource {
    /// `url` with an optional `mediaType`.
    Url,
    /// `image`, always an image unless the URL says otherwise.
    Image,
}

pub type ToFormValues = fn(&Record) -> Record;
pub type ToPayload = fn(&Record, Option<&Record>) -> Record;

/// Everything the generic page needs to manage one resource.
pub struct ResourceConfig {
    pub key: ResourceKey,
    pub title: &'static str,
    pub description: Option<&'static str>,
    /// REST collection path, e.g. `/api/news`.
    pub endpoint: &'static str,
    pub columns: Vec<ColumnDef>,
    pub schema: Box<dyn FormSchema>,
    pub default_values: Record,
    pub fields: Vec<FieldDescriptor>,
    pub to_form_values: Option<ToFormValues>,
    pub to_payload: Option<ToPayload>,
    pub preview: Option<PreviewSource>,
    /// Select fields filled from the records of a resource.
    pub option_sources: Vec<OptionSource>,
    /// Form value holding the parent id, for resources that nest.
    pub parent_field: Option<&'static str>,
    /// Key under which the list nests child records.
    pub tree_children: Option<&'static str>,
}

impl ResourceConfig {
    /// React Query style cache key: `["resource", <key>]`.
    pub fn query_key(&self) -> [&'static str; 2] {
        ["resource", self.key.slug()]
    }

    pub fn headers(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.header).collect()
    }

    /// Row of a record `depth` levels down a tree list.
    pub fn render_row_at(&self, record: &Record, depth: usize) -> Vec<String> {
        self.columns
            .iter()
            .map(|c| match c.format {
                CellFormat::TreeLabel => indent_label(depth, &c.render(record)),
                _ => c.render(record),
            })
            .collect()
    }

    /// Table rows; tree lists are flattened with children under their parent.
    pub fn render_rows(&self, records: &[Record]) -> Vec<Vec<String>> {
        flatten_tree(records, self.tree_children)
            .into_iter()
            .map(|(depth, record)| self.render_row_at(record, depth))
            .collect()
    }

    /// Resources whose records fill this resource's selects.
    pub fn related_resources(&self) -> Vec<ResourceKey> {
        let mut keys: Vec<ResourceKey> = Vec::new();
        for source in &self.option_sources {
            if source.resource != self.key && !keys.contains(&source.resource) {
                keys.push(source.resource);
            }
        }
        keys
    }

    pub fn has_editor_field(&self) -> bool {
        self.fields.iter().any(|f| {
            matches!(f, FieldDescriptor::Multilingual(m) if m.kind == crate::fields::MultilingualKind::Editor)
        })
    }

    /// Form values for a record, or the defaults when creating.
    pub fn form_values_for(&self, record: Option<&Record>) -> Record {
        let Some(record) = record else {
            return self.default_values.clone();
        };
        let source = match self.to_form_values {
            Some(convert) => convert(record),
            None => record.clone(),
        };
        crate::values::normalize_form_values(&self.default_values, source)
    }

    /// Value names written by the fields that have no default value.
    pub fn fields_missing_defaults(&self) -> Vec<String> {
        self.fields
            .iter()
            .flat_map(FieldDescriptor::value_names)
            .filter(|name| !self.default_values.contains_key(name))
            .collect()
    }
}

impl fmt::Debug for ResourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceConfig")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("endpoint", &self.endpoint)
            .field("fields", &self.fields.len())
            .field("option_sources", &self.option_sources.len())
            .finish()
    }
}
