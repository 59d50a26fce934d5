//! Resource configurations: what each backend resource looks like in the
//! table and in the create/edit form.

pub mod config;
pub mod forms;
pub mod registry;
pub mod relations;
pub mod schema;
pub mod transforms;

pub use config::{CellFormat, ColumnDef, PreviewSource, ResourceConfig, ResourceKey, ToFormValues, ToPayload};
pub use relations::{flatten_tree, OptionSource};
pub use registry::{get_resource_config, resource_by_slug, resource_list};
pub use schema::{FormSchema, TypedSchema};
