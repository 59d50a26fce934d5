//! Fonon Admin Engine
//!
//! Headless engine behind the Fonon admin panel: resource configurations,
//! the form session with its field controllers, the rich text editor adapter
//! and the upload lifecycle that deletes files uploaded during a cancelled
//! edit and keeps them once the edit is saved.

pub mod editor;
pub mod fields;
pub mod form;
pub mod page;
pub mod preview;
pub mod resources;
pub mod uploads;
pub mod values;

// Re-export commonly used types
pub use editor::{ClipboardPayload, EmbedKind, RichTextEditor};
pub use fields::{FieldController, FieldDescriptor, SelectionOutcome, SocialLink};
pub use form::FormSession;
pub use page::{ResourcePage, SaveOutcome};
pub use preview::{PreviewMedia, PreviewView};
pub use resources::{get_resource_config, resource_by_slug, resource_list, ResourceConfig, ResourceKey};
pub use uploads::{PendingUploads, Registration, UploadHandle, UploadRegistry};
