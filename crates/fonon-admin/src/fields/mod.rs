//! Form fields: declarative descriptors and the controllers built from them.

pub mod descriptor;
pub mod media_upload;
pub mod multilingual;
pub mod simple;
pub mod social_links;

use std::sync::Arc;

use fonon_core::{MediaStore, Notifier, Record};

pub use descriptor::{
    ArrayField, ArrayValidation, BooleanField, FieldDescriptor, Language, MediaUploadField,
    MultilingualField, MultilingualKind, SelectField, SelectOption, SelectValueType, SimpleField,
    SimpleKind, SocialLinksField, UploadMode, EMPTY_OPTION_VALUE,
};
pub use media_upload::{MediaUploadController, SelectionOutcome};
pub use multilingual::MultilingualController;
pub use simple::{ArrayController, BooleanController, SelectController, SimpleController};
pub use social_links::{SocialLink, SocialLinksController};

use crate::uploads::UploadRegistry;

/// Live state of one mounted field.
#[derive(Debug)]
pub enum FieldController {
    Simple(SimpleController),
    Multilingual(MultilingualController),
    Array(ArrayController),
    MediaUpload(MediaUploadController),
    SocialLinks(SocialLinksController),
    Select(SelectController),
    Boolean(BooleanController),
}

impl FieldController {
    /// Build the controller for a descriptor. Media-bearing fields register
    /// their pending uploads with `registry`.
    pub fn mount(
        descriptor: &FieldDescriptor,
        values: &Record,
        registry: &UploadRegistry,
        store: &Arc<dyn MediaStore>,
        notifier: &Arc<dyn Notifier>,
    ) -> Self {
        match descriptor {
            FieldDescriptor::Simple(f) => FieldController::Simple(SimpleController::new(f.clone())),
            FieldDescriptor::Multilingual(f) => FieldController::Multilingual(MultilingualController::mount(
                f.clone(),
                values,
                registry,
                store.clone(),
                notifier.clone(),
            )),
            FieldDescriptor::Array(f) => FieldController::Array(ArrayController::new(f.clone())),
            FieldDescriptor::MediaUpload(f) => FieldController::MediaUpload(MediaUploadController::mount(
                f.clone(),
                values,
                registry,
                store.clone(),
                notifier.clone(),
            )),
            FieldDescriptor::SocialLinks(f) => FieldController::SocialLinks(SocialLinksController::mount(
                f.clone(),
                registry,
                store.clone(),
                notifier.clone(),
            )),
            FieldDescriptor::Select(f) => FieldController::Select(SelectController::new(f.clone())),
            FieldDescriptor::Boolean(f) => FieldController::Boolean(BooleanController::new(f.clone())),
        }
    }

    /// Release the field; uploads it still holds are discarded.
    pub async fn unmount(self) {
        match self {
            FieldController::Multilingual(c) => c.unmount().await,
            FieldController::MediaUpload(c) => c.unmount().await,
            FieldController::SocialLinks(c) => c.unmount().await,
            FieldController::Simple(_)
            | FieldController::Array(_)
            | FieldController::Select(_)
            | FieldController::Boolean(_) => {}
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldController::Simple(_) => "simple",
            FieldController::Multilingual(_) => "multilingual",
            FieldController::Array(_) => "array",
            FieldController::MediaUpload(_) => "media-upload",
            FieldController::SocialLinks(_) => "social-links",
            FieldController::Select(_) => "select",
            FieldController::Boolean(_) => "boolean",
        }
    }
}
