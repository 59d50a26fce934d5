//! Media preview for gallery and journal rows.

use fonon_core::{infer_media_type_from_url, is_youtube_url, MediaKind, MediaStore, Record};

use crate::resources::PreviewSource;
use crate::values::get_str;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewMedia {
    pub url: String,
    pub kind: MediaKind,
    pub title: Option<String>,
}

/// What the preview dialog shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewView {
    Image { src: String, alt: String },
    Embed { src: String, title: String },
    Video { src: String },
}

impl PreviewMedia {
    /// Build a preview for a record, or `None` when it carries no media.
    ///
    /// The kind comes from the URL extension first, then the record's
    /// `mediaType`, then the source (an `image` field is an image), and
    /// finally defaults to image.
    pub fn from_record(record: &Record, store: &dyn MediaStore) -> Option<Self> {
        let url_field = get_str(record, "url");
        let raw = url_field.or_else(|| get_str(record, "image")).filter(|s| !s.is_empty())?;

        let resolved = store.resolve_url(raw);
        let declared = get_str(record, "mediaType").and_then(MediaKind::parse);
        let image_fallback = (url_field.is_none() && get_str(record, "image").is_some()).then_some(MediaKind::Image);

        let kind = infer_media_type_from_url(&resolved)
            .or(declared)
            .or(image_fallback)
            .unwrap_or(MediaKind::Image);

        Some(PreviewMedia {
            url: resolved,
            kind,
            title: get_str(record, "title").map(str::to_string),
        })
    }

    pub fn dialog_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Media ko‘rish")
    }

    pub fn view(&self) -> PreviewView {
        match self.kind {
            MediaKind::Video if is_youtube_url(&self.url) => PreviewView::Embed {
                src: self.url.clone(),
                title: self.title.clone().unwrap_or_else(|| "Gallery video".to_string()),
            },
            MediaKind::Video => PreviewView::Video { src: self.url.clone() },
            MediaKind::Image => PreviewView::Image {
                src: self.url.clone(),
                alt: self.title.clone().unwrap_or_else(|| "Gallery media".to_string()),
            },
        }
    }
}

/// Whether the preview column offers a button for this record.
pub fn has_preview_media(source: PreviewSource, record: &Record) -> bool {
    let key = match source {
        PreviewSource::Url => "url",
        PreviewSource::Image => "image",
    };
    get_str(record, key).is_some_and(|s| !s.is_empty())
}
