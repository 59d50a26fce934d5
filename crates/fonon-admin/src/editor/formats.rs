//! Embed formats understood by the rich text editor
//!
//! The set of formats is process-wide and built once, the first time an
//! editor needs it. Every later lookup reuses the same registry.

use std::collections::HashMap;
use std::sync::OnceLock;

use super::html::escape_attr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmbedKind {
    Image,
    Video,
    Audio,
}

impl EmbedKind {
    pub fn name(&self) -> &'static str {
        match self {
            EmbedKind::Image => "image",
            EmbedKind::Video => "video",
            EmbedKind::Audio => "audio",
        }
    }

    /// Embed used for a pasted or dropped file, chosen by MIME type.
    pub fn for_content_type(content_type: &str) -> Self {
        let mime = content_type.to_lowercase();
        if mime.starts_with("image/") {
            EmbedKind::Image
        } else if mime.starts_with("audio/") {
            EmbedKind::Audio
        } else {
            EmbedKind::Video
        }
    }
}

/// Value rendered by an embed format.
#[derive(Debug, Clone, Copy)]
pub struct EmbedValue<'a> {
    pub src: &'a str,
    pub title: Option<&'a str>,
}

type Render = fn(&EmbedValue<'_>) -> String;

pub struct EmbedFormats {
    formats: HashMap<EmbedKind, Render>,
}

impl EmbedFormats {
    fn builtin() -> Self {
        let mut formats: HashMap<EmbedKind, Render> = HashMap::new();
        formats.insert(EmbedKind::Image, render_image);
        formats.insert(EmbedKind::Video, render_video);
        formats.insert(EmbedKind::Audio, render_audio);
        tracing::debug!(formats = formats.len(), "Registered editor embed formats");
        Self { formats }
    }

    pub fn render(&self, kind: EmbedKind, value: &EmbedValue<'_>) -> String {
        match self.formats.get(&kind) {
            Some(render) => render(value),
            None => String::new(),
        }
    }

    pub fn is_registered(&self, kind: EmbedKind) -> bool {
        self.formats.contains_key(&kind)
    }
}

/// The process-wide format registry, built on first use.
pub fn embed_formats() -> &'static EmbedFormats {
    static FORMATS: OnceLock<EmbedFormats> = OnceLock::new();
    FORMATS.get_or_init(EmbedFormats::builtin)
}

fn render_image(value: &EmbedValue<'_>) -> String {
    format!(r#"<p><img src="{}"></p>"#, escape_attr(value.src))
}

// Inline data videos cannot be framed and play through a <video> element.
fn render_video(value: &EmbedValue<'_>) -> String {
    let src = escape_attr(value.src);
    if value.src.starts_with("data:") {
        format!(
            r#"<video class="ql-video" controls="" playsinline="" src="{}"></video>"#,
            src
        )
    } else {
        format!(
            r#"<iframe class="ql-video" frameborder="0" allowfullscreen="true" src="{}"></iframe>"#,
            src
        )
    }
}

fn render_audio(value: &EmbedValue<'_>) -> String {
    let title = value
        .title
        .map(|t| format!(r#" title="{}""#, escape_attr(t)))
        .unwrap_or_default();
    format!(
        r#"<audio class="ql-audio" controls="" preload="metadata" src="{}"{}></audio>"#,
        escape_attr(value.src),
        title
    )
}
