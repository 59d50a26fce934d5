//! Media kind inference from file names, MIME types and URLs.

use crate::models::MediaKind;

pub const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "bmp", "svg", "tiff", "tif", "heic", "heif", "avif",
];

pub const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "mov", "avi", "mkv", "webm", "m4v", "3gp", "wmv", "flv", "mpeg", "mpg",
];

/// Infer the kind of a picked file. MIME prefix wins; the extension is the fallback.
pub fn infer_media_type(file_name: &str, mime: &str) -> Option<MediaKind> {
    let mime = mime.to_lowercase();
    if mime.starts_with("image/") {
        return Some(MediaKind::Image);
    }
    if mime.starts_with("video/") {
        return Some(MediaKind::Video);
    }

    let (_, extension) = file_name.rsplit_once('.')?;
    let extension = extension.to_lowercase();
    if extension.is_empty() {
        return None;
    }
    if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        return Some(MediaKind::Image);
    }
    if VIDEO_EXTENSIONS.contains(&extension.as_str()) {
        return Some(MediaKind::Video);
    }
    None
}

/// Infer the kind of a stored URL from its extension, ignoring the query string.
pub fn infer_media_type_from_url(url: &str) -> Option<MediaKind> {
    let normalized = url.split('?').next().unwrap_or("").to_lowercase();
    if has_extension(&normalized, VIDEO_EXTENSIONS) {
        return Some(MediaKind::Video);
    }
    if has_extension(&normalized, IMAGE_EXTENSIONS) {
        return Some(MediaKind::Image);
    }
    None
}

/// Whether a URL points at an image file by extension.
pub fn is_image_url(url: &str) -> bool {
    let normalized = url.split('?').next().unwrap_or("").to_lowercase();
    has_extension(&normalized, IMAGE_EXTENSIONS)
}

fn has_extension(value: &str, extensions: &[&str]) -> bool {
    extensions
        .iter()
        .any(|ext| value.ends_with(&format!(".{}", ext)))
}
