use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Media kind for previews and upload routing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }

    /// Parse a stored `mediaType` value, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "image" => Some(MediaKind::Image),
            "video" => Some(MediaKind::Video),
            _ => None,
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file picked by the operator, before upload.
#[derive(Debug, Clone)]
pub struct MediaFile {
    pub name: String,
    /// MIME type reported by the picker; may be empty.
    pub content_type: String,
    pub data: Bytes,
}

impl MediaFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    pub fn is_image(&self) -> bool {
        self.content_type.to_lowercase().starts_with("image/")
    }

    pub fn is_audio(&self) -> bool {
        self.content_type.to_lowercase().starts_with("audio/")
    }
}

/// A file stored server-side.
///
/// `url` is the absolute display form; `path` and `raw_url` are the server's
/// own references and are what deletion uses. Never mutated after upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedMedia {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_url: Option<String>,
}

impl UploadedMedia {
    /// Value written into form fields: the server's URL when it gave one.
    pub fn stored_value(&self) -> &str {
        self.raw_url.as_deref().unwrap_or(&self.url)
    }

    pub fn delete_target(&self) -> DeleteTarget {
        DeleteTarget {
            path: self.path.clone(),
            url: Some(self.raw_url.clone().unwrap_or_else(|| self.url.clone())),
        }
    }
}

/// Reference passed to the file delete endpoint; `path` wins over `url`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteTarget {
    pub path: Option<String>,
    pub url: Option<String>,
}

impl DeleteTarget {
    pub fn value(&self) -> Option<&str> {
        self.path
            .as_deref()
            .or(self.url.as_deref())
            .filter(|v| !v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_value_prefers_raw_url() {
        let media = UploadedMedia {
            url: "https://cdn.example.com/files/news/a.png".to_string(),
            path: Some("news/a.png".to_string()),
            raw_url: Some("/files/news/a.png".to_string()),
        };
        assert_eq!(media.stored_value(), "/files/news/a.png");
        assert_eq!(media.delete_target().value(), Some("news/a.png"));
    }

    #[test]
    fn delete_target_falls_back_to_url() {
        let media = UploadedMedia {
            url: "https://cdn.example.com/x.png".to_string(),
            path: None,
            raw_url: None,
        };
        assert_eq!(
            media.delete_target().value(),
            Some("https://cdn.example.com/x.png")
        );
        assert_eq!(DeleteTarget::default().value(), None);
    }

    #[test]
    fn media_kind_parse() {
        assert_eq!(MediaKind::parse("VIDEO"), Some(MediaKind::Video));
        assert_eq!(MediaKind::parse(" image "), Some(MediaKind::Image));
        assert_eq!(MediaKind::parse("audio"), None);
    }
}
