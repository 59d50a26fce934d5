//! Media URL resolution
//!
//! The backend answers uploads with either an absolute URL, a root-relative
//! URL, or only a storage path. Display code always wants an absolute URL.

/// Accept only absolute `http(s)` URLs, trimmed and without a trailing slash.
pub fn sanitize_absolute_url(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() || !is_absolute(trimmed) {
        return None;
    }
    Some(trimmed.strip_suffix('/').unwrap_or(trimmed).to_string())
}

pub(crate) fn is_absolute(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Resolve a server reference against the media base URL.
///
/// Absolute URLs pass through unchanged. Relative URLs are joined to `base`;
/// when only a storage path is known it is served under `/files/`.
/// Without a base the result is root-relative.
pub fn resolve_media_url(base: Option<&str>, url: Option<&str>, path: Option<&str>) -> Option<String> {
    if let Some(url) = url.filter(|u| !u.is_empty()) {
        if is_absolute(url) {
            return Some(url.to_string());
        }
        let normalized = url.strip_prefix('/').unwrap_or(url);
        return Some(match base {
            Some(base) => format!("{}/{}", base, normalized),
            None => format!("/{}", normalized),
        });
    }

    if let Some(path) = path.filter(|p| !p.is_empty()) {
        let normalized = path.strip_prefix('/').unwrap_or(path);
        return Some(match base {
            Some(base) => format!("{}/files/{}", base, normalized),
            None => format!("/files/{}", normalized),
        });
    }

    None
}
