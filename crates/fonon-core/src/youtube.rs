//! YouTube link normalisation
//!
//! Gallery videos are stored as embeddable YouTube URLs. Operators paste
//! whatever form their browser shows; this module turns every known shape into
//! `https://www.youtube.com/embed/{id}` while keeping playlist and start time.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static DURATION_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)(h|m|s)").expect("valid duration regex"));

fn normalize_hostname(hostname: &str) -> String {
    let lower = hostname.to_lowercase();
    lower.strip_prefix("www.").unwrap_or(&lower).to_string()
}

fn is_domain_or_subdomain(host: &str, domain: &str) -> bool {
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

fn is_youtube_page_host(host: &str) -> bool {
    is_domain_or_subdomain(host, "youtube.com") || is_domain_or_subdomain(host, "youtube-nocookie.com")
}

fn is_youtube_host(host: &str) -> bool {
    host == "youtu.be" || is_youtube_page_host(host)
}

/// Whether `url` is hosted on a YouTube domain.
pub fn is_youtube_url(url: &str) -> bool {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(normalize_hostname))
        .map(|host| is_youtube_host(&host))
        .unwrap_or(false)
}

/// Parse a start-time token: `90`, `1:30`, `1h2m3s`.
fn parse_time_token(value: Option<&str>) -> Option<u64> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.chars().all(|c| c.is_ascii_digit()) {
        return trimmed.parse().ok();
    }

    let colon_parts: Vec<&str> = trimmed.split(':').collect();
    if colon_parts.len() > 1
        && colon_parts
            .iter()
            .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
    {
        let mut total = 0u64;
        for part in &colon_parts {
            total = total.checked_mul(60)?.checked_add(part.parse::<u64>().ok()?)?;
        }
        return Some(total);
    }

    let mut total = 0u64;
    let mut matched = false;
    for caps in DURATION_TOKEN.captures_iter(trimmed) {
        matched = true;
        let amount: u64 = caps[1].parse().ok()?;
        let seconds = match caps[2].to_ascii_lowercase().as_str() {
            "h" => amount.checked_mul(3600)?,
            "m" => amount.checked_mul(60)?,
            _ => amount,
        };
        total = total.checked_add(seconds)?;
    }
    matched.then_some(total)
}

fn query_param(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

/// Normalise a YouTube link to its canonical embed form.
///
/// Returns `None` for empty input, unparseable URLs, non-YouTube hosts, and
/// links without a recognisable video id.
pub fn normalize_youtube_url(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    let lower = trimmed.to_ascii_lowercase();
    let prefixed = if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let url = Url::parse(&prefixed).ok()?;
    let host = normalize_hostname(url.host_str()?);
    let segments: Vec<&str> = url
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default();

    let video_id = if host == "youtu.be" {
        segments.first().map(|s| s.to_string())
    } else if is_youtube_page_host(&host) {
        match segments.as_slice() {
            ["watch", ..] => query_param(&url, "v"),
            ["embed", id, ..] | ["v", id, ..] | ["shorts", id, ..] => Some(id.to_string()),
            _ if query_param(&url, "v").is_some() => query_param(&url, "v"),
            [single] => Some(single.to_string()),
            _ => None,
        }
    } else {
        return None;
    };

    let video_id = video_id?.trim().to_string();
    if video_id.is_empty() {
        return None;
    }

    let mut embed = Url::parse(&format!("https://www.youtube.com/embed/{}", video_id)).ok()?;
    let mut params: Vec<(String, String)> = Vec::new();
    if let Some(list) = query_param(&url, "list").filter(|l| !l.is_empty()) {
        params.push(("list".to_string(), list));
    }

    let mut start = [query_param(&url, "start"), query_param(&url, "t")]
        .iter()
        .filter_map(|candidate| parse_time_token(candidate.as_deref()))
        .find(|seconds| *seconds > 0);

    if start.is_none() {
        if let Some(fragment) = url.fragment().filter(|f| !f.is_empty()) {
            start = match fragment.strip_prefix("t=") {
                Some(rest) => parse_time_token(Some(rest)),
                None => parse_time_token(Some(fragment)),
            };
        }
    }

    if let Some(seconds) = start.filter(|s| *s > 0) {
        params.push(("start".to_string(), seconds.to_string()));
    }

    if !params.is_empty() {
        embed.query_pairs_mut().extend_pairs(params);
    }

    Some(embed.to_string())
}
