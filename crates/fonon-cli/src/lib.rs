use std::path::Path;

use anyhow::{bail, Context};
use fonon_admin::ResourcePage;
use fonon_core::{AppError, ErrorMetadata, MediaFile, Record};
use serde::Serialize;

/// Truncate a string to `max_len` characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Render rows as a fixed-width text table. Cells longer than `max_width`
/// are truncated.
pub fn render_table(headers: &[&str], rows: &[Vec<String>], max_width: usize) -> String {
    let cells: Vec<Vec<String>> = std::iter::once(headers.iter().map(|h| h.to_string()).collect::<Vec<String>>())
        .chain(rows.iter().cloned())
        .map(|row: Vec<String>| row.iter().map(|c| truncate_string(c, max_width)).collect::<Vec<String>>())
        .collect();

    let mut widths = vec![0usize; headers.len()];
    for row in &cells {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for (n, row) in cells.iter().enumerate() {
        let line: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, width)| {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                let pad = width.saturating_sub(cell.chars().count());
                format!("{}{}", cell, " ".repeat(pad))
            })
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
        if n == 0 {
            let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
            out.push_str(&rule.join("  "));
            out.push('\n');
        }
    }
    out
}

/// MIME type for a local file, from its extension.
pub fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "avif" => "image/avif",
        "mp4" | "m4v" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// Read a local file into a [`MediaFile`] ready for upload.
pub async fn read_media_file(path: &Path) -> anyhow::Result<MediaFile> {
    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .context("File path has no usable name")?;
    Ok(MediaFile::new(name, content_type_for(path), data))
}

/// Parse form values given on the command line as a JSON object.
pub fn parse_values(raw: &str) -> anyhow::Result<Record> {
    let value: serde_json::Value = serde_json::from_str(raw).context("Values must be valid JSON")?;
    match value {
        serde_json::Value::Object(record) => Ok(record),
        _ => bail!("Values must be a JSON object"),
    }
}

/// Write each value into the page's open form the way an operator would.
pub async fn fill_form(page: &mut ResourcePage, values: Record) {
    for (name, value) in values {
        page.form_mut().set_value(&name, value).await;
    }
}

/// One-line operator summary of a failed command: code, message and next step.
pub fn error_summary(err: &AppError) -> String {
    let mut summary = format!("[{}] {}", err.error_code(), err.client_message());
    if let Some(action) = err.suggested_action() {
        summary.push_str(&format!(" ({})", action));
    }
    if err.is_recoverable() {
        summary.push_str(" [retryable]");
    }
    summary
}

pub fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

/// Initialize tracing for the CLI binary.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
