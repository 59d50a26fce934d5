//! Table insertion from a size prompt such as `3x4` or `2,5`.

use std::sync::LazyLock;

use regex::Regex;

pub const MAX_TABLE_SIZE: usize = 20;

pub const DEFAULT_TABLE_SIZE: &str = "2x2";

static TABLE_SIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)(?:x|,)(\d+)$").expect("valid table size regex"));

/// Parse `rows x columns`, clamping both to `1..=20`.
pub fn parse_table_size(input: &str) -> Option<(usize, usize)> {
    let normalized: String = input
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    let caps = TABLE_SIZE.captures(&normalized)?;
    let rows = clamp_dimension(&caps[1]);
    let columns = clamp_dimension(&caps[2]);
    Some((rows, columns))
}

// Oversized digit strings overflow the parser and clamp to the maximum.
fn clamp_dimension(digits: &str) -> usize {
    digits
        .parse::<usize>()
        .unwrap_or(MAX_TABLE_SIZE)
        .clamp(1, MAX_TABLE_SIZE)
}

pub fn table_html(rows: usize, columns: usize) -> String {
    let row = format!("<tr>{}</tr>", "<td><br></td>".repeat(columns));
    format!("<table><tbody>{}</tbody></table>", row.repeat(rows))
}
