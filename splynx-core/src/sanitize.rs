//! Free text to filesystem-safe path segments.

use regex::Regex;
use std::sync::LazyLock;

/// Bound for file names derived from task titles.
pub const TITLE_MAX_LEN: usize = 150;
/// Bound for technician folder names in the summary report.
pub const TECHNICIAN_MAX_LEN: usize = 120;

const EMPTY_NAME: &str = "sin_nombre";

static FORBIDDEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[\\/*?:"<>|]"#).expect("static pattern"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("static pattern"));

/// Map `name` to a path segment of at most `max_len` characters.
///
/// Forbidden characters become `_`, whitespace runs collapse to a single
/// space and the result is trimmed before truncation. Empty input becomes
/// `sin_nombre`. Distinct names can map to the same segment; callers get no
/// deduplication.
pub fn sanitize(name: &str, max_len: usize) -> String {
    let name = if name.is_empty() { EMPTY_NAME } else { name };
    let replaced = FORBIDDEN.replace_all(name, "_");
    let collapsed = WHITESPACE.replace_all(&replaced, " ");
    collapsed.trim().chars().take(max_len).collect()
}
