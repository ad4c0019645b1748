//! Per-field merge rule shared by overlay merging and date coalescing.

/// Return `preferred` unless it is empty, else `fallback`.
///
/// Empty strings and missing values are the same thing here: an empty
/// preferred value never wins over a non-empty fallback.
pub fn coalesce_prefer<'a>(preferred: &'a str, fallback: &'a str) -> &'a str {
    if preferred.is_empty() {
        fallback
    } else {
        preferred
    }
}
