//! Groups - Free-form labels parsed from comma-separated input

/// Split comma-separated group input into labels.
///
/// Each piece is trimmed and empty pieces are dropped. Order and duplicates
/// are preserved.
pub fn parse_groups(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(String::from)
        .collect()
}
