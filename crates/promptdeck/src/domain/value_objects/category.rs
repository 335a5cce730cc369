//! Category - Single classification string per prompt

/// Sentinel category assigned when none is given
pub const UNCATEGORIZED: &str = "uncategorized";

/// Resolve caller input to a stored category.
///
/// Absent or empty input becomes [`UNCATEGORIZED`]. Anything else is kept
/// verbatim, including surrounding whitespace and case.
pub fn resolve_category(category: Option<&str>) -> String {
    match category {
        Some(c) if !c.is_empty() => c.to_string(),
        _ => UNCATEGORIZED.to_string(),
    }
}
