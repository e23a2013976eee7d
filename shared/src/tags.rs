//! Tag input parsing
//!
//! Clients send tags as one comma-separated string ("Cozy, WiFi, Quiet").
//! The backend resolves the parsed names to tag rows and replaces a cafe's
//! tag set with exactly that list.

/// Split a comma-separated tag string into distinct, trimmed names.
///
/// Empty segments are dropped and duplicates keep their first position.
/// Comparison is case-sensitive, matching the unique index on tag names.
pub fn parse_tag_names(input: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for name in input.split(',').map(str::trim) {
        if name.is_empty() || names.iter().any(|n| n == name) {
            continue;
        }
        names.push(name.to_string());
    }
    names
}
