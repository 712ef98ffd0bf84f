//! ISBN normalization

/// Normalize an ISBN by stripping every non-alphanumeric character and
/// upper-casing the remainder.
///
/// `"978-0-14-312854-0"` and `"9780143128540"` normalize to the same key, so
/// every entry point that accepts an ISBN runs it through here first.
pub fn normalize_isbn(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_uppercase)
        .collect()
}
