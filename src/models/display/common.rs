//! Common display utilities and helpers

/// Value or `--` when absent or empty
pub fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "--".to_string(),
    }
}

/// Checkmark for true, blank for false, `--` when unset
pub fn bool_mark(value: Option<bool>) -> String {
    match value {
        Some(true) => "\u{2713}".to_string(), // checkmark
        Some(false) => String::new(),
        None => "--".to_string(),
    }
}
