//! Shared utility functions

/// Truncates a title to a maximum number of characters with an ellipsis.
///
/// Operates on character boundaries so multi-byte titles never split a
/// code point. Truncation is presentation-only and must never be applied
/// before a value is used as a sort or ranking key.
pub fn truncate_title(input: &str, max_chars: usize) -> String {
    if input.chars().count() <= max_chars {
        return input.to_string();
    }
    let truncated: String = input.chars().take(max_chars).collect();
    format!("{truncated}...")
}

/// Rounds a value to 2 decimal places for presentation.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
