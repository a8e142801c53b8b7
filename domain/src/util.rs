//! Shared utility functions.

/// Truncate a string to at most `max_chars` characters.
///
/// Returns the (possibly shortened) slice and whether anything was cut.
/// Counting is done in characters, never splitting a UTF-8 sequence.
pub fn truncate_chars(s: &str, max_chars: usize) -> (&str, bool) {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => (&s[..end], true),
        None => (s, false),
    }
}

/// Round a float to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
