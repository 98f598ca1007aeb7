//! Numeric sort key for channel numbers.

use std::cmp::Ordering;

/// Numeric value of a channel number; absent or unparseable sorts last.
///
/// Surrounding whitespace is ignored. NaN also maps to `+inf` so every key
/// is comparable.
pub fn sort_key(number: Option<&str>) -> f64 {
    number
        .map(str::trim)
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|k| !k.is_nan())
        .unwrap_or(f64::INFINITY)
}

/// Total order over optional channel numbers by `sort_key`.
pub fn compare_numbers(a: Option<&str>, b: Option<&str>) -> Ordering {
    sort_key(a)
        .partial_cmp(&sort_key(b))
        .unwrap_or(Ordering::Equal)
}
