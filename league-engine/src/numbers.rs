//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Convert a count to f64 while allowing precision loss in a single location.
#[must_use]
pub fn usize_to_f64(value: usize) -> f64 {
    cast::<usize, f64>(value).unwrap_or(0.0)
}

/// Mean of `total` over `count` items, returning 0.0 for an empty set.
#[must_use]
pub fn mean(total: u64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let total = cast::<u64, f64>(total).unwrap_or(0.0);
    total / usize_to_f64(count)
}

/// Round to one decimal place, returning 0.0 for non-finite values.
#[must_use]
pub fn round_to_tenth(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    (value * 10.0).round() / 10.0
}

/// Narrow a usize to u32, saturating at `u32::MAX`.
#[must_use]
pub fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
