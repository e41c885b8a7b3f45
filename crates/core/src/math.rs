use crate::errors::CoreError;

/// Round to the nearest integer, with exact halves going toward +∞.
///
/// The published dashboard figures were produced with this rule, so
/// `-2.5` rounds to `-2` (where `f64::round` would give `-3`).
/// Non-finite values and values outside the `i64` range are rejected.
pub fn round_half_up(value: f64) -> Result<i64, CoreError> {
    let rounded = (value + 0.5).floor();
    // i64::MAX as f64 is 2^63, which is itself out of range.
    if !rounded.is_finite() || rounded < i64::MIN as f64 || rounded >= i64::MAX as f64 {
        return Err(CoreError::ValidationError(format!(
            "{value} cannot be rounded to a whole number"
        )));
    }
    Ok(rounded as i64)
}

/// Tolerance used when comparing a probability sum against 1.
pub const PROBABILITY_EPSILON: f64 = 1e-6;

/// Tolerance used when comparing allocation percentages against 100.
pub const ALLOCATION_EPSILON: f64 = 1e-6;

/// Tolerance used when comparing dollar amounts (half a cent).
pub const DOLLAR_EPSILON: f64 = 0.005;
