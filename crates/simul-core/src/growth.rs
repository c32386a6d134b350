//! Bounded growth model and clamping helpers.
//!
//! [`limited_growth`] moves a stock (population) toward a target (stored
//! food) without ever overshooting a capacity (sustainable agriculture).
//! Shrinking is damped linearly; growing is damped asymptotically, so the
//! stock decelerates as it approaches capacity.

/// Weight of the growth step inside the asymptotic damping term.
const GROWTH_DAMPING: f64 = 0.5;

/// Advance `old_value` toward `target_value`, bounded by `capacity`.
///
/// 1. `growth = min(target - old, capacity - old)`.
/// 2. Negative growth is scaled by `shrink_factor`.
/// 3. Positive growth is scaled by `growth_factor` and by
///    `(headroom - growth / 2) / headroom`, where `headroom = capacity - old`.
/// 4. A value at or above capacity never grows; it can still shrink.
///
/// The result is not clamped; callers clamp to `>= 0`.
pub fn limited_growth(
    old_value: f64,
    target_value: f64,
    capacity: f64,
    shrink_factor: f64,
    growth_factor: f64,
) -> f64 {
    let headroom = capacity - old_value;
    let growth = (target_value - old_value).min(headroom);

    let corrected = if growth < 0.0 {
        growth * shrink_factor
    } else if growth > 0.0 && headroom > 0.0 {
        growth * growth_factor * GROWTH_DAMPING.mul_add(-growth, headroom) / headroom
    } else {
        0.0
    };

    old_value + corrected
}

/// Clamp `value` to at least `min_value`. `NaN` maps to `min_value`.
pub fn clamp_min(value: f64, min_value: f64) -> f64 {
    if value > min_value { value } else { min_value }
}

/// Clamp `value` into `[min_value, max_value]`. `NaN` maps to `min_value`.
///
/// Unlike [`f64::clamp`] this never panics: when `max_value < min_value`
/// the upper bound wins for values above it.
pub fn clamp(value: f64, min_value: f64, max_value: f64) -> f64 {
    if value > max_value {
        max_value
    } else if value > min_value {
        value
    } else {
        min_value
    }
}
