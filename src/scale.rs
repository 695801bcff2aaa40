//! Conversions between the logical tick scale and surface pixels.
//!
//! Every function takes the container width explicitly; callers read it from
//! the [`Surface`](crate::surface::Surface) at call time.
//!
//! A zero-width container has no meaningful pixel/tick ratio. Conversions
//! treat it as "nothing to draw": [`ticks_to_px`] and [`px_to_ticks`] both
//! return 0, and [`fill_speed_to_delay`] returns a zero delay.

use std::time::Duration;

/// Upper end of the tick scale.
pub const MAX_TICKS: f64 = 100.0;

/// Clamps `ticks` into `[0, MAX_TICKS]`.
///
/// Both ends are inclusive, so `0` and `MAX_TICKS` pass through unchanged.
/// `NaN` clamps to 0.
///
/// # Examples
///
/// ```rust
/// use double_progress::scale::{check_bounds, MAX_TICKS};
///
/// assert_eq!(check_bounds(-3.0), 0.0);
/// assert_eq!(check_bounds(42.5), 42.5);
/// assert_eq!(check_bounds(250.0), MAX_TICKS);
/// ```
pub fn check_bounds(ticks: f64) -> f64 {
    if ticks.is_nan() || ticks <= 0.0 {
        0.0
    } else if ticks >= MAX_TICKS {
        MAX_TICKS
    } else {
        ticks
    }
}

/// Converts ticks into a whole pixel width, rounding to the nearest pixel.
///
/// Pixel widths are integral so a fill always lands exactly on its target
/// after whole-pixel steps.
pub fn ticks_to_px(ticks: f64, container_px: u32) -> u32 {
    if container_px == 0 {
        return 0;
    }
    let px = ticks * f64::from(container_px) / MAX_TICKS;
    // `as` saturates: negative ticks give 0, never wraps.
    px.round() as u32
}

/// Converts a pixel width into (possibly fractional) ticks.
pub fn px_to_ticks(px: u32, container_px: u32) -> f64 {
    if container_px == 0 {
        return 0.0;
    }
    f64::from(px) * MAX_TICKS / f64::from(container_px)
}

/// Pixels covered by one tick in a container of the given width.
pub fn px_per_tick(container_px: u32) -> f64 {
    f64::from(container_px) / MAX_TICKS
}

/// Delay between one-pixel steps so a fill advances at `ticks_per_second`.
///
/// `delay = round(1000 / (px_per_tick * ticks_per_second))` milliseconds.
/// Speeds that are zero, negative or not finite, and zero-width containers,
/// saturate to [`Duration::ZERO`].
///
/// # Examples
///
/// ```rust
/// use double_progress::scale::fill_speed_to_delay;
/// use std::time::Duration;
///
/// // 200px container, 2px per tick, 10 ticks/s => 20px/s => 50ms per pixel.
/// assert_eq!(fill_speed_to_delay(200, 10.0), Duration::from_millis(50));
/// assert_eq!(fill_speed_to_delay(200, 0.0), Duration::ZERO);
/// ```
pub fn fill_speed_to_delay(container_px: u32, ticks_per_second: f64) -> Duration {
    let px_per_second = px_per_tick(container_px) * ticks_per_second;
    if !px_per_second.is_finite() || px_per_second <= 0.0 {
        return Duration::ZERO;
    }
    let millis = (1000.0 / px_per_second).round();
    // Saturating cast; absurdly slow speeds just wait a very long time.
    Duration::from_millis(millis as u64)
}
