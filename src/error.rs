//! Errors reported by the strict fill API.
//!
//! The regular commands never fail: out-of-range ticks are clamped and a
//! degenerate speed or container saturates to immediate steps. The `try_fill_*`
//! methods on [`DoubleProgressBar`](crate::DoubleProgressBar) report those
//! degenerate inputs instead.

use thiserror::Error;

/// Reasons a fill request was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Error {
    /// The surface reports a container with no width, so ticks cannot be
    /// mapped to pixels.
    #[error("container has zero width")]
    ZeroContainerWidth,

    /// The fill speed is zero, negative or not a finite number.
    #[error("invalid fill speed: {0} ticks per second")]
    InvalidFillSpeed(f64),
}

/// Result alias for the strict fill API.
pub type Result<T> = std::result::Result<T, Error>;
