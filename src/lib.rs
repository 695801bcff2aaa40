#![warn(missing_docs)]

//! # bubbletea-double-progress
//!
//! Two overlapping horizontal progress bars, a front one and a back one,
//! sharing a single container and animated independently, for
//! [bubbletea-rs](https://github.com/joshka/bubbletea-rs) applications.
//!
//! ## Overview
//!
//! Bars are positioned on a tick scale from 0 to 100. A bar can be **set**
//! (jumps immediately) or **filled** (moves one pixel per step at a given
//! speed, with optional per-step and completion callbacks). Each bar keeps a
//! generation counter: any new set, fill or stop on a bar silently retires
//! the fill that was running on it, without tracking timers.
//!
//! The bars draw into a [`Surface`], which owns all pixel geometry. Use the
//! bundled [`CellSurface`] to render into a terminal line, or implement
//! [`Surface`] for your own target.
//!
//! ## Components
//!
//! | Item | Description |
//! |------|-------------|
//! | [`DoubleProgressBar`] | Controller: set, fill, stop and query both bars |
//! | [`Surface`] | Pixel geometry the controller reads and writes |
//! | [`CellSurface`] | Terminal-cell surface rendered with lipgloss |
//! | [`scale`] | Tick/pixel conversion and bounds checking |
//!
//! ## Quick Start
//!
//! ```rust
//! use double_progress::prelude::*;
//!
//! let mut bars = DoubleProgressBar::new(cells_new(&[with_width(50)]));
//! bars.set_back_bar_to(70.0);
//! let _cmd = bars.fill_front_bar_to(70.0, 25.0, None, None);
//!
//! assert_eq!(bars.surface().bar_width_px(BarRole::Back), 35);
//! assert!(!bars.is_back_bar_full());
//! ```

pub mod cells;
pub mod double_progress;
pub mod error;
pub mod scale;
pub mod surface;

pub use cells::{CellSurface, CellSurfaceOption};
pub use double_progress::{Callback, DoubleProgressBar, FillStepMsg};
pub use error::{Error, Result};
pub use scale::MAX_TICKS;
pub use surface::{BarRole, Surface};

/// Prelude module for convenient imports.
///
/// ```rust
/// use double_progress::prelude::*;
///
/// let bars: DoubleProgressBar<CellSurface> = DoubleProgressBar::default();
/// assert_eq!(bars.front_ticks(), 0.0);
/// ```
pub mod prelude {
    pub use crate::cells::{
        new as cells_new, with_back_fill, with_empty_fill, with_front_fill, with_width,
        without_percentage, CellSurface, CellSurfaceOption,
    };
    pub use crate::double_progress::{Callback, DoubleProgressBar, FillStepMsg};
    pub use crate::error::Error;
    pub use crate::scale::MAX_TICKS;
    pub use crate::surface::{BarRole, Surface};
}
