//! The rendering target both bars draw into.
//!
//! A [`Surface`] owns the geometry: the width of the shared container and the
//! width of each bar, all in whole pixels. The controller never caches any of
//! it; every conversion re-reads the container width through this trait, so a
//! host can resize the container between (or during) animations.
//!
//! # Implementing a surface
//!
//! ```rust
//! use double_progress::surface::{BarRole, Surface};
//!
//! #[derive(Default)]
//! struct Widths {
//!     container: u32,
//!     front: u32,
//!     back: u32,
//! }
//!
//! impl Surface for Widths {
//!     fn container_width_px(&self) -> u32 {
//!         self.container
//!     }
//!
//!     fn bar_width_px(&self, role: BarRole) -> u32 {
//!         match role {
//!             BarRole::Front => self.front,
//!             BarRole::Back => self.back,
//!         }
//!     }
//!
//!     fn set_bar_width_px(&mut self, role: BarRole, px: u32) {
//!         match role {
//!             BarRole::Front => self.front = px,
//!             BarRole::Back => self.back = px,
//!         }
//!     }
//! }
//! ```

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// Identifies one of the two bars sharing a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BarRole {
    /// The bar drawn on top.
    Front,
    /// The bar drawn underneath the front bar.
    Back,
}

impl BarRole {
    /// Both roles, front first.
    pub const ALL: [BarRole; 2] = [BarRole::Front, BarRole::Back];
}

impl fmt::Display for BarRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BarRole::Front => f.write_str("front"),
            BarRole::Back => f.write_str("back"),
        }
    }
}

/// Pixel geometry of a container holding a front and a back bar.
///
/// Writes made through [`Surface::set_bar_width_px`] must be visible to the
/// next [`Surface::bar_width_px`] call for the same role.
pub trait Surface {
    /// Current width of the shared container, in pixels.
    fn container_width_px(&self) -> u32;

    /// Current rendered width of the given bar, in pixels.
    fn bar_width_px(&self, role: BarRole) -> u32;

    /// Sets the rendered width of the given bar, in pixels.
    fn set_bar_width_px(&mut self, role: BarRole, px: u32);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn container_width_px(&self) -> u32 {
        (**self).container_width_px()
    }

    fn bar_width_px(&self, role: BarRole) -> u32 {
        (**self).bar_width_px(role)
    }

    fn set_bar_width_px(&mut self, role: BarRole, px: u32) {
        (**self).set_bar_width_px(role, px)
    }
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn container_width_px(&self) -> u32 {
        (**self).container_width_px()
    }

    fn bar_width_px(&self, role: BarRole) -> u32 {
        (**self).bar_width_px(role)
    }

    fn set_bar_width_px(&mut self, role: BarRole, px: u32) {
        (**self).set_bar_width_px(role, px)
    }
}

// Lets the host keep its own handle to the surface (to resize the container,
// say) while the controller holds another one.
impl<S: Surface + ?Sized> Surface for Arc<Mutex<S>> {
    fn container_width_px(&self) -> u32 {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .container_width_px()
    }

    fn bar_width_px(&self, role: BarRole) -> u32 {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .bar_width_px(role)
    }

    fn set_bar_width_px(&mut self, role: BarRole, px: u32) {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .set_bar_width_px(role, px)
    }
}
