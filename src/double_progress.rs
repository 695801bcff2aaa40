//! Two overlapping progress bars with independent, cancellable fills.
//!
//! A [`DoubleProgressBar`] drives a front and a back bar drawn into one
//! [`Surface`]. Bars are measured in ticks on a `0..=100` scale; the surface
//! works in whole pixels.
//!
//! # Set and fill
//!
//! ```rust
//! use double_progress::{cells, DoubleProgressBar};
//!
//! let mut bars = DoubleProgressBar::new(cells::new(&[cells::with_width(200)]));
//!
//! // Jump straight to a value.
//! bars.set_back_bar_to(80.0);
//! assert_eq!(bars.back_ticks(), 80.0);
//!
//! // Animate the front bar to 50 ticks at 10 ticks per second. The first
//! // one-pixel step happens now; the returned command schedules the next.
//! let cmd = bars.fill_front_bar_to(50.0, 10.0, None, None);
//! assert!(cmd.is_some());
//! ```
//!
//! # Cancellation
//!
//! Every set, fill or stop bumps the bar's generation. Each scheduled step
//! carries the generation it was started under and does nothing once that
//! generation is stale, so there is never a timer to cancel:
//!
//! ```rust
//! use double_progress::{cells, DoubleProgressBar};
//!
//! let mut bars = DoubleProgressBar::new(cells::new(&[]));
//! let _cmd = bars.fill_front_bar_to(100.0, 5.0, None, None);
//! bars.stop_front_bar();
//! assert!(!bars.is_front_bar_filling());
//! ```
//!
//! # bubbletea-rs Integration
//!
//! ```rust
//! use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};
//! use double_progress::{cells, CellSurface, DoubleProgressBar};
//!
//! struct App {
//!     bars: DoubleProgressBar<CellSurface>,
//! }
//!
//! impl BubbleTeaModel for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let mut bars = DoubleProgressBar::new(cells::new(&[]));
//!         bars.set_back_bar_to(60.0);
//!         let cmd = bars.fill_front_bar_to(60.0, 20.0, None, None);
//!         (Self { bars }, cmd)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         self.bars.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.bars.view()
//!     }
//! }
//! ```

use crate::cells::{self, CellSurface};
use crate::error::{Error, Result};
use crate::scale::{check_bounds, fill_speed_to_delay, px_to_ticks, ticks_to_px, MAX_TICKS};
use crate::surface::{BarRole, Surface};
use bubbletea_rs::{tick as bubbletea_tick, Cmd, Model as BubbleTeaModel, Msg};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;
use tracing::{debug, trace};

// Internal ID management for controller instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Callback invoked by a fill, once per step or once on completion.
pub type Callback = Box<dyn FnMut() + Send>;

fn noop() -> Callback {
    Box::new(|| {})
}

/// Message that advances a fill by one pixel.
///
/// Produced by the commands returned from the fill methods and consumed by
/// [`DoubleProgressBar::update`]. Messages addressed to another controller,
/// or carrying a generation the bar has moved past, are ignored.
#[derive(Debug, Clone)]
pub struct FillStepMsg {
    /// ID of the controller this step belongs to.
    pub id: i64,
    /// The bar being filled.
    pub role: BarRole,
    generation: u64,
}

impl FillStepMsg {
    /// Generation of the fill that scheduled this step.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

// Parameters of the fill currently allowed to touch a bar.
struct FillChain {
    target_ticks: f64,
    delay: Duration,
    // Set once the chain has moved the bar at least one pixel.
    stepped: bool,
    on_tick: Callback,
    on_fill_complete: Callback,
}

struct Bar {
    role: BarRole,
    current_ticks: f64,
    generation: u64,
    chain: Option<FillChain>,
}

impl Bar {
    fn new(role: BarRole) -> Self {
        Self {
            role,
            current_ticks: 0.0,
            generation: 0,
            chain: None,
        }
    }

    /// Starts a new generation, dropping whatever fill was running.
    fn bump(&mut self) -> u64 {
        self.generation += 1;
        self.chain = None;
        self.generation
    }
}

impl fmt::Debug for Bar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bar")
            .field("role", &self.role)
            .field("current_ticks", &self.current_ticks)
            .field("generation", &self.generation)
            .field("filling", &self.chain.is_some())
            .finish()
    }
}

/// Controller for a front and a back bar sharing one surface.
pub struct DoubleProgressBar<S> {
    id: i64,
    front: Bar,
    back: Bar,
    surface: S,
}

impl<S: fmt::Debug> fmt::Debug for DoubleProgressBar<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DoubleProgressBar")
            .field("id", &self.id)
            .field("front", &self.front)
            .field("back", &self.back)
            .field("surface", &self.surface)
            .finish()
    }
}

impl<S: Surface> DoubleProgressBar<S> {
    /// Creates a controller with both bars at 0 ticks, generation 0.
    ///
    /// The surface's current bar widths are left as they are.
    pub fn new(surface: S) -> Self {
        Self {
            id: next_id(),
            front: Bar::new(BarRole::Front),
            back: Bar::new(BarRole::Back),
            surface,
        }
    }

    /// Unique ID of this controller, carried by its [`FillStepMsg`]s.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Upper end of the tick scale.
    pub fn max_ticks(&self) -> f64 {
        MAX_TICKS
    }

    /// The surface the bars are drawn into.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the surface, e.g. to resize the container.
    ///
    /// Writing bar widths directly bypasses the controller; a running fill
    /// continues from whatever width it reads next.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Consumes the controller and hands back its surface.
    pub fn into_surface(self) -> S {
        self.surface
    }

    fn bar(&self, role: BarRole) -> &Bar {
        match role {
            BarRole::Front => &self.front,
            BarRole::Back => &self.back,
        }
    }

    fn bar_mut(&mut self, role: BarRole) -> &mut Bar {
        self.bar_and_surface(role).0
    }

    // Splits the borrow so a bar and the surface can be mutated together.
    fn bar_and_surface(&mut self, role: BarRole) -> (&mut Bar, &mut S) {
        let bar = match role {
            BarRole::Front => &mut self.front,
            BarRole::Back => &mut self.back,
        };
        (bar, &mut self.surface)
    }

    /// Ticks the given bar currently shows.
    pub fn current_ticks(&self, role: BarRole) -> f64 {
        self.bar(role).current_ticks
    }

    /// Ticks the front bar currently shows.
    pub fn front_ticks(&self) -> f64 {
        self.current_ticks(BarRole::Front)
    }

    /// Ticks the back bar currently shows.
    pub fn back_ticks(&self) -> f64 {
        self.current_ticks(BarRole::Back)
    }

    /// Current generation of the given bar.
    pub fn generation(&self, role: BarRole) -> u64 {
        self.bar(role).generation
    }

    /// Whether a fill is still under way for the given bar.
    pub fn is_filling(&self, role: BarRole) -> bool {
        self.bar(role).chain.is_some()
    }

    /// Whether the front bar is still filling.
    pub fn is_front_bar_filling(&self) -> bool {
        self.is_filling(BarRole::Front)
    }

    /// Whether the back bar is still filling.
    pub fn is_back_bar_filling(&self) -> bool {
        self.is_filling(BarRole::Back)
    }

    fn ticks_to_px(&self, ticks: f64) -> u32 {
        ticks_to_px(ticks, self.surface.container_width_px())
    }

    /// Sets a bar to `ticks` immediately, cancelling any fill on it.
    ///
    /// `ticks` is clamped into `0..=100`.
    pub fn set_bar_to(&mut self, role: BarRole, ticks: f64) {
        let ticks = check_bounds(ticks);
        let px = self.ticks_to_px(ticks);

        let id = self.id;
        let (bar, surface) = self.bar_and_surface(role);
        let generation = bar.bump();
        bar.current_ticks = ticks;
        surface.set_bar_width_px(bar.role, px);

        debug!(id, role = %bar.role, ticks, px, generation, "set bar");
    }

    /// Sets the front bar to `ticks` immediately.
    pub fn set_front_bar_to(&mut self, ticks: f64) {
        self.set_bar_to(BarRole::Front, ticks)
    }

    /// Sets the back bar to `ticks` immediately.
    pub fn set_back_bar_to(&mut self, ticks: f64) {
        self.set_bar_to(BarRole::Back, ticks)
    }

    /// Animates a bar towards `ticks`, one pixel per step.
    ///
    /// Any fill already running on this bar is superseded: it never steps
    /// again and neither of its callbacks fires again. The first step runs
    /// before this returns; the returned command delivers the next
    /// [`FillStepMsg`] after the per-pixel delay for `ticks_per_second`.
    /// `None` means the bar was already on target and `on_fill_complete` has
    /// been called.
    ///
    /// A zero-width container or a speed that is zero, negative or not
    /// finite makes every step immediate. Use
    /// [`try_fill_bar_to`](Self::try_fill_bar_to) to reject those instead.
    pub fn fill_bar_to(
        &mut self,
        role: BarRole,
        ticks: f64,
        ticks_per_second: f64,
        on_tick: Option<Callback>,
        on_fill_complete: Option<Callback>,
    ) -> Option<Cmd> {
        let target_ticks = check_bounds(ticks);
        let id = self.id;
        let (bar, surface) = self.bar_and_surface(role);
        let delay = fill_speed_to_delay(surface.container_width_px(), ticks_per_second);

        let generation = bar.bump();
        bar.chain = Some(FillChain {
            target_ticks,
            delay,
            stepped: false,
            on_tick: on_tick.unwrap_or_else(noop),
            on_fill_complete: on_fill_complete.unwrap_or_else(noop),
        });

        debug!(
            id,
            role = %bar.role,
            target_ticks,
            delay_ms = delay.as_millis() as u64,
            generation,
            "fill started"
        );

        self.step(role, generation)
            .map(|delay| self.next_step(role, generation, delay))
    }

    /// Animates the front bar towards `ticks`. See [`fill_bar_to`](Self::fill_bar_to).
    pub fn fill_front_bar_to(
        &mut self,
        ticks: f64,
        ticks_per_second: f64,
        on_tick: Option<Callback>,
        on_fill_complete: Option<Callback>,
    ) -> Option<Cmd> {
        self.fill_bar_to(
            BarRole::Front,
            ticks,
            ticks_per_second,
            on_tick,
            on_fill_complete,
        )
    }

    /// Animates the back bar towards `ticks`. See [`fill_bar_to`](Self::fill_bar_to).
    pub fn fill_back_bar_to(
        &mut self,
        ticks: f64,
        ticks_per_second: f64,
        on_tick: Option<Callback>,
        on_fill_complete: Option<Callback>,
    ) -> Option<Cmd> {
        self.fill_bar_to(
            BarRole::Back,
            ticks,
            ticks_per_second,
            on_tick,
            on_fill_complete,
        )
    }

    /// Like [`fill_bar_to`](Self::fill_bar_to), but rejects a zero-width
    /// container or an unusable speed instead of stepping immediately.
    ///
    /// Nothing changes (the running fill included) when an error is returned.
    pub fn try_fill_bar_to(
        &mut self,
        role: BarRole,
        ticks: f64,
        ticks_per_second: f64,
        on_tick: Option<Callback>,
        on_fill_complete: Option<Callback>,
    ) -> Result<Option<Cmd>> {
        if self.surface.container_width_px() == 0 {
            return Err(Error::ZeroContainerWidth);
        }
        if !ticks_per_second.is_finite() || ticks_per_second <= 0.0 {
            return Err(Error::InvalidFillSpeed(ticks_per_second));
        }
        Ok(self.fill_bar_to(role, ticks, ticks_per_second, on_tick, on_fill_complete))
    }

    /// Strict form of [`fill_front_bar_to`](Self::fill_front_bar_to).
    pub fn try_fill_front_bar_to(
        &mut self,
        ticks: f64,
        ticks_per_second: f64,
        on_tick: Option<Callback>,
        on_fill_complete: Option<Callback>,
    ) -> Result<Option<Cmd>> {
        self.try_fill_bar_to(
            BarRole::Front,
            ticks,
            ticks_per_second,
            on_tick,
            on_fill_complete,
        )
    }

    /// Strict form of [`fill_back_bar_to`](Self::fill_back_bar_to).
    pub fn try_fill_back_bar_to(
        &mut self,
        ticks: f64,
        ticks_per_second: f64,
        on_tick: Option<Callback>,
        on_fill_complete: Option<Callback>,
    ) -> Result<Option<Cmd>> {
        self.try_fill_bar_to(
            BarRole::Back,
            ticks,
            ticks_per_second,
            on_tick,
            on_fill_complete,
        )
    }

    /// Runs one step of the fill started under `generation`.
    ///
    /// Returns the delay before the next step, or `None` when the chain is
    /// finished or stale. Hosts that run their own timers can call this
    /// directly instead of routing [`FillStepMsg`]s through
    /// [`update`](Self::update).
    pub fn step(&mut self, role: BarRole, generation: u64) -> Option<Duration> {
        let id = self.id;
        let (bar, surface) = self.bar_and_surface(role);

        if generation != bar.generation {
            trace!(id, role = %bar.role, generation, live = bar.generation, "dropped stale step");
            return None;
        }

        let container_px = surface.container_width_px();
        let current_px = surface.bar_width_px(bar.role);

        let chain = bar.chain.as_mut()?;
        // Recomputed every step so a resized container moves the target.
        let target_px = ticks_to_px(chain.target_ticks, container_px);

        if current_px == target_px {
            if let Some(mut chain) = bar.chain.take() {
                if container_px == 0 {
                    bar.current_ticks = check_bounds(px_to_ticks(current_px, container_px));
                } else if chain.stepped {
                    // Pixel-derived ticks drift; settle on the exact target.
                    bar.current_ticks = chain.target_ticks;
                }
                debug!(
                    id,
                    role = %bar.role,
                    ticks = bar.current_ticks,
                    generation,
                    "fill complete"
                );
                (chain.on_fill_complete)();
            }
            return None;
        }

        let next_px = if current_px < target_px {
            current_px + 1
        } else {
            current_px - 1
        };
        surface.set_bar_width_px(bar.role, next_px);
        bar.current_ticks = check_bounds(px_to_ticks(next_px, container_px));
        chain.stepped = true;
        trace!(id, role = %bar.role, px = next_px, target_px, generation, "fill step");

        (chain.on_tick)();
        Some(chain.delay)
    }

    fn next_step(&self, role: BarRole, generation: u64, delay: Duration) -> Cmd {
        let id = self.id;
        bubbletea_tick(delay, move |_| {
            Box::new(FillStepMsg {
                id,
                role,
                generation,
            }) as Msg
        })
    }

    /// Handles a [`FillStepMsg`], returning the command for the following step.
    ///
    /// Any other message, or a step addressed to another controller, is ignored.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(step_msg) = msg.downcast_ref::<FillStepMsg>() {
            if step_msg.id != self.id {
                return None;
            }
            let (role, generation) = (step_msg.role, step_msg.generation);
            return self
                .step(role, generation)
                .map(|delay| self.next_step(role, generation, delay));
        }

        None
    }

    /// Whether the bar's rendered width has reached the container's width.
    ///
    /// Measured on the surface rather than from the tracked ticks, so it stays
    /// correct when the container is resized underneath the bar.
    pub fn is_bar_full(&self, role: BarRole) -> bool {
        self.surface.bar_width_px(role) >= self.surface.container_width_px()
    }

    /// Whether the front bar fills its container.
    pub fn is_front_bar_full(&self) -> bool {
        self.is_bar_full(BarRole::Front)
    }

    /// Whether the back bar fills its container.
    pub fn is_back_bar_full(&self) -> bool {
        self.is_bar_full(BarRole::Back)
    }

    /// Stops any fill on the bar where it stands.
    ///
    /// A step already scheduled for the old fill still arrives, but finds its
    /// generation stale and does nothing.
    pub fn stop_bar(&mut self, role: BarRole) {
        let id = self.id;
        let bar = self.bar_mut(role);
        let generation = bar.bump();
        debug!(id, role = %bar.role, generation, "bar stopped");
    }

    /// Stops the front bar.
    pub fn stop_front_bar(&mut self) {
        self.stop_bar(BarRole::Front)
    }

    /// Stops the back bar.
    pub fn stop_back_bar(&mut self) {
        self.stop_bar(BarRole::Back)
    }

    /// Stops both bars.
    pub fn stop(&mut self) {
        for role in BarRole::ALL {
            self.stop_bar(role);
        }
    }
}

impl DoubleProgressBar<CellSurface> {
    /// Renders both bars as terminal cells.
    pub fn view(&self) -> String {
        self.surface.view()
    }
}

impl<S: Surface + Default> Default for DoubleProgressBar<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl BubbleTeaModel for DoubleProgressBar<CellSurface> {
    fn init() -> (Self, Option<Cmd>) {
        (Self::new(cells::new(&[])), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}
