//! An in-memory [`Surface`] that renders as a line of terminal cells.
//!
//! One pixel is one terminal cell. The container is `width` cells wide; the
//! back bar is drawn first and the front bar is drawn over it, so whichever
//! bar is shorter stays visible on top only if it is the front one.
//!
//! # Basic Usage
//!
//! ```rust
//! use double_progress::cells::{new, with_width, with_front_fill, without_percentage};
//!
//! let surface = new(&[
//!     with_width(60),
//!     with_front_fill('█', "#00ff00".to_string()),
//!     without_percentage(),
//! ]);
//! assert_eq!(surface.width, 60);
//! ```

use crate::surface::{BarRole, Surface};
use lipgloss_extras::lipgloss::{self, Color, Style};

const DEFAULT_WIDTH: u32 = 40;

/// Configuration options for a [`CellSurface`].
///
/// Options are applied in order by [`new`], so later options win.
#[derive(Debug, Clone)]
pub enum CellSurfaceOption {
    /// Sets the container width in cells (the percentage text is extra).
    WithWidth(u32),
    /// Character and colour used for cells covered by the front bar.
    WithFrontFill(char, String),
    /// Character and colour used for cells covered only by the back bar.
    WithBackFill(char, String),
    /// Character and colour used for cells covered by neither bar.
    WithEmptyFill(char, String),
    /// Hides the percentage text after the bar.
    WithoutPercentage,
}

impl CellSurfaceOption {
    fn apply(&self, s: &mut CellSurface) {
        match self {
            CellSurfaceOption::WithWidth(width) => {
                s.width = *width;
            }
            CellSurfaceOption::WithFrontFill(ch, color) => {
                s.front = *ch;
                s.front_color = color.clone();
            }
            CellSurfaceOption::WithBackFill(ch, color) => {
                s.back = *ch;
                s.back_color = color.clone();
            }
            CellSurfaceOption::WithEmptyFill(ch, color) => {
                s.empty = *ch;
                s.empty_color = color.clone();
            }
            CellSurfaceOption::WithoutPercentage => {
                s.show_percentage = false;
            }
        }
    }
}

/// Sets the container width in cells.
pub fn with_width(width: u32) -> CellSurfaceOption {
    CellSurfaceOption::WithWidth(width)
}

/// Sets the front bar's fill character and colour (hex code or named colour).
pub fn with_front_fill(ch: char, color: String) -> CellSurfaceOption {
    CellSurfaceOption::WithFrontFill(ch, color)
}

/// Sets the back bar's fill character and colour.
pub fn with_back_fill(ch: char, color: String) -> CellSurfaceOption {
    CellSurfaceOption::WithBackFill(ch, color)
}

/// Sets the character and colour of uncovered cells.
pub fn with_empty_fill(ch: char, color: String) -> CellSurfaceOption {
    CellSurfaceOption::WithEmptyFill(ch, color)
}

/// Hides the percentage text.
pub fn without_percentage() -> CellSurfaceOption {
    CellSurfaceOption::WithoutPercentage
}

/// A container and two bars measured in terminal cells.
#[derive(Debug, Clone)]
pub struct CellSurface {
    /// Container width in cells.
    pub width: u32,

    /// Front bar fill character.
    pub front: char,
    /// Front bar colour.
    pub front_color: String,

    /// Back bar fill character.
    pub back: char,
    /// Back bar colour.
    pub back_color: String,

    /// Uncovered cell character.
    pub empty: char,
    /// Uncovered cell colour.
    pub empty_color: String,

    /// Whether the front bar's percentage follows the bar.
    pub show_percentage: bool,
    /// Style applied to the percentage text.
    pub percentage_style: Style,

    front_px: u32,
    back_px: u32,
}

/// Creates a cell surface with both bars empty.
///
/// # Examples
///
/// ```rust
/// use double_progress::cells::{new, with_back_fill};
///
/// let surface = new(&[with_back_fill('▒', "#888888".to_string())]);
/// assert_eq!(surface.back, '▒');
/// ```
pub fn new(opts: &[CellSurfaceOption]) -> CellSurface {
    let mut s = CellSurface {
        width: DEFAULT_WIDTH,
        front: '█',
        front_color: "#7571F9".to_string(),
        back: '▓',
        back_color: "#EE6FF8".to_string(),
        empty: '░',
        empty_color: "#606060".to_string(),
        show_percentage: true,
        percentage_style: Style::new(),
        front_px: 0,
        back_px: 0,
    };

    for opt in opts {
        opt.apply(&mut s);
    }

    s
}

impl CellSurface {
    /// Resizes the container. Bar widths are left alone.
    pub fn set_width(&mut self, width: u32) {
        self.width = width;
    }

    /// Renders the bars, plus the front bar's percentage unless disabled.
    pub fn view(&self) -> String {
        let mut result = self.bar_view();
        result.push_str(&self.percentage_view());
        result
    }

    fn bar_view(&self) -> String {
        let front = self.front_px.min(self.width);
        // Only the part of the back bar that sticks out past the front bar shows.
        let back = self.back_px.min(self.width).saturating_sub(front);
        let empty = self.width - front - back;

        let mut result = String::new();
        for (count, ch, color) in [
            (front, self.front, &self.front_color),
            (back, self.back, &self.back_color),
            (empty, self.empty, &self.empty_color),
        ] {
            if count == 0 {
                continue;
            }
            let styled = Style::new()
                .foreground(Color::from(color.as_str()))
                .render(&ch.to_string());
            result.push_str(&styled.repeat(count as usize));
        }
        result
    }

    fn percentage_view(&self) -> String {
        if !self.show_percentage {
            return String::new();
        }

        let percent = if self.width == 0 {
            0.0
        } else {
            (f64::from(self.front_px) / f64::from(self.width)).clamp(0.0, 1.0)
        };
        let percentage = format!(" {:3.0}%", percent * 100.0);
        self.percentage_style.render(&percentage)
    }

    /// Visible width of [`CellSurface::view`], ignoring escape sequences.
    pub fn view_width(&self) -> usize {
        lipgloss::width_visible(&self.view())
    }
}

impl Surface for CellSurface {
    fn container_width_px(&self) -> u32 {
        self.width
    }

    fn bar_width_px(&self, role: BarRole) -> u32 {
        match role {
            BarRole::Front => self.front_px,
            BarRole::Back => self.back_px,
        }
    }

    fn set_bar_width_px(&mut self, role: BarRole, px: u32) {
        match role {
            BarRole::Front => self.front_px = px,
            BarRole::Back => self.back_px = px,
        }
    }
}

impl Default for CellSurface {
    fn default() -> Self {
        new(&[])
    }
}
