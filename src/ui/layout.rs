//! Panel geometry
//!
//! Both front ends place their panels from the same constants, expressed
//! in "cells". A terminal cell is one character; in the graphics front end
//! a cell is half the body font size wide and one font size tall.

/// Width of the navigation column, in cells
pub const NAV_COLUMN_CELLS: f32 = 16.0;
/// Rows above the timeline (title bar + menu bar + spacing)
pub const TIMELINE_TOP_CELLS: f32 = 3.0;
/// Login panel origin and size, in cells
pub const LOGIN_ORIGIN_CELLS: (f32, f32) = (4.0, 4.0);
pub const LOGIN_SIZE_CELLS: (f32, f32) = (48.0, 10.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PanelRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Intersection with a display of the given size
    pub fn clip(&self, display: Size) -> PanelRect {
        let x = self.x.clamp(0.0, display.width.max(0.0));
        let y = self.y.clamp(0.0, display.height.max(0.0));
        let right = (self.x + self.width).clamp(x, display.width.max(x));
        let bottom = (self.y + self.height).clamp(y, display.height.max(y));
        PanelRect::new(x, y, right - x, bottom - y)
    }
}

/// Unit size for one of the two front ends
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutProfile {
    pub cell_width: f32,
    pub cell_height: f32,
}

impl LayoutProfile {
    /// One unit per character cell
    pub const TERMINAL: LayoutProfile = LayoutProfile {
        cell_width: 1.0,
        cell_height: 1.0,
    };

    /// Font-relative units for a windowed front end
    pub fn graphics(font_size: f32) -> Self {
        Self {
            cell_width: font_size * 0.5,
            cell_height: font_size,
        }
    }

    pub fn cells(&self, columns: f32, rows: f32) -> (f32, f32) {
        (columns * self.cell_width, rows * self.cell_height)
    }

    /// The navigation panel covers the whole display
    pub fn navigation(&self, display: Size) -> PanelRect {
        PanelRect::new(0.0, 0.0, display.width, display.height)
    }

    pub fn nav_column_width(&self) -> f32 {
        NAV_COLUMN_CELLS * self.cell_width
    }

    /// The timeline sits right of the navigation column, one cell short of
    /// the right edge
    pub fn timeline(&self, display: Size) -> PanelRect {
        let (x, y) = self.cells(NAV_COLUMN_CELLS, TIMELINE_TOP_CELLS);
        PanelRect::new(
            x,
            y,
            display.width - (NAV_COLUMN_CELLS + 1.0) * self.cell_width,
            display.height - y,
        )
    }

    pub fn login(&self) -> PanelRect {
        let (x, y) = self.cells(LOGIN_ORIGIN_CELLS.0, LOGIN_ORIGIN_CELLS.1);
        let (width, height) = self.cells(LOGIN_SIZE_CELLS.0, LOGIN_SIZE_CELLS.1);
        PanelRect::new(x, y, width, height)
    }
}

/// Panel rectangles for one frame, already clipped to the display
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramePlan {
    pub navigation: PanelRect,
    pub timeline: PanelRect,
    pub login: Option<PanelRect>,
}

impl FramePlan {
    /// Place every panel for this frame, in declaration order.
    ///
    /// A panel pushed off a small display is still declared, with an empty
    /// rectangle; it simply draws nothing until the display grows again.
    pub fn begin(profile: &LayoutProfile, display: Size, login_visible: bool) -> Self {
        Self {
            navigation: profile.navigation(display).clip(display),
            timeline: profile.timeline(display).clip(display),
            login: login_visible.then(|| profile.login().clip(display)),
        }
    }
}
