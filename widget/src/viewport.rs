use std::ops::Range;

use gridboard_shared::Coord;

/// Smallest and largest cell edge, in backing-store pixels.
pub const MIN_CELL_SIZE: f64 = 10.0;
pub const MAX_CELL_SIZE: f64 = 40.0;
/// Pixels added to or removed from the cell edge per zoom step.
pub const ZOOM_STEP: f64 = 5.0;
pub const DEFAULT_CELL_SIZE: f64 = 20.0;
/// The canvas never grows taller than this, whatever the container asks for.
pub const MAX_CANVAS_HEIGHT: f64 = 500.0;

/// The pixel-space window currently shown over the grid's full extent.
///
/// Offsets are kept inside `[0, max(0, extent - canvas)]` on each axis
/// after every mutation; the two axes clamp independently, so the
/// order never matters.
#[derive(Debug, Clone)]
pub struct Viewport {
    grid_size: u32,
    cell_size: f64,
    origin_x: f64,
    origin_y: f64,
    canvas_width: f64,
    canvas_height: f64,
}

impl Viewport {
    pub fn new(grid_size: u32, requested_width: f64, requested_height: f64) -> Self {
        let mut viewport = Self {
            grid_size,
            cell_size: DEFAULT_CELL_SIZE,
            origin_x: 0.0,
            origin_y: 0.0,
            canvas_width: 0.0,
            canvas_height: 0.0,
        };
        viewport.resize(requested_width, requested_height);
        viewport
    }

    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn origin_x(&self) -> f64 {
        self.origin_x
    }

    pub fn origin_y(&self) -> f64 {
        self.origin_y
    }

    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    /// Full pixel extent of the grid at the current cell size.
    pub fn extent(&self) -> f64 {
        f64::from(self.grid_size) * self.cell_size
    }

    /// Applies new canvas dimensions. The width is capped at the grid
    /// extent, the height at the extent and the display cap, and both
    /// are floored to whole backing pixels so they match what the
    /// canvas element will actually hold.
    pub fn resize(&mut self, requested_width: f64, requested_height: f64) {
        let extent = self.extent();
        self.canvas_width = requested_width.max(0.0).min(extent).floor();
        self.canvas_height = requested_height
            .max(0.0)
            .min(extent)
            .min(MAX_CANVAS_HEIGHT)
            .floor();
        self.clamp_origin();
    }

    /// Moves the window over the grid; positive `dx` scrolls it right.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.origin_x += dx;
        self.origin_y += dy;
        self.clamp_origin();
    }

    pub fn zoom_in(&mut self) -> bool {
        self.step_cell_size(ZOOM_STEP)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.step_cell_size(-ZOOM_STEP)
    }

    fn step_cell_size(&mut self, step: f64) -> bool {
        let next = self.cell_size + step;
        if !(MIN_CELL_SIZE..=MAX_CELL_SIZE).contains(&next) {
            return false;
        }
        self.set_cell_size_holding_center(next);
        true
    }

    /// Changes the cell edge while the absolute pixel-space center of
    /// the window stays fixed, then re-clamps. Pixel offsets are not
    /// rescaled by the new cell size; only the re-clamp against the
    /// changed extent can move the origin.
    pub fn set_cell_size_holding_center(&mut self, cell_size: f64) {
        let center_x = self.origin_x + self.canvas_width / 2.0;
        let center_y = self.origin_y + self.canvas_height / 2.0;
        self.cell_size = cell_size;
        self.origin_x = center_x - self.canvas_width / 2.0;
        self.origin_y = center_y - self.canvas_height / 2.0;
        self.clamp_origin();
    }

    /// Scrolls so the given cell's midpoint sits at the window center,
    /// as closely as clamping allows.
    pub fn center_on(&mut self, coord: Coord) {
        let half_cell = self.cell_size / 2.0;
        self.origin_x = f64::from(coord.col) * self.cell_size + half_cell - self.canvas_width / 2.0;
        self.origin_y = f64::from(coord.row) * self.cell_size + half_cell - self.canvas_height / 2.0;
        self.clamp_origin();
    }

    /// Rows intersecting the window. The extra `+1` cell keeps rows
    /// that are only partially scrolled into view; the end is capped
    /// at the grid size so callers never index past the store.
    pub fn visible_rows(&self) -> Range<u32> {
        visible_axis(self.origin_y, self.canvas_height, self.cell_size, self.grid_size)
    }

    /// Columns intersecting the window; see [`Viewport::visible_rows`].
    pub fn visible_cols(&self) -> Range<u32> {
        visible_axis(self.origin_x, self.canvas_width, self.cell_size, self.grid_size)
    }

    pub fn is_visible(&self, coord: Coord) -> bool {
        self.visible_rows().contains(&coord.row) && self.visible_cols().contains(&coord.col)
    }

    fn clamp_origin(&mut self) {
        let extent = self.extent();
        self.origin_x = clamp_axis(self.origin_x, extent, self.canvas_width);
        self.origin_y = clamp_axis(self.origin_y, extent, self.canvas_height);
    }
}

fn clamp_axis(origin: f64, extent: f64, canvas: f64) -> f64 {
    origin.max(0.0).min((extent - canvas).max(0.0))
}

fn visible_axis(origin: f64, canvas: f64, cell: f64, size: u32) -> Range<u32> {
    let start = ((origin / cell).floor() as u32).min(size);
    let span = (canvas / cell).ceil() as u32 + 1;
    start..start.saturating_add(span).min(size)
}
