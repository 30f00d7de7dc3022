use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use gridboard_shared::{CellState, Coord};

use crate::geometry::cell_origin_px;
use crate::state::State;
use crate::viewport::Viewport;

const BACKGROUND_FILL: &str = "#ffffff";
const GRID_LINE_STYLE: &str = "#ccc";
const GRID_LINE_WIDTH: f64 = 1.0;
const CROSS_STYLE: &str = "#3498db";
const RING_STYLE: &str = "#e74c3c";
const GLYPH_LINE_WIDTH: f64 = 2.0;
/// Inset of the cross arms from the cell border, as a share of the edge.
const CROSS_INSET: f64 = 0.2;
/// Ring radius as a share of the cell edge.
const RING_RADIUS: f64 = 0.4;
const HIGHLIGHT_FILL: &str = "rgba(173, 216, 230, 0.5)";
const LAST_MOVE_FILL: &str = "rgba(255, 255, 0, 0.3)";

/// Repaints the whole canvas from the current state. Only cells whose
/// row and column ranges intersect the viewport are touched, so the
/// cost tracks the window, not the grid.
pub fn redraw(state: &State) {
    let ctx = &state.ctx;
    let viewport = &state.viewport;

    ctx.set_fill_style_str(BACKGROUND_FILL);
    ctx.fill_rect(0.0, 0.0, viewport.canvas_width(), viewport.canvas_height());

    draw_grid_lines(ctx, viewport);

    let rows = viewport.visible_rows();
    let cols = viewport.visible_cols();
    for row in rows {
        for col in cols.clone() {
            let coord = Coord::new(row, col);
            match state.grid.cell(coord) {
                Some(CellState::PlayerOne) => draw_cross(ctx, viewport, coord),
                Some(CellState::PlayerTwo) => draw_ring(ctx, viewport, coord),
                Some(CellState::Empty) | None => {}
            }
        }
    }

    if let Some(coord) = state.highlighted {
        fill_cell_overlay(ctx, viewport, coord, HIGHLIGHT_FILL);
    }
    // Painted after the glyphs so the translucent marker tints the
    // mark instead of sitting under it.
    if let Some(coord) = state.last_move {
        fill_cell_overlay(ctx, viewport, coord, LAST_MOVE_FILL);
    }
}

/// Strokes the cell boundaries from `start` through `end` on both
/// axes; the inclusive end closes the far edge of the last cell.
fn draw_grid_lines(ctx: &CanvasRenderingContext2d, viewport: &Viewport) {
    ctx.set_stroke_style_str(GRID_LINE_STYLE);
    ctx.set_line_width(GRID_LINE_WIDTH);

    let cols = viewport.visible_cols();
    for boundary in cols.start..=cols.end {
        let x = f64::from(boundary) * viewport.cell_size() - viewport.origin_x();
        ctx.begin_path();
        ctx.move_to(x, 0.0);
        ctx.line_to(x, viewport.canvas_height());
        ctx.stroke();
    }

    let rows = viewport.visible_rows();
    for boundary in rows.start..=rows.end {
        let y = f64::from(boundary) * viewport.cell_size() - viewport.origin_y();
        ctx.begin_path();
        ctx.move_to(0.0, y);
        ctx.line_to(viewport.canvas_width(), y);
        ctx.stroke();
    }
}

fn draw_cross(ctx: &CanvasRenderingContext2d, viewport: &Viewport, coord: Coord) {
    let (x, y) = cell_origin_px(coord, viewport);
    let cell = viewport.cell_size();
    let inset = cell * CROSS_INSET;

    ctx.set_stroke_style_str(CROSS_STYLE);
    ctx.set_line_width(GLYPH_LINE_WIDTH);
    ctx.begin_path();
    ctx.move_to(x + inset, y + inset);
    ctx.line_to(x + cell - inset, y + cell - inset);
    ctx.move_to(x + cell - inset, y + inset);
    ctx.line_to(x + inset, y + cell - inset);
    ctx.stroke();
}

fn draw_ring(ctx: &CanvasRenderingContext2d, viewport: &Viewport, coord: Coord) {
    let (x, y) = cell_origin_px(coord, viewport);
    let cell = viewport.cell_size();

    ctx.set_stroke_style_str(RING_STYLE);
    ctx.set_line_width(GLYPH_LINE_WIDTH);
    ctx.begin_path();
    let _ = ctx.arc(x + cell / 2.0, y + cell / 2.0, cell * RING_RADIUS, 0.0, PI * 2.0);
    ctx.stroke();
}

fn fill_cell_overlay(ctx: &CanvasRenderingContext2d, viewport: &Viewport, coord: Coord, style: &str) {
    if !viewport.is_visible(coord) {
        return;
    }
    let (x, y) = cell_origin_px(coord, viewport);
    ctx.set_fill_style_str(style);
    ctx.fill_rect(x, y, viewport.cell_size(), viewport.cell_size());
}
