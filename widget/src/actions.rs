use gridboard_shared::{BoardSnapshot, Coord, SnapshotError};

use crate::render::redraw;
use crate::state::State;

/// Replaces the whole board from a host snapshot. On rejection the
/// previous grid, last-move marker and pixels all stay as they were.
pub fn apply_snapshot(state: &mut State, snapshot: BoardSnapshot) -> Result<(), SnapshotError> {
    let (grid, last_move) = snapshot.into_grid(state.grid.size())?;
    state.grid = grid;
    state.last_move = last_move;
    redraw(state);
    Ok(())
}

/// Moves the hover highlight, repainting only when the cell actually
/// changed. `None` clears it.
pub fn hover_cell(state: &mut State, coord: Option<Coord>) {
    if state.highlighted == coord {
        return;
    }
    state.highlighted = coord;
    redraw(state);
}

pub fn zoom_in(state: &mut State) -> bool {
    let accepted = state.viewport.zoom_in();
    if accepted {
        redraw(state);
    }
    accepted
}

pub fn zoom_out(state: &mut State) -> bool {
    let accepted = state.viewport.zoom_out();
    if accepted {
        redraw(state);
    }
    accepted
}

pub fn recenter(state: &mut State, coord: Coord) {
    state.viewport.center_on(coord);
    redraw(state);
}

/// Pointer drag: the grid follows the pointer, so the window over it
/// moves the opposite way.
pub fn drag_pan(state: &mut State, pointer_dx: f64, pointer_dy: f64) {
    state.viewport.pan_by(-pointer_dx, -pointer_dy);
    redraw(state);
}

/// Resizes the viewport and the canvas element backing it, then
/// repaints at the new dimensions.
pub fn resize_viewport(state: &mut State, requested_width: f64, requested_height: f64) {
    state.viewport.resize(requested_width, requested_height);
    state.canvas.set_width(state.viewport.canvas_width() as u32);
    state.canvas.set_height(state.viewport.canvas_height() as u32);
    redraw(state);
}
