use gridboard_shared::Coord;

use crate::viewport::Viewport;

/// Canvas bounding box in CSS pixels, as reported by the DOM.
#[derive(Debug, Clone, Copy)]
pub struct ClientRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Maps client (CSS-pixel) pointer coordinates into the canvas backing
/// store, correcting for any CSS scaling of the displayed element.
/// A degenerate rect or non-finite input yields `None`.
pub fn to_canvas_px(
    client_x: f64,
    client_y: f64,
    rect: ClientRect,
    backing_width: f64,
    backing_height: f64,
) -> Option<(f64, f64)> {
    if !client_x.is_finite() || !client_y.is_finite() {
        return None;
    }
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return None;
    }
    let scale_x = backing_width / rect.width;
    let scale_y = backing_height / rect.height;
    Some(((client_x - rect.left) * scale_x, (client_y - rect.top) * scale_y))
}

/// Grid cell under a backing-store position, or `None` when the
/// position falls outside the grid. Out-of-range positions are never
/// clamped onto an edge cell.
pub fn to_cell(canvas_x: f64, canvas_y: f64, viewport: &Viewport) -> Option<Coord> {
    if !canvas_x.is_finite() || !canvas_y.is_finite() {
        return None;
    }
    let cell = viewport.cell_size();
    let col = ((canvas_x + viewport.origin_x()) / cell).floor();
    let row = ((canvas_y + viewport.origin_y()) / cell).floor();
    let size = f64::from(viewport.grid_size());
    if col < 0.0 || row < 0.0 || col >= size || row >= size {
        return None;
    }
    Some(Coord::new(row as u32, col as u32))
}

/// Backing-store position of a cell's top-left corner; the inverse of
/// [`to_cell`] and the anchor the renderer draws from.
pub fn cell_origin_px(coord: Coord, viewport: &Viewport) -> (f64, f64) {
    let cell = viewport.cell_size();
    (
        f64::from(coord.col) * cell - viewport.origin_x(),
        f64::from(coord.row) * cell - viewport.origin_y(),
    )
}

#[cfg(test)]
mod tests {
    use gridboard_shared::Coord;

    use super::{cell_origin_px, to_canvas_px, to_cell, ClientRect};
    use crate::viewport::Viewport;

    fn rect(left: f64, top: f64, width: f64, height: f64) -> ClientRect {
        ClientRect {
            left,
            top,
            width,
            height,
        }
    }

    #[test]
    fn unscaled_canvas_maps_one_to_one() {
        let viewport = Viewport::new(50, 500.0, 500.0);
        let (x, y) = to_canvas_px(110.0, 110.0, rect(0.0, 0.0, 500.0, 500.0), 500.0, 500.0)
            .expect("in-bounds pointer");
        assert_eq!((x, y), (110.0, 110.0));
        assert_eq!(to_cell(x, y, &viewport), Some(Coord::new(5, 5)));
    }

    #[test]
    fn css_scaling_is_corrected() {
        // Canvas displayed at half its backing size and offset in the page.
        let (x, y) = to_canvas_px(35.0, 70.0, rect(10.0, 20.0, 250.0, 250.0), 500.0, 500.0)
            .expect("in-bounds pointer");
        assert_eq!((x, y), (50.0, 100.0));
    }

    #[test]
    fn degenerate_rect_yields_none() {
        assert!(to_canvas_px(10.0, 10.0, rect(0.0, 0.0, 0.0, 500.0), 500.0, 500.0).is_none());
        assert!(to_canvas_px(10.0, 10.0, rect(0.0, 0.0, 500.0, 0.0), 500.0, 500.0).is_none());
        assert!(to_canvas_px(f64::NAN, 10.0, rect(0.0, 0.0, 500.0, 500.0), 500.0, 500.0).is_none());
    }

    #[test]
    fn positions_off_the_grid_are_never_clamped() {
        let mut viewport = Viewport::new(10, 500.0, 500.0);
        // 10 cells at 20 px: the grid ends at 200 px in a 200 px canvas.
        assert_eq!(viewport.canvas_width(), 200.0);
        assert_eq!(to_cell(-0.5, 10.0, &viewport), None);
        assert_eq!(to_cell(10.0, 205.0, &viewport), None);
        assert_eq!(to_cell(199.9, 199.9, &viewport), Some(Coord::new(9, 9)));

        // Scrolled to the far corner the same canvas edge is in range.
        viewport = Viewport::new(50, 500.0, 500.0);
        viewport.pan_by(9999.0, 9999.0);
        assert_eq!(to_cell(499.9, 499.9, &viewport), Some(Coord::new(49, 49)));
    }

    #[test]
    fn scrolled_viewport_shifts_the_mapping() {
        let mut viewport = Viewport::new(50, 500.0, 500.0);
        viewport.pan_by(100.0, 60.0);
        assert_eq!(to_cell(10.0, 10.0, &viewport), Some(Coord::new(3, 5)));
    }

    #[test]
    fn cell_origin_round_trips_through_to_cell() {
        let mut viewport = Viewport::new(50, 500.0, 500.0);
        viewport.pan_by(137.0, 41.0);
        for coord in [Coord::new(7, 12), Coord::new(20, 6), Coord::new(24, 24)] {
            let (x, y) = cell_origin_px(coord, &viewport);
            let half = viewport.cell_size() / 2.0;
            assert_eq!(to_cell(x + half, y + half, &viewport), Some(coord));
        }
    }
}
