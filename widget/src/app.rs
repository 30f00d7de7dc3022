use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Function;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Event, HtmlCanvasElement, PointerEvent, Window};

use gridboard_shared::{BoardSnapshot, Coord, Grid};

use crate::actions::{
    apply_snapshot, drag_pan, hover_cell, recenter, resize_viewport, zoom_in, zoom_out,
};
use crate::dom::{client_rect, container_width, get_element, set_drag_cursor};
use crate::geometry::{to_canvas_px, to_cell};
use crate::render::redraw;
use crate::state::{Gesture, GestureEvent, State};
use crate::viewport::{Viewport, MAX_CANVAS_HEIGHT};

fn debug_enabled(window: &Window) -> bool {
    let search = window.location().search().ok().unwrap_or_default();
    search.contains("debug=1") || search.contains("debug=true")
}

/// Grid cell under a pointer event, if it lands on the grid at all.
fn event_cell(state: &State, event: &PointerEvent) -> Option<Coord> {
    let rect = client_rect(&state.canvas);
    let (canvas_x, canvas_y) = to_canvas_px(
        event.client_x() as f64,
        event.client_y() as f64,
        rect,
        state.viewport.canvas_width(),
        state.viewport.canvas_height(),
    )?;
    to_cell(canvas_x, canvas_y, &state.viewport)
}

/// Invokes a host callback with `(row, col)`. The callback runs with
/// no state borrow held, so it may call back into the board freely;
/// a throwing callback is the host's bug and is ignored here.
fn call_cell_callback(callback: &Function, coord: Coord) {
    let _ = callback.call2(
        &JsValue::NULL,
        &JsValue::from_f64(f64::from(coord.row)),
        &JsValue::from_f64(f64::from(coord.col)),
    );
}

/// A scrollable, zoomable grid board mounted over a host-owned canvas.
/// The host pushes full board snapshots in and listens for cell
/// selection; all camera work stays internal.
#[wasm_bindgen]
pub struct Board {
    state: Rc<RefCell<State>>,
}

#[wasm_bindgen]
impl Board {
    /// Mounts the widget on the canvas with the given element id and
    /// renders an all-empty grid of `grid_size` x `grid_size` cells.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, grid_size: u32) -> Result<Board, JsValue> {
        console_error_panic_hook::set_once();

        if grid_size == 0 {
            return Err(JsValue::from_str("Board size must be at least 1"));
        }

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("Missing document"))?;
        let canvas: HtmlCanvasElement = get_element(&document, canvas_id)?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("Canvas 2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let debug = debug_enabled(&window);
        let viewport = Viewport::new(grid_size, container_width(&canvas), MAX_CANVAS_HEIGHT);
        canvas.set_width(viewport.canvas_width() as u32);
        canvas.set_height(viewport.canvas_height() as u32);

        if debug {
            web_sys::console::log_1(
                &format!(
                    "Mounting board on #{canvas_id}: {grid_size}x{grid_size} cells, {}x{} px",
                    viewport.canvas_width(),
                    viewport.canvas_height()
                )
                .into(),
            );
        }

        let state = Rc::new(RefCell::new(State {
            canvas: canvas.clone(),
            ctx,
            grid: Grid::empty(grid_size),
            last_move: None,
            highlighted: None,
            viewport,
            gesture: Gesture::Idle,
            on_cell_selected: None,
            on_cell_hovered: None,
            debug,
        }));

        set_drag_cursor(&canvas, false);
        redraw(&state.borrow());
        wire_events(&window, &canvas, &state)?;

        Ok(Board { state })
    }

    /// Replaces the whole board from a JSON snapshot. A snapshot that
    /// fails validation is rejected with an error and the board keeps
    /// rendering its previous contents.
    #[wasm_bindgen(js_name = pushGridState)]
    pub fn push_grid_state(&self, payload: &str) -> Result<(), JsValue> {
        let snapshot: BoardSnapshot = serde_json::from_str(payload).map_err(|error| {
            let message = format!("Malformed board snapshot: {error}");
            web_sys::console::error_1(&message.clone().into());
            JsValue::from_str(&message)
        })?;
        let mut state = self.state.borrow_mut();
        apply_snapshot(&mut state, snapshot).map_err(|error| {
            let message = format!("Rejected board snapshot: {error}");
            web_sys::console::error_1(&message.clone().into());
            JsValue::from_str(&message)
        })
    }

    /// Host-driven resize, e.g. from a layout observer. The widget
    /// still bounds the canvas by the grid extent and the height cap.
    #[wasm_bindgen(js_name = pushViewportResize)]
    pub fn push_viewport_resize(&self, width_px: f64, height_px: f64) {
        let mut state = self.state.borrow_mut();
        resize_viewport(&mut state, width_px, height_px);
    }

    /// Returns false when the cell size is already at its upper bound.
    #[wasm_bindgen(js_name = requestZoomIn)]
    pub fn request_zoom_in(&self) -> bool {
        zoom_in(&mut self.state.borrow_mut())
    }

    /// Returns false when the cell size is already at its lower bound.
    #[wasm_bindgen(js_name = requestZoomOut)]
    pub fn request_zoom_out(&self) -> bool {
        zoom_out(&mut self.state.borrow_mut())
    }

    /// Scrolls so the given cell sits as close to the canvas center
    /// as the grid edges allow.
    #[wasm_bindgen(js_name = centerOn)]
    pub fn center_on(&self, row: u32, col: u32) {
        let mut state = self.state.borrow_mut();
        recenter(&mut state, Coord::new(row, col));
    }

    /// Registers `callback(row, col)` for click selection. Passing a
    /// new callback replaces the previous one.
    #[wasm_bindgen(js_name = setOnCellSelected)]
    pub fn set_on_cell_selected(&self, callback: Function) {
        self.state.borrow_mut().on_cell_selected = Some(callback);
    }

    /// Registers `callback(row, col)` for hover; fires only while no
    /// drag is in progress.
    #[wasm_bindgen(js_name = setOnCellHovered)]
    pub fn set_on_cell_hovered(&self, callback: Function) {
        self.state.borrow_mut().on_cell_hovered = Some(callback);
    }

    #[wasm_bindgen(js_name = gridSize)]
    pub fn grid_size(&self) -> u32 {
        self.state.borrow().grid.size()
    }

    #[wasm_bindgen(js_name = cellSize)]
    pub fn cell_size(&self) -> f64 {
        self.state.borrow().viewport.cell_size()
    }
}

fn wire_events(
    window: &Window,
    canvas: &HtmlCanvasElement,
    state: &Rc<RefCell<State>>,
) -> Result<(), JsValue> {
    {
        let down_state = state.clone();
        let down_canvas = canvas.clone();
        let ondown = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            if event.button() != 0 {
                return;
            }
            event.prevent_default();
            let mut state = down_state.borrow_mut();
            state
                .gesture
                .press(event.client_x() as f64, event.client_y() as f64);
            // Capture keeps the drag alive when the pointer leaves
            // the canvas with the button still down.
            let _ = down_canvas.set_pointer_capture(event.pointer_id());
            set_drag_cursor(&down_canvas, true);
        });
        canvas.add_event_listener_with_callback("pointerdown", ondown.as_ref().unchecked_ref())?;
        ondown.forget();
    }

    {
        let move_state = state.clone();
        let onmove = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            let mut state = move_state.borrow_mut();
            if let Some(GestureEvent::Pan { dx, dy }) = state
                .gesture
                .motion(event.client_x() as f64, event.client_y() as f64)
            {
                drag_pan(&mut state, dx, dy);
                return;
            }
            if !state.gesture.is_idle() {
                // Pressed but not yet classified: hover stays
                // suppressed for the whole gesture.
                return;
            }
            let cell = event_cell(&state, &event);
            hover_cell(&mut state, cell);
            let Some(coord) = cell else {
                return;
            };
            let callback = state.on_cell_hovered.clone();
            drop(state);
            if let Some(callback) = callback {
                call_cell_callback(&callback, coord);
            }
        });
        canvas.add_event_listener_with_callback("pointermove", onmove.as_ref().unchecked_ref())?;
        onmove.forget();
    }

    {
        let up_state = state.clone();
        let up_canvas = canvas.clone();
        let onup = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            let mut state = up_state.borrow_mut();
            let finished = state.gesture.release();
            set_drag_cursor(&up_canvas, false);
            if up_canvas.has_pointer_capture(event.pointer_id()) {
                let _ = up_canvas.release_pointer_capture(event.pointer_id());
            }
            let cell = event_cell(&state, &event);
            // Re-sync the highlight with wherever the pointer ended up;
            // a drag leaves it pointing at a pre-drag cell otherwise.
            hover_cell(&mut state, cell);
            if finished != Some(GestureEvent::Click) {
                return;
            }
            let Some(coord) = cell else {
                return;
            };
            if state.debug {
                web_sys::console::log_1(
                    &format!("Cell selected: ({}, {})", coord.row, coord.col).into(),
                );
            }
            let callback = state.on_cell_selected.clone();
            drop(state);
            if let Some(callback) = callback {
                call_cell_callback(&callback, coord);
            }
        });
        canvas.add_event_listener_with_callback("pointerup", onup.as_ref().unchecked_ref())?;
        onup.forget();
    }

    {
        let cancel_state = state.clone();
        let cancel_canvas = canvas.clone();
        let oncancel = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            let mut state = cancel_state.borrow_mut();
            state.gesture.cancel();
            set_drag_cursor(&cancel_canvas, false);
            if cancel_canvas.has_pointer_capture(event.pointer_id()) {
                let _ = cancel_canvas.release_pointer_capture(event.pointer_id());
            }
        });
        canvas
            .add_event_listener_with_callback("pointercancel", oncancel.as_ref().unchecked_ref())?;
        canvas.add_event_listener_with_callback(
            "lostpointercapture",
            oncancel.as_ref().unchecked_ref(),
        )?;
        oncancel.forget();
    }

    {
        let leave_state = state.clone();
        let onleave = Closure::<dyn FnMut(PointerEvent)>::new(move |_: PointerEvent| {
            let mut state = leave_state.borrow_mut();
            hover_cell(&mut state, None);
        });
        canvas.add_event_listener_with_callback("pointerleave", onleave.as_ref().unchecked_ref())?;
        onleave.forget();
    }

    {
        let wheel_state = state.clone();
        let onwheel = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let wheel_event = match event.dyn_into::<web_sys::WheelEvent>() {
                Ok(event) => event,
                Err(_) => return,
            };
            wheel_event.prevent_default();
            let delta = wheel_event.delta_y();
            if delta == 0.0 {
                return;
            }
            let mut state = wheel_state.borrow_mut();
            let _ = if delta < 0.0 {
                zoom_in(&mut state)
            } else {
                zoom_out(&mut state)
            };
        });
        canvas.add_event_listener_with_callback("wheel", onwheel.as_ref().unchecked_ref())?;
        onwheel.forget();
    }

    {
        let resize_state = state.clone();
        let onresize = Closure::<dyn FnMut()>::new(move || {
            let mut state = resize_state.borrow_mut();
            let width = container_width(&state.canvas);
            resize_viewport(&mut state, width, MAX_CANVAS_HEIGHT);
            if state.debug {
                web_sys::console::log_1(
                    &format!(
                        "Window resize: canvas now {}x{} px",
                        state.viewport.canvas_width(),
                        state.viewport.canvas_height()
                    )
                    .into(),
                );
            }
        });
        window.add_event_listener_with_callback("resize", onresize.as_ref().unchecked_ref())?;
        onresize.forget();
    }

    Ok(())
}
