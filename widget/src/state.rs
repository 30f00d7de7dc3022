use js_sys::Function;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use gridboard_shared::{Coord, Grid};

use crate::viewport::Viewport;

/// Client-pixel distance a pressed pointer may travel and still count
/// as a click on release.
pub const DRAG_THRESHOLD_PX: f64 = 4.0;

/// Everything the widget knows, shared between event closures behind
/// a single `Rc<RefCell>`.
pub struct State {
    pub canvas: HtmlCanvasElement,
    pub ctx: CanvasRenderingContext2d,
    pub grid: Grid,
    pub last_move: Option<Coord>,
    pub highlighted: Option<Coord>,
    pub viewport: Viewport,
    pub gesture: Gesture,
    pub on_cell_selected: Option<Function>,
    pub on_cell_hovered: Option<Function>,
    pub debug: bool,
}

/// Classification of the pointer-button gesture in progress. A press
/// starts out ambiguous and only commits to panning once the pointer
/// travels past [`DRAG_THRESHOLD_PX`] from where it went down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Idle,
    Pressed {
        start_x: f64,
        start_y: f64,
        last_x: f64,
        last_y: f64,
    },
    Panning {
        last_x: f64,
        last_y: f64,
    },
}

/// What a pointer transition asks the caller to do. Coordinates are
/// client pixels, exactly as the events reported them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// The pointer dragged by this much since the last report.
    Pan { dx: f64, dy: f64 },
    /// The button came back up without ever crossing the threshold.
    Click,
}

impl Gesture {
    pub fn press(&mut self, x: f64, y: f64) {
        *self = Gesture::Pressed {
            start_x: x,
            start_y: y,
            last_x: x,
            last_y: y,
        };
    }

    /// Feeds a pointer position. Motion with no button down is not
    /// this machine's business and reports nothing.
    pub fn motion(&mut self, x: f64, y: f64) -> Option<GestureEvent> {
        match *self {
            Gesture::Idle => None,
            Gesture::Pressed {
                start_x,
                start_y,
                last_x,
                last_y,
            } => {
                let travelled = ((x - start_x).powi(2) + (y - start_y).powi(2)).sqrt();
                if travelled <= DRAG_THRESHOLD_PX {
                    *self = Gesture::Pressed {
                        start_x,
                        start_y,
                        last_x: x,
                        last_y: y,
                    };
                    return None;
                }
                *self = Gesture::Panning { last_x: x, last_y: y };
                Some(GestureEvent::Pan {
                    dx: x - last_x,
                    dy: y - last_y,
                })
            }
            Gesture::Panning { last_x, last_y } => {
                *self = Gesture::Panning { last_x: x, last_y: y };
                Some(GestureEvent::Pan {
                    dx: x - last_x,
                    dy: y - last_y,
                })
            }
        }
    }

    /// Button release. A press that never became a pan is a click at
    /// the release position; a finished pan reports nothing.
    pub fn release(&mut self) -> Option<GestureEvent> {
        let finished = std::mem::replace(self, Gesture::Idle);
        match finished {
            Gesture::Pressed { .. } => Some(GestureEvent::Click),
            Gesture::Idle | Gesture::Panning { .. } => None,
        }
    }

    /// Aborts whatever was in progress without emitting anything.
    /// Used when the browser revokes the pointer capture.
    pub fn cancel(&mut self) {
        *self = Gesture::Idle;
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }
}

#[cfg(test)]
mod tests {
    use super::{Gesture, GestureEvent};

    #[test]
    fn press_and_release_is_a_click() {
        let mut gesture = Gesture::Idle;
        gesture.press(100.0, 100.0);
        assert_eq!(gesture.release(), Some(GestureEvent::Click));
        assert!(gesture.is_idle());
    }

    #[test]
    fn jitter_under_the_threshold_still_clicks() {
        let mut gesture = Gesture::Idle;
        gesture.press(100.0, 100.0);
        assert_eq!(gesture.motion(102.0, 101.0), None);
        assert_eq!(gesture.motion(99.0, 98.0), None);
        assert_eq!(gesture.release(), Some(GestureEvent::Click));
    }

    #[test]
    fn crossing_the_threshold_starts_a_pan_and_suppresses_the_click() {
        let mut gesture = Gesture::Idle;
        gesture.press(100.0, 100.0);
        // 3 px then 4 more: past the threshold relative to the press.
        assert_eq!(gesture.motion(103.0, 100.0), None);
        assert_eq!(
            gesture.motion(107.0, 100.0),
            Some(GestureEvent::Pan { dx: 4.0, dy: 0.0 })
        );
        assert_eq!(gesture.release(), None);
    }

    #[test]
    fn pan_deltas_track_the_pointer_one_to_one() {
        let mut gesture = Gesture::Idle;
        gesture.press(0.0, 0.0);
        assert_eq!(
            gesture.motion(10.0, 0.0),
            Some(GestureEvent::Pan { dx: 10.0, dy: 0.0 })
        );
        assert_eq!(
            gesture.motion(13.0, -5.0),
            Some(GestureEvent::Pan { dx: 3.0, dy: -5.0 })
        );
        assert_eq!(
            gesture.motion(13.0, 2.0),
            Some(GestureEvent::Pan { dx: 0.0, dy: 7.0 })
        );
    }

    #[test]
    fn threshold_distance_is_euclidean() {
        let mut gesture = Gesture::Idle;
        gesture.press(0.0, 0.0);
        // 3-4-5 triangle: exactly 5 px of travel.
        assert!(gesture.motion(3.0, 4.0).is_some());

        let mut diagonal = Gesture::Idle;
        diagonal.press(0.0, 0.0);
        // sqrt(15.68) < 4: each component alone would pass a naive check.
        assert_eq!(diagonal.motion(2.8, 2.8), None);
        assert_eq!(diagonal.release(), Some(GestureEvent::Click));
    }

    #[test]
    fn cancel_discards_the_gesture_silently() {
        let mut gesture = Gesture::Idle;
        gesture.press(50.0, 50.0);
        gesture.cancel();
        assert!(gesture.is_idle());
        assert_eq!(gesture.release(), None);

        gesture.press(50.0, 50.0);
        gesture.motion(100.0, 100.0);
        gesture.cancel();
        assert_eq!(gesture.release(), None);
    }

    #[test]
    fn motion_while_idle_reports_nothing() {
        let mut gesture = Gesture::Idle;
        assert_eq!(gesture.motion(10.0, 10.0), None);
        assert!(gesture.is_idle());
    }
}
