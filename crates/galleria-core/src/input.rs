//! Pointer input handling for mouse and touch.

use kurbo::Point;
use serde::{Deserialize, Serialize};

// Use web_time for WASM compatibility
#[cfg(not(target_arch = "wasm32"))]
pub use std::time::Instant;
#[cfg(target_arch = "wasm32")]
pub use web_time::Instant;

use crate::config::GalleryConfig;

/// Source device of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PointerKind {
    #[default]
    Mouse,
    Touch,
}

/// Pointer event type for unified mouse/touch handling.
///
/// Positions are client coordinates in pixels. For touch input the host
/// passes the first changed touch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point, kind: PointerKind },
    Move { position: Point, kind: PointerKind },
    Up { position: Point, kind: PointerKind },
    /// The platform aborted the interaction (e.g. `touchcancel`).
    Cancel,
}

/// A recognized pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    DragStart(Point),
    DragMove(Point),
    DragEnd,
    /// Double click or double tap.
    DoubleTap(Point),
}

/// Turns raw pointer events into drag and double-tap gestures.
#[derive(Debug, Clone)]
pub struct GestureTracker {
    double_click_ms: u64,
    double_click_distance: f64,
    /// Whether a pointer is currently held down.
    pressed: bool,
    /// Last press time and position for double-tap detection.
    last_press: Option<(Instant, Point)>,
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new(&GalleryConfig::default())
    }
}

impl GestureTracker {
    /// Create a tracker using the double click tolerances from `config`.
    pub fn new(config: &GalleryConfig) -> Self {
        Self {
            double_click_ms: config.double_click_ms,
            double_click_distance: config.double_click_distance,
            pressed: false,
            last_press: None,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Process an event stamped with the current time.
    pub fn handle(&mut self, event: PointerEvent) -> Vec<Gesture> {
        self.handle_at(event, Instant::now())
    }

    /// Process an event that happened at `now`.
    pub fn handle_at(&mut self, event: PointerEvent, now: Instant) -> Vec<Gesture> {
        let mut gestures = Vec::new();
        match event {
            PointerEvent::Down { position, .. } => {
                self.pressed = true;
                gestures.push(Gesture::DragStart(position));

                if self.is_double_tap(position, now) {
                    gestures.push(Gesture::DoubleTap(position));
                    // Reset so a triple click is not read as two double clicks
                    self.last_press = None;
                } else {
                    self.last_press = Some((now, position));
                }
            }
            PointerEvent::Move { position, .. } => {
                if self.pressed {
                    gestures.push(Gesture::DragMove(position));
                }
            }
            PointerEvent::Up { .. } | PointerEvent::Cancel => {
                if self.pressed {
                    gestures.push(Gesture::DragEnd);
                }
                self.pressed = false;
            }
        }
        gestures
    }

    /// Forget any press in progress.
    pub fn reset(&mut self) {
        self.pressed = false;
        self.last_press = None;
    }

    fn is_double_tap(&self, position: Point, now: Instant) -> bool {
        let Some((last_time, last_pos)) = self.last_press else {
            return false;
        };
        let elapsed = now.saturating_duration_since(last_time).as_millis();
        elapsed < u128::from(self.double_click_ms)
            && position.distance(last_pos) < self.double_click_distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn down(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Down {
            position: Point::new(x, y),
            kind: PointerKind::Mouse,
        }
    }

    fn up(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Up {
            position: Point::new(x, y),
            kind: PointerKind::Mouse,
        }
    }

    #[test]
    fn test_drag_sequence() {
        let mut tracker = GestureTracker::default();
        let t0 = Instant::now();

        assert_eq!(
            tracker.handle_at(down(10.0, 10.0), t0),
            vec![Gesture::DragStart(Point::new(10.0, 10.0))]
        );
        assert!(tracker.is_pressed());

        let moved = tracker.handle_at(
            PointerEvent::Move {
                position: Point::new(20.0, 15.0),
                kind: PointerKind::Touch,
            },
            t0,
        );
        assert_eq!(moved, vec![Gesture::DragMove(Point::new(20.0, 15.0))]);

        assert_eq!(tracker.handle_at(up(20.0, 15.0), t0), vec![Gesture::DragEnd]);
        assert!(!tracker.is_pressed());
    }

    #[test]
    fn test_move_without_press_is_ignored() {
        let mut tracker = GestureTracker::default();
        let gestures = tracker.handle(PointerEvent::Move {
            position: Point::new(5.0, 5.0),
            kind: PointerKind::Mouse,
        });
        assert!(gestures.is_empty());
        assert!(tracker.handle(up(5.0, 5.0)).is_empty());
    }

    #[test]
    fn test_double_tap_detection() {
        let mut tracker = GestureTracker::default();
        let t0 = Instant::now();

        tracker.handle_at(down(100.0, 100.0), t0);
        tracker.handle_at(up(100.0, 100.0), t0);

        let second = tracker.handle_at(down(102.0, 101.0), t0 + Duration::from_millis(200));
        assert!(second.contains(&Gesture::DoubleTap(Point::new(102.0, 101.0))));
        tracker.handle_at(up(102.0, 101.0), t0 + Duration::from_millis(220));

        // A third quick press starts a new sequence instead of firing again
        let third = tracker.handle_at(down(102.0, 101.0), t0 + Duration::from_millis(300));
        assert!(!third.iter().any(|g| matches!(g, Gesture::DoubleTap(_))));
    }

    #[test]
    fn test_double_tap_too_slow() {
        let mut tracker = GestureTracker::default();
        let t0 = Instant::now();

        tracker.handle_at(down(100.0, 100.0), t0);
        tracker.handle_at(up(100.0, 100.0), t0);

        let second = tracker.handle_at(down(100.0, 100.0), t0 + Duration::from_millis(800));
        assert_eq!(second, vec![Gesture::DragStart(Point::new(100.0, 100.0))]);
    }

    #[test]
    fn test_double_tap_too_far() {
        let mut tracker = GestureTracker::default();
        let t0 = Instant::now();

        tracker.handle_at(down(100.0, 100.0), t0);
        tracker.handle_at(up(100.0, 100.0), t0);

        let second = tracker.handle_at(down(200.0, 200.0), t0 + Duration::from_millis(100));
        assert!(!second.iter().any(|g| matches!(g, Gesture::DoubleTap(_))));
    }

    #[test]
    fn test_cancel_ends_drag() {
        let mut tracker = GestureTracker::default();
        tracker.handle(down(1.0, 1.0));
        assert_eq!(tracker.handle(PointerEvent::Cancel), vec![Gesture::DragEnd]);
        assert!(!tracker.is_pressed());
    }
}
