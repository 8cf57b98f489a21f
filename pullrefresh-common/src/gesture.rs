//! Drag recognition from raw pointer coordinates

use serde::{Deserialize, Serialize};

/// Dominant direction of a drag, relative to where it started
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// One drag-move sample handed to the controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragMove {
    pub direction: Direction,
    /// Displacement (px) along `direction` since the gesture started
    pub distance: f64,
}

impl DragMove {
    pub fn down(distance: f64) -> Self {
        Self {
            direction: Direction::Down,
            distance,
        }
    }
}

/// Turns touch/pointer positions into drag-move samples.
///
/// Movement inside the slop radius is not a drag yet. Once the threshold is
/// crossed every further sample produces a `DragMove`, classified by the
/// axis with the larger displacement.
#[derive(Debug, Clone)]
pub struct DragTracker {
    threshold: f64,
    origin: Option<(f64, f64)>,
    dragging: bool,
}

impl DragTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.max(0.0),
            origin: None,
            dragging: false,
        }
    }

    /// Pointer went down.
    ///
    /// Ignored while a drag is in progress, so an extra finger cannot move the
    /// origin of an active pull. Returns whether a new gesture was started.
    pub fn begin(&mut self, x: f64, y: f64) -> bool {
        if self.dragging {
            return false;
        }
        self.origin = Some((x, y));
        true
    }

    /// Pointer moved; returns a sample once the drag is recognised
    pub fn track(&mut self, x: f64, y: f64) -> Option<DragMove> {
        let (ox, oy) = self.origin?;
        let dx = x - ox;
        let dy = y - oy;

        if !self.dragging {
            if dx.hypot(dy) < self.threshold {
                return None;
            }
            self.dragging = true;
        }

        let sample = if dy.abs() >= dx.abs() {
            DragMove {
                direction: if dy >= 0.0 { Direction::Down } else { Direction::Up },
                distance: dy.abs(),
            }
        } else {
            DragMove {
                direction: if dx >= 0.0 { Direction::Right } else { Direction::Left },
                distance: dx.abs(),
            }
        };

        Some(sample)
    }

    /// Pointer released or cancelled; true when a drag had been recognised
    pub fn finish(&mut self) -> bool {
        let was_dragging = self.dragging;
        self.origin = None;
        self.dragging = false;
        was_dragging
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }
}

impl Default for DragTracker {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_DRAG_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slop_suppresses_small_moves() {
        let mut tracker = DragTracker::new(10.0);
        tracker.begin(100.0, 100.0);

        assert_eq!(tracker.track(103.0, 105.0), None);
        assert!(!tracker.is_dragging());
        assert!(!tracker.finish());
    }

    #[test]
    fn test_downward_drag() {
        let mut tracker = DragTracker::new(10.0);
        tracker.begin(50.0, 20.0);

        let sample = tracker.track(52.0, 60.0).unwrap();
        assert_eq!(sample.direction, Direction::Down);
        assert_eq!(sample.distance, 40.0);

        // Once recognised, moves back inside the slop still report
        let sample = tracker.track(50.0, 25.0).unwrap();
        assert_eq!(sample, DragMove::down(5.0));

        assert!(tracker.finish());
        assert!(!tracker.is_dragging());
    }

    #[test]
    fn test_dominant_axis() {
        let mut tracker = DragTracker::new(10.0);
        tracker.begin(0.0, 0.0);

        let sample = tracker.track(-30.0, 12.0).unwrap();
        assert_eq!(sample.direction, Direction::Left);
        assert_eq!(sample.distance, 30.0);

        let sample = tracker.track(5.0, -40.0).unwrap();
        assert_eq!(sample.direction, Direction::Up);
        assert_eq!(sample.distance, 40.0);
    }

    #[test]
    fn test_second_touch_keeps_origin() {
        let mut tracker = DragTracker::new(10.0);
        assert!(tracker.begin(0.0, 0.0));
        assert_eq!(tracker.track(0.0, 40.0), Some(DragMove::down(40.0)));

        // Another finger lands mid-pull
        assert!(!tracker.begin(200.0, 40.0));
        assert_eq!(tracker.track(0.0, 45.0), Some(DragMove::down(45.0)));

        assert!(tracker.finish());
        assert!(tracker.begin(200.0, 40.0));
    }

    #[test]
    fn test_begin_before_recognition_restarts() {
        let mut tracker = DragTracker::new(10.0);
        tracker.begin(0.0, 0.0);
        assert_eq!(tracker.track(0.0, 5.0), None);

        assert!(tracker.begin(0.0, 100.0));
        assert_eq!(tracker.track(0.0, 105.0), None);
        assert_eq!(tracker.track(0.0, 120.0), Some(DragMove::down(20.0)));
    }

    #[test]
    fn test_track_without_begin() {
        let mut tracker = DragTracker::default();
        assert_eq!(tracker.track(10.0, 500.0), None);
    }
}
