//! Pointer gestures: drag tracking, double-tap detection, frame throttling.
//!
//! Everything here is plain state driven by timestamps and samples the
//! browser layer passes in. No timers or listeners are owned by this module,
//! which keeps the state machines testable without a DOM.

#[cfg(test)]
#[path = "gesture_test.rs"]
mod gesture_test;

use crate::geometry::{Delta, Point};
use crate::shape::DragTarget;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button or a single-finger touch.
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button.
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` value.
    #[must_use]
    pub fn from_dom(button: i16) -> Self {
        match button {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// One pointer event as seen by the gesture tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    /// Viewport position of the pointer.
    pub client: Point,
    /// Native movement since the previous event, when the platform reports it.
    pub movement: Option<Delta>,
    pub button: Button,
}

impl PointerSample {
    #[must_use]
    pub fn primary(client: Point) -> Self {
        Self { client, movement: None, button: Button::Primary }
    }
}

/// Gesture tracked between pointer-down and pointer-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureState {
    /// No gesture in progress.
    Idle,
    /// A shape part is following the pointer.
    Dragging {
        target: DragTarget,
        /// Last seen client position; `None` until the first record.
        last: Option<Point>,
    },
}

/// Drag gesture state machine: Idle -> Dragging -> Idle.
#[derive(Debug, Clone)]
pub struct GestureTracker {
    state: GestureState,
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureTracker {
    #[must_use]
    pub fn new() -> Self {
        Self { state: GestureState::Idle }
    }

    #[must_use]
    pub fn state(&self) -> GestureState {
        self.state
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging { .. })
    }

    /// Start dragging `target`. The secondary button never starts a drag.
    ///
    /// Returns whether a drag began.
    pub fn begin(&mut self, target: DragTarget, sample: PointerSample) -> bool {
        if sample.button == Button::Secondary {
            return false;
        }
        self.state = GestureState::Dragging { target, last: Some(sample.client) };
        true
    }

    /// Feed a move event. Returns the target and the movement to apply.
    ///
    /// Native movement wins when present. Without it the delta is the client
    /// offset from the recorded position; a move with nothing recorded only
    /// records.
    pub fn track(&mut self, sample: PointerSample) -> Option<(DragTarget, Delta)> {
        let GestureState::Dragging { target, last } = &mut self.state else {
            return None;
        };
        let previous = last.replace(sample.client);
        let delta = match (sample.movement, previous) {
            (Some(movement), _) => movement,
            (None, Some(previous)) => sample.client.delta_from(previous),
            (None, None) => return None,
        };
        Some((*target, delta))
    }

    /// Finish the gesture. Returns the target that was being dragged.
    pub fn end(&mut self) -> Option<DragTarget> {
        match std::mem::replace(&mut self.state, GestureState::Idle) {
            GestureState::Dragging { target, .. } => Some(target),
            GestureState::Idle => None,
        }
    }
}

/// Double-tap detector. A second tap inside the window fires; any other tap
/// (re)arms it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoubleTap {
    window_ms: f64,
    armed_at: Option<f64>,
}

impl DoubleTap {
    #[must_use]
    pub fn new(window_ms: f64) -> Self {
        Self { window_ms, armed_at: None }
    }

    /// Register a tap at `now_ms`. Returns `true` when it completes a double tap.
    pub fn tap(&mut self, now_ms: f64) -> bool {
        match self.armed_at.take() {
            Some(armed) if now_ms - armed <= self.window_ms => true,
            _ => {
                self.armed_at = Some(now_ms);
                false
            }
        }
    }
}

/// At most one delivery per animation frame.
///
/// Events offered while a frame is pending are dropped. Once detached, a
/// scheduled frame delivers nothing.
#[derive(Debug, Clone)]
pub struct FrameThrottle<E> {
    running: bool,
    detached: bool,
    pending: Option<E>,
}

impl<E> Default for FrameThrottle<E> {
    fn default() -> Self {
        Self { running: false, detached: false, pending: None }
    }
}

impl<E> FrameThrottle<E> {
    /// Offer an event. Returns `true` when the caller must schedule a frame.
    pub fn offer(&mut self, event: E) -> bool {
        if self.running || self.detached {
            return false;
        }
        self.running = true;
        self.pending = Some(event);
        true
    }

    /// Animation frame fired. Returns the event to deliver, if any.
    pub fn on_frame(&mut self) -> Option<E> {
        self.running = false;
        let event = self.pending.take();
        if self.detached { None } else { event }
    }

    /// Stop delivering. A frame already scheduled will deliver nothing.
    pub fn detach(&mut self) {
        self.detached = true;
        self.pending = None;
    }

    #[must_use]
    pub fn is_detached(&self) -> bool {
        self.detached
    }
}
