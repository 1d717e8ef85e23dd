//! Swipe classification
//!
//! A gesture runs from pointer-down to pointer-up. Only its first sample and
//! its most recent move are kept; at pointer-up the pair is judged against
//! the thresholds in [`SwipeConfig`] and yields at most one direction.

use crate::ports::outbound::{PointerEvent, PointerSample};

/// Default minimum horizontal travel, in px
pub const DEFAULT_MIN_SWIPE_DISTANCE: f64 = 50.0;
/// Default maximum vertical travel, in px
pub const DEFAULT_MAX_VERTICAL_SWIPE: f64 = 100.0;
/// Default minimum horizontal speed, in px/ms
pub const DEFAULT_MIN_VELOCITY: f64 = 0.1;

/// Swipe thresholds for one element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeConfig {
    pub min_swipe_distance: f64,
    pub max_vertical_swipe: f64,
    pub min_velocity: f64,
    /// When false the element is not listened to at all
    pub enabled: bool,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            min_swipe_distance: DEFAULT_MIN_SWIPE_DISTANCE,
            max_vertical_swipe: DEFAULT_MAX_VERTICAL_SWIPE,
            min_velocity: DEFAULT_MIN_VELOCITY,
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum GestureState {
    Idle,
    Tracking {
        start: PointerSample,
        latest: Option<PointerSample>,
    },
}

/// Per-element gesture state machine
#[derive(Debug, Clone)]
pub struct SwipeClassifier {
    config: SwipeConfig,
    state: GestureState,
}

impl SwipeClassifier {
    pub fn new(config: SwipeConfig) -> Self {
        Self {
            config,
            state: GestureState::Idle,
        }
    }

    pub fn config(&self) -> &SwipeConfig {
        &self.config
    }

    /// Whether a gesture is in progress.
    pub fn is_tracking(&self) -> bool {
        matches!(self.state, GestureState::Tracking { .. })
    }

    /// Feed one event; returns a direction when it completes a swipe.
    pub fn handle(&mut self, event: PointerEvent) -> Option<SwipeDirection> {
        match (event, self.state) {
            // A second down without an up restarts from the new contact
            (PointerEvent::Down(start), _) => {
                self.state = GestureState::Tracking {
                    start,
                    latest: None,
                };
                None
            }
            (PointerEvent::Move(sample), GestureState::Tracking { start, .. }) => {
                self.state = GestureState::Tracking {
                    start,
                    latest: Some(sample),
                };
                None
            }
            (PointerEvent::Up, GestureState::Tracking { start, latest }) => {
                self.state = GestureState::Idle;
                let latest = latest?;
                classify_swipe(&self.config, &start, &latest)
            }
            (PointerEvent::Cancel, _) => {
                self.state = GestureState::Idle;
                None
            }
            (PointerEvent::Move(_) | PointerEvent::Up, GestureState::Idle) => None,
        }
    }

    /// Drop any gesture in progress.
    pub fn reset(&mut self) {
        self.state = GestureState::Idle;
    }
}

/// Judge a completed gesture from its first and last samples.
pub fn classify_swipe(
    config: &SwipeConfig,
    start: &PointerSample,
    end: &PointerSample,
) -> Option<SwipeDirection> {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let dt = end.timestamp_ms - start.timestamp_ms;

    if [dx, dy, dt].iter().any(|delta| !delta.is_finite()) {
        tracing::trace!("Swipe rejected: non-finite sample ({}, {}, {})", dx, dy, dt);
        return None;
    }
    if dt <= 0.0 {
        tracing::trace!("Swipe rejected: non-positive duration {}", dt);
        return None;
    }
    if dy.abs() > config.max_vertical_swipe {
        tracing::trace!("Swipe rejected: vertical travel {}", dy);
        return None;
    }
    if dx.abs() < config.min_swipe_distance {
        tracing::trace!("Swipe rejected: horizontal travel {}", dx);
        return None;
    }
    let velocity = dx.abs() / dt;
    if velocity < config.min_velocity {
        tracing::trace!("Swipe rejected: velocity {:.3} px/ms", velocity);
        return None;
    }

    if dx > 0.0 {
        Some(SwipeDirection::Right)
    } else {
        Some(SwipeDirection::Left)
    }
}
