//! Pointer/touch input port
//!
//! The host (browser element, desktop window, test harness) delivers raw
//! single-point pointer events through a `PointerEventSource`. Listeners are
//! registered and removed explicitly; whoever registers a listener owns the
//! returned `ListenerId` and is responsible for removing it.

/// One observed pointer position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub x: f64,
    pub y: f64,
    /// Host timestamp in milliseconds
    pub timestamp_ms: f64,
}

impl PointerSample {
    pub fn new(x: f64, y: f64, timestamp_ms: f64) -> Self {
        Self { x, y, timestamp_ms }
    }
}

/// Low-level pointer events, single touch point only
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// First contact (touchstart / pointerdown)
    Down(PointerSample),
    /// Contact moved (touchmove / pointermove)
    Move(PointerSample),
    /// Contact released (touchend / pointerup)
    Up,
    /// Host aborted the contact (touchcancel / pointercancel)
    Cancel,
}

/// Handle for a registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// Callback invoked for every event delivered by a source
pub type PointerListener = Box<dyn FnMut(PointerEvent)>;

/// A stream of pointer events for one element
#[cfg_attr(test, mockall::automock)]
pub trait PointerEventSource {
    /// Start delivering events to `listener`.
    fn add_listener(&self, listener: PointerListener) -> ListenerId;

    /// Stop delivering events to the listener registered under `id`.
    ///
    /// Unknown ids are ignored.
    fn remove_listener(&self, id: ListenerId);
}
