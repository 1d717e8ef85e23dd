//! DOM touch event source.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{EventTarget, TouchEvent};

use crate::ports::outbound::{
    ListenerId, PointerEvent, PointerEventSource, PointerListener, PointerSample,
};

const TOUCH_EVENTS: [&str; 4] = ["touchstart", "touchmove", "touchend", "touchcancel"];

type TouchClosure = Closure<dyn FnMut(TouchEvent)>;

/// Forwards one element's touch events as [`PointerEvent`]s.
///
/// Removing a listener detaches its DOM callbacks immediately. The Rust side
/// of a callback removed from inside its own invocation cannot be freed while
/// it runs, so it is parked and freed on the next registration change.
pub struct ElementPointerSource {
    target: EventTarget,
    registrations: RefCell<HashMap<ListenerId, Vec<(&'static str, TouchClosure)>>>,
    retired: RefCell<Vec<TouchClosure>>,
    dispatching: Rc<Cell<bool>>,
    next_id: Cell<u64>,
}

impl ElementPointerSource {
    pub fn new(target: impl Into<EventTarget>) -> Self {
        Self {
            target: target.into(),
            registrations: RefCell::new(HashMap::new()),
            retired: RefCell::new(Vec::new()),
            dispatching: Rc::new(Cell::new(false)),
            next_id: Cell::new(0),
        }
    }

    fn free_retired(&self) {
        if !self.dispatching.get() {
            self.retired.borrow_mut().clear();
        }
    }

    fn detach(&self, closures: Vec<(&'static str, TouchClosure)>) {
        for (kind, closure) in closures {
            if let Err(e) = self
                .target
                .remove_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
            {
                tracing::warn!("Failed to remove {} listener: {:?}", kind, e);
            }
            self.retired.borrow_mut().push(closure);
        }
    }
}

fn translate(kind: &str, event: &TouchEvent) -> Option<PointerEvent> {
    let sample = || {
        let touch = event.touches().get(0)?;
        Some(PointerSample::new(
            f64::from(touch.client_x()),
            f64::from(touch.client_y()),
            event.time_stamp(),
        ))
    };
    match kind {
        "touchstart" => sample().map(PointerEvent::Down),
        "touchmove" => sample().map(PointerEvent::Move),
        "touchend" => Some(PointerEvent::Up),
        "touchcancel" => Some(PointerEvent::Cancel),
        _ => None,
    }
}

impl PointerEventSource for ElementPointerSource {
    fn add_listener(&self, listener: PointerListener) -> ListenerId {
        self.free_retired();

        let id = ListenerId::new(self.next_id.get());
        self.next_id.set(id.get() + 1);

        let listener = Rc::new(RefCell::new(listener));
        let mut closures = Vec::with_capacity(TOUCH_EVENTS.len());
        for kind in TOUCH_EVENTS {
            let listener = Rc::clone(&listener);
            let dispatching = Rc::clone(&self.dispatching);
            let closure = TouchClosure::new(move |event: TouchEvent| {
                let Some(pointer_event) = translate(kind, &event) else {
                    return;
                };
                dispatching.set(true);
                (listener.borrow_mut())(pointer_event);
                dispatching.set(false);
            });
            match self
                .target
                .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
            {
                Ok(()) => closures.push((kind, closure)),
                Err(e) => tracing::warn!("Failed to add {} listener: {:?}", kind, e),
            }
        }

        self.registrations.borrow_mut().insert(id, closures);
        id
    }

    fn remove_listener(&self, id: ListenerId) {
        self.free_retired();
        let removed = self.registrations.borrow_mut().remove(&id);
        if let Some(closures) = removed {
            self.detach(closures);
        }
    }
}

impl Drop for ElementPointerSource {
    fn drop(&mut self) {
        let registrations: Vec<_> = self.registrations.borrow_mut().drain().collect();
        for (_, closures) in registrations {
            self.detach(closures);
        }
    }
}
