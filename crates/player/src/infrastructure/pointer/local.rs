//! In-process pointer event dispatcher.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::ports::outbound::{ListenerId, PointerEvent, PointerEventSource, PointerListener};

/// Pointer event source fed by the host calling [`LocalPointerSource::dispatch`].
///
/// Single-threaded. Clones share the same listener list. Listeners may add
/// or remove listeners (including themselves) while an event is being
/// dispatched; additions start receiving events from the next dispatch.
#[derive(Clone, Default)]
pub struct LocalPointerSource {
    inner: Rc<Inner>,
}

#[derive(Default)]
struct Inner {
    listeners: RefCell<Vec<(ListenerId, PointerListener)>>,
    removed_while_dispatching: RefCell<Vec<ListenerId>>,
    dispatching: Cell<bool>,
    next_id: Cell<u64>,
}

impl LocalPointerSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `event` to every registered listener, in registration order.
    pub fn dispatch(&self, event: PointerEvent) {
        let inner = &self.inner;
        if inner.dispatching.get() {
            tracing::warn!("Nested pointer dispatch ignored: {:?}", event);
            return;
        }
        inner.dispatching.set(true);

        let mut active = std::mem::take(&mut *inner.listeners.borrow_mut());
        for (id, listener) in active.iter_mut() {
            if inner.removed_while_dispatching.borrow().contains(id) {
                continue;
            }
            listener(event);
        }

        let removed = std::mem::take(&mut *inner.removed_while_dispatching.borrow_mut());
        active.retain(|(id, _)| !removed.contains(id));
        {
            let mut listeners = inner.listeners.borrow_mut();
            let added = std::mem::take(&mut *listeners);
            active.extend(added);
            *listeners = active;
        }

        inner.dispatching.set(false);
    }

    /// Deliver a sequence of events in order.
    pub fn dispatch_all(&self, events: impl IntoIterator<Item = PointerEvent>) {
        for event in events {
            self.dispatch(event);
        }
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }
}

impl PointerEventSource for LocalPointerSource {
    fn add_listener(&self, listener: PointerListener) -> ListenerId {
        let id = ListenerId::new(self.inner.next_id.get());
        self.inner.next_id.set(id.get() + 1);
        self.inner.listeners.borrow_mut().push((id, listener));
        tracing::trace!("Pointer listener {} added", id.get());
        id
    }

    fn remove_listener(&self, id: ListenerId) {
        let removed = {
            let mut listeners = self.inner.listeners.borrow_mut();
            listeners
                .iter()
                .position(|(existing, _)| *existing == id)
                .map(|pos| listeners.remove(pos))
        };
        if removed.is_none() && self.inner.dispatching.get() {
            self.inner.removed_while_dispatching.borrow_mut().push(id);
        }
        tracing::trace!("Pointer listener {} removed", id.get());
        // `removed` is dropped here, after the borrow is released: a listener's
        // captures may hold another handle to this source.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::PointerSample;

    fn counter(source: &LocalPointerSource) -> (ListenerId, Rc<Cell<u32>>) {
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        let id = source.add_listener(Box::new(move |_| seen.set(seen.get() + 1)));
        (id, count)
    }

    #[test]
    fn test_dispatch_reaches_all_listeners() {
        let source = LocalPointerSource::new();
        let (_, first) = counter(&source);
        let (_, second) = counter(&source);

        source.dispatch(PointerEvent::Up);

        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 1);
        assert_eq!(source.listener_count(), 2);
    }

    #[test]
    fn test_removed_listener_gets_nothing() {
        let source = LocalPointerSource::new();
        let (id, count) = counter(&source);

        source.remove_listener(id);
        source.dispatch(PointerEvent::Up);

        assert_eq!(count.get(), 0);
        assert_eq!(source.listener_count(), 0);
    }

    #[test]
    fn test_unknown_id_is_ignored() {
        let source = LocalPointerSource::new();
        let (_, count) = counter(&source);

        source.remove_listener(ListenerId::new(99));
        source.dispatch(PointerEvent::Cancel);

        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_listener_can_remove_itself_while_dispatching() {
        let source = LocalPointerSource::new();
        let calls = Rc::new(Cell::new(0));
        let own_id: Rc<Cell<Option<ListenerId>>> = Rc::new(Cell::new(None));

        let handle = source.clone();
        let seen = Rc::clone(&calls);
        let slot = Rc::clone(&own_id);
        let id = source.add_listener(Box::new(move |_| {
            seen.set(seen.get() + 1);
            if let Some(id) = slot.get() {
                handle.remove_listener(id);
            }
        }));
        own_id.set(Some(id));

        source.dispatch(PointerEvent::Up);
        source.dispatch(PointerEvent::Up);

        assert_eq!(calls.get(), 1);
        assert_eq!(source.listener_count(), 0);
    }

    #[test]
    fn test_listener_added_while_dispatching_starts_next_time() {
        let source = LocalPointerSource::new();
        let late_calls = Rc::new(Cell::new(0));

        let handle = source.clone();
        let late = Rc::clone(&late_calls);
        let added = Rc::new(Cell::new(false));
        source.add_listener(Box::new(move |_| {
            if !added.replace(true) {
                let late = Rc::clone(&late);
                handle.add_listener(Box::new(move |_| late.set(late.get() + 1)));
            }
        }));

        source.dispatch(PointerEvent::Down(PointerSample::new(0.0, 0.0, 0.0)));
        assert_eq!(late_calls.get(), 0);
        assert_eq!(source.listener_count(), 2);

        source.dispatch(PointerEvent::Up);
        assert_eq!(late_calls.get(), 1);
    }
}
