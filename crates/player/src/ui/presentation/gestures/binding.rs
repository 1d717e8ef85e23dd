//! Attaching swipe detection to an element
//!
//! A `SwipeBinding` owns the listener it registers on a pointer source. The
//! listener exists exactly while the binding is alive and enabled: disabling,
//! retargeting, reconfiguring and dropping the binding all remove it.

use std::cell::RefCell;
use std::rc::Rc;

use super::classifier::{SwipeClassifier, SwipeConfig, SwipeDirection};
use crate::ports::outbound::{ListenerId, PointerEventSource};

type SwipeCallback = Box<dyn FnMut()>;

/// Callbacks for completed swipes
#[derive(Default)]
pub struct SwipeHandlers {
    on_swipe_left: Option<SwipeCallback>,
    on_swipe_right: Option<SwipeCallback>,
}

impl SwipeHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_swipe_left(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_swipe_left = Some(Box::new(callback));
        self
    }

    pub fn on_swipe_right(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_swipe_right = Some(Box::new(callback));
        self
    }

    fn emit(&mut self, direction: SwipeDirection) {
        let callback = match direction {
            SwipeDirection::Left => self.on_swipe_left.as_mut(),
            SwipeDirection::Right => self.on_swipe_right.as_mut(),
        };
        if let Some(callback) = callback {
            callback();
        }
    }
}

/// Swipe detection attached to one pointer source
pub struct SwipeBinding<S: PointerEventSource> {
    source: S,
    config: SwipeConfig,
    handlers: Rc<RefCell<SwipeHandlers>>,
    listener: Option<ListenerId>,
}

impl<S: PointerEventSource> SwipeBinding<S> {
    /// Bind to `source`; starts listening right away if `config.enabled`.
    pub fn attach(source: S, config: SwipeConfig, handlers: SwipeHandlers) -> Self {
        let mut binding = Self {
            source,
            config,
            handlers: Rc::new(RefCell::new(handlers)),
            listener: None,
        };
        if binding.config.enabled {
            binding.listen();
        }
        binding
    }

    pub fn is_listening(&self) -> bool {
        self.listener.is_some()
    }

    pub fn config(&self) -> &SwipeConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Turn detection on or off. Turning it on starts from a clean idle state.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.config.enabled = enabled;
        if enabled {
            self.listen();
        } else {
            self.unlisten();
        }
    }

    /// Replace the thresholds. A gesture in progress is dropped.
    pub fn set_config(&mut self, config: SwipeConfig) {
        self.unlisten();
        self.config = config;
        if self.config.enabled {
            self.listen();
        }
    }

    /// Move detection to another element, returning the previous source.
    pub fn retarget(&mut self, source: S) -> S {
        self.unlisten();
        let previous = std::mem::replace(&mut self.source, source);
        if self.config.enabled {
            self.listen();
        }
        previous
    }

    fn listen(&mut self) {
        if self.listener.is_some() {
            return;
        }
        let mut classifier = SwipeClassifier::new(self.config);
        let handlers = Rc::clone(&self.handlers);
        let id = self.source.add_listener(Box::new(move |event| {
            if let Some(direction) = classifier.handle(event) {
                tracing::debug!("Swipe detected: {:?}", direction);
                handlers.borrow_mut().emit(direction);
            }
        }));
        self.listener = Some(id);
    }

    fn unlisten(&mut self) {
        if let Some(id) = self.listener.take() {
            self.source.remove_listener(id);
        }
    }
}

impl<S: PointerEventSource> Drop for SwipeBinding<S> {
    fn drop(&mut self) {
        self.unlisten();
    }
}
