//! Touch gestures for swipeable regions
//!
//! The view attaches a [`SwipeBinding`] to each swipeable element (faction
//! tabs, datacard carousel). The binding feeds the element's pointer events
//! to a [`SwipeClassifier`] and calls the matching handler on a swipe.

mod binding;
mod classifier;

pub use binding::{SwipeBinding, SwipeHandlers};
pub use classifier::{
    classify_swipe, SwipeClassifier, SwipeConfig, SwipeDirection, DEFAULT_MAX_VERTICAL_SWIPE,
    DEFAULT_MIN_SWIPE_DISTANCE, DEFAULT_MIN_VELOCITY,
};
