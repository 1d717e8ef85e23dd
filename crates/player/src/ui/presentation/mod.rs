//! Presentation layer - interaction state for faction pages

pub mod gestures;
pub mod state;

pub use gestures::{SwipeBinding, SwipeConfig, SwipeDirection, SwipeHandlers};
pub use state::OutlineState;
