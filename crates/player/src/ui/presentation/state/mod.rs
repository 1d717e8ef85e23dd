//! Presentation state containers

mod outline_state;

pub use outline_state::OutlineState;
