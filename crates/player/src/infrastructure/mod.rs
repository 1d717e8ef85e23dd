//! Infrastructure adapters for the player ports.

pub mod platform;
pub mod pointer;

pub use pointer::LocalPointerSource;
