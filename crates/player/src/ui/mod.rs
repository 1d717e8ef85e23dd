//! UI-facing interaction logic.
//!
//! Rendering belongs to the host view layer; this module holds the
//! framework-independent state it drives.

pub mod presentation;
