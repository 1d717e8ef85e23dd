//! Tacref Player crate.
//!
//! Client-side interaction engine for the faction reference: recent faction
//! tracking, section outlines and swipe gestures, plus the platform adapters
//! they run on. Multi-platform support is provided via compile-time `cfg`
//! selection.

pub mod application;
pub mod config;
pub mod infrastructure;
pub mod ports;
pub mod state;
pub mod ui;

pub use ui::presentation;

// Re-export commonly used entrypoints
pub use application::services::RecentFactionsService;
pub use config::{ConfigError, PlayerConfig};
pub use state::Platform;
