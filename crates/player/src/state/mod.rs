//! Player-side dependency injection
//!
//! Concrete containers wiring adapters to the application services.

mod platform;

pub use platform::{Platform, PlatformStorageAdapter};
