//! Outbound ports - Interfaces for host services
//!
//! These ports define the contracts that infrastructure adapters must implement,
//! allowing application services and presentation logic to interact with the
//! host environment without depending on concrete implementations.

pub mod platform;
pub mod pointer;

pub use platform::{storage_keys, StorageProvider};
pub use pointer::{ListenerId, PointerEvent, PointerEventSource, PointerListener, PointerSample};

#[cfg(test)]
pub use pointer::MockPointerEventSource;
