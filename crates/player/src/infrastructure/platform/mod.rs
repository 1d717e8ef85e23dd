//! Storage adapters and platform constructors
//!
//! The file-backed desktop store or the browser's `localStorage` is selected
//! at compile time from the target architecture. The in-memory store is
//! available everywhere.

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(not(target_arch = "wasm32"))]
mod desktop;

pub mod memory;

#[cfg(target_arch = "wasm32")]
pub use wasm::{create_platform, WasmStorageProvider};

#[cfg(not(target_arch = "wasm32"))]
pub use desktop::{create_platform, default_storage_path, DesktopStorageProvider};

pub use memory::{create_ephemeral_platform, MemoryStorageProvider};
