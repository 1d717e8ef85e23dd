//! Pointer event sources
//!
//! `LocalPointerSource` is an in-process dispatcher: the host (or a test)
//! pushes events into it by hand. In the browser, `ElementPointerSource`
//! forwards a DOM element's touch events.

mod local;
#[cfg(target_arch = "wasm32")]
mod wasm;

pub use local::LocalPointerSource;
#[cfg(target_arch = "wasm32")]
pub use wasm::ElementPointerSource;
