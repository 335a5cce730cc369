//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the prompt store
//! interacts with persistence and presentation.
//!
//! Implementations of these traits live in the adapter layer.

mod listener;
mod storage;

// Re-exports
pub use listener::*;
pub use storage::*;
