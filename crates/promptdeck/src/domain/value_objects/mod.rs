//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod category;
mod groups;
mod prompt_filter;

pub use category::*;
pub use groups::*;
pub use prompt_filter::*;
