//! Application Layer (Use Cases)
//!
//! Orchestrates domain operations and coordinates between
//! storage and presentation.

mod prompt_store;

pub use prompt_store::{PromptStore, PROMPTS_KEY};
