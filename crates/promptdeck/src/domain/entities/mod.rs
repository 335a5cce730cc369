//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - Prompt: A stored text snippet with category and group labels
//! - PromptInput: Caller-supplied form data for create and update

mod prompt;

pub use prompt::*;
