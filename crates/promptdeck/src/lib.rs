//! promptdeck Domain Library
//!
//! Core types and the collection manager for recording and organizing
//! prompt snippets, each tagged with a category and free-form group labels.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (Prompt, PromptInput)
//!   - `value_objects/`: Immutable value types (PromptFilter, category and group rules)
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `storage`: Key-value persistence collaborator
//!   - `listener`: Change notifications for a presentation layer
//!
//! - **Application** (`application/`): The `PromptStore` manager
//!
//! - **Adapters** (`adapters/`): In-process implementations of the ports
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use promptdeck::{MemoryStore, PromptInput, PromptStore};
//!
//! let mut store = PromptStore::new(Arc::new(MemoryStore::new()));
//! store.load().await?;
//! store.add(PromptInput::new("Greeting", "hello world").with_groups("x, y")).await?;
//! ```

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use adapters::MemoryStore;
pub use application::{PromptStore, PROMPTS_KEY};
pub use domain::{
    parse_groups, resolve_category, DomainError, Prompt, PromptFilter, PromptInput,
    UNCATEGORIZED,
};
pub use ports::{ChangeListener, KeyValueStore, StoreSnapshot};
