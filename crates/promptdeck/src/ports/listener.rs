//! Change Listener Port
//!
//! Notification interface for presentation layers that redraw the
//! prompt list and filter options after the collection changes.

use serde::Serialize;

use crate::domain::{Prompt, PromptFilter};

/// View state handed to listeners after every change
#[derive(Debug, Clone, Default, Serialize)]
pub struct StoreSnapshot {
    /// Prompts passing the active filter, newest first
    pub visible: Vec<Prompt>,
    /// Sorted distinct categories across the whole collection
    pub categories: Vec<String>,
    /// Sorted distinct group labels across the whole collection
    pub groups: Vec<String>,
    /// Filter that produced `visible`
    pub filter: PromptFilter,
    /// Size of the whole collection
    pub total: usize,
}

/// Subscriber interface for collection changes
pub trait ChangeListener: Send + Sync {
    fn prompts_changed(&self, snapshot: &StoreSnapshot);
}
