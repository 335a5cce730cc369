//! PromptFilter - Conjunctive search/category/group predicate

use serde::{Deserialize, Serialize};

use crate::domain::entities::Prompt;

/// Active filter over the prompt collection.
///
/// Every field is optional in effect: an empty field always passes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptFilter {
    /// Case-insensitive substring of title or content
    #[serde(default)]
    pub search: String,
    /// Exact category
    #[serde(default)]
    pub category: String,
    /// Exact group label
    #[serde(default)]
    pub group: String,
}

impl PromptFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    /// True when no predicate is active
    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.category.is_empty() && self.group.is_empty()
    }

    /// Check whether a prompt passes every active predicate
    pub fn matches(&self, prompt: &Prompt) -> bool {
        self.matches_search(prompt)
            && (self.category.is_empty() || prompt.category == self.category)
            && (self.group.is_empty() || prompt.in_group(&self.group))
    }

    fn matches_search(&self, prompt: &Prompt) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        prompt.title.to_lowercase().contains(&needle)
            || prompt.content.to_lowercase().contains(&needle)
    }
}
