//! Prompt - A recorded text snippet
//!
//! Pure domain entity without infrastructure dependencies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{parse_groups, resolve_category};

/// Prompt - A stored snippet with a category and group labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub category: String,
    #[serde(default)]
    pub groups: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Form data for creating or replacing a prompt
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptInput {
    pub title: String,
    pub content: String,
    /// Empty or missing falls back to the "uncategorized" sentinel
    #[serde(default)]
    pub category: Option<String>,
    /// Raw comma-separated labels, e.g. "work, drafts"
    #[serde(default)]
    pub groups: String,
}

impl PromptInput {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            category: None,
            groups: String::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_groups(mut self, groups: impl Into<String>) -> Self {
        self.groups = groups.into();
        self
    }
}

impl Prompt {
    /// Create a new prompt with generated ID and timestamps
    pub fn new(input: PromptInput) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            category: resolve_category(input.category.as_deref()),
            groups: parse_groups(&input.groups),
            title: input.title,
            content: input.content,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace every field from `input`, keeping `id` and `created_at`
    pub fn apply(&mut self, input: PromptInput) {
        self.category = resolve_category(input.category.as_deref());
        self.groups = parse_groups(&input.groups);
        self.title = input.title;
        self.content = input.content;
        self.updated_at = Utc::now();
    }

    /// Exact label membership
    pub fn in_group(&self, label: &str) -> bool {
        self.groups.iter().any(|g| g == label)
    }

    /// Groups joined back into the comma-separated form used by inputs
    pub fn groups_text(&self) -> String {
        self.groups.join(", ")
    }
}
