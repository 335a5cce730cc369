//! Key-Value Storage Port
//!
//! Abstract interface for the local key-value store the prompt
//! collection is persisted to. Values are opaque JSON documents.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::errors::DomainError;

/// Storage interface with whole-value reads and writes
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the given keys. Keys that are not stored are absent from the result.
    async fn get(&self, keys: &[&str]) -> Result<HashMap<String, Value>, DomainError>;

    /// Store every item, replacing existing values. Other keys are kept.
    async fn set(&self, items: HashMap<String, Value>) -> Result<(), DomainError>;
}
