//! In-memory implementation of KeyValueStore

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::domain::DomainError;
use crate::ports::KeyValueStore;

/// Volatile key-value store, useful for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing items
    pub fn with_items(items: HashMap<String, Value>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, keys: &[&str]) -> Result<HashMap<String, Value>, DomainError> {
        let items = self.items.read().await;
        Ok(keys
            .iter()
            .filter_map(|k| items.get(*k).map(|v| (k.to_string(), v.clone())))
            .collect())
    }

    async fn set(&self, items: HashMap<String, Value>) -> Result<(), DomainError> {
        self.items.write().await.extend(items);
        Ok(())
    }
}
