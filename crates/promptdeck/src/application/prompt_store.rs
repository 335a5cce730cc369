//! Prompt Store (Use Case)
//!
//! Owns the ordered prompt collection and the active filter. Every
//! mutation writes the whole collection back under a single storage key
//! and then notifies subscribed listeners.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use serde_json::Value;
use uuid::Uuid;

use crate::domain::{DomainError, Prompt, PromptFilter, PromptInput};
use crate::ports::{ChangeListener, KeyValueStore, StoreSnapshot};

/// Storage key holding the whole collection
pub const PROMPTS_KEY: &str = "prompts";

/// Collection manager for prompts, newest first
pub struct PromptStore<S: KeyValueStore> {
    storage: Arc<S>,
    prompts: Vec<Prompt>,
    filter: PromptFilter,
    listeners: Vec<Arc<dyn ChangeListener>>,
}

impl<S: KeyValueStore> PromptStore<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            storage,
            prompts: Vec::new(),
            filter: PromptFilter::default(),
            listeners: Vec::new(),
        }
    }

    /// Register a listener notified after every change
    pub fn subscribe(&mut self, listener: Arc<dyn ChangeListener>) {
        self.listeners.push(listener);
    }

    /// Read the persisted collection, or start empty when nothing is stored.
    ///
    /// On undecodable data the in-memory collection is left as it was.
    pub async fn load(&mut self) -> Result<(), DomainError> {
        let mut found = self.storage.get(&[PROMPTS_KEY]).await?;
        let prompts = match found.remove(PROMPTS_KEY) {
            None | Some(Value::Null) => Vec::new(),
            Some(value) => serde_json::from_value(value)?,
        };
        self.prompts = prompts;

        tracing::debug!("Loaded {} prompts", self.prompts.len());
        self.notify();
        Ok(())
    }

    /// Create a prompt and prepend it to the collection
    pub async fn add(&mut self, input: PromptInput) -> Result<Prompt, DomainError> {
        let prompt = Prompt::new(input);
        self.prompts.insert(0, prompt.clone());
        self.persist().await?;

        tracing::info!("Created prompt: {} ({})", prompt.title, prompt.id);
        self.notify();
        Ok(prompt)
    }

    /// Replace a prompt's fields. Unknown ids are ignored and return `None`.
    pub async fn update(
        &mut self,
        id: Uuid,
        input: PromptInput,
    ) -> Result<Option<Prompt>, DomainError> {
        let Some(prompt) = self.prompts.iter_mut().find(|p| p.id == id) else {
            tracing::warn!("Ignoring update for unknown prompt {}", id);
            return Ok(None);
        };
        prompt.apply(input);
        let updated = prompt.clone();
        self.persist().await?;

        tracing::info!("Updated prompt: {} ({})", updated.title, updated.id);
        self.notify();
        Ok(Some(updated))
    }

    /// Remove a prompt. Returns whether anything was removed.
    pub async fn delete(&mut self, id: Uuid) -> Result<bool, DomainError> {
        let before = self.prompts.len();
        self.prompts.retain(|p| p.id != id);
        let deleted = self.prompts.len() < before;
        self.persist().await?;

        if deleted {
            tracing::info!("Deleted prompt: {}", id);
        }
        self.notify();
        Ok(deleted)
    }

    /// Prompts passing the active filter, in collection order
    pub fn filtered_prompts(&self) -> Vec<&Prompt> {
        self.prompts
            .iter()
            .filter(|p| self.filter.matches(p))
            .collect()
    }

    /// Sorted distinct non-empty categories across the whole collection
    pub fn categories(&self) -> Vec<String> {
        self.prompts
            .iter()
            .map(|p| p.category.as_str())
            .filter(|c| !c.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(String::from)
            .collect()
    }

    /// Sorted distinct group labels across the whole collection
    pub fn groups(&self) -> Vec<String> {
        self.prompts
            .iter()
            .flat_map(|p| p.groups.iter().map(String::as_str))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(String::from)
            .collect()
    }

    pub fn get(&self, id: Uuid) -> Option<&Prompt> {
        self.prompts.iter().find(|p| p.id == id)
    }

    /// Resolve a full id or a unique id prefix
    pub fn resolve_id(&self, id_or_prefix: &str) -> Result<Uuid, DomainError> {
        if let Ok(id) = Uuid::parse_str(id_or_prefix) {
            return Ok(id);
        }
        if id_or_prefix.is_empty() {
            return Err(DomainError::Validation("Empty prompt id".to_string()));
        }

        let needle = id_or_prefix.to_lowercase();
        let mut matches = self
            .prompts
            .iter()
            .filter(|p| p.id.to_string().starts_with(&needle));

        match (matches.next(), matches.next()) {
            (Some(p), None) => Ok(p.id),
            (Some(_), Some(_)) => Err(DomainError::Validation(format!(
                "Prompt id prefix '{}' is ambiguous",
                id_or_prefix
            ))),
            (None, _) => Err(DomainError::not_found_str("Prompt", id_or_prefix)),
        }
    }

    /// The whole collection, newest first
    pub fn prompts(&self) -> &[Prompt] {
        &self.prompts
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    pub fn filter(&self) -> &PromptFilter {
        &self.filter
    }

    /// Replace the active filter and redraw
    pub fn set_filter(&mut self, filter: PromptFilter) {
        tracing::debug!(?filter, "Filter changed");
        self.filter = filter;
        self.notify();
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        let filter = self.filter.clone().with_search(search);
        self.set_filter(filter);
    }

    pub fn set_category_filter(&mut self, category: impl Into<String>) {
        let filter = self.filter.clone().with_category(category);
        self.set_filter(filter);
    }

    pub fn set_group_filter(&mut self, group: impl Into<String>) {
        let filter = self.filter.clone().with_group(group);
        self.set_filter(filter);
    }

    pub fn clear_filter(&mut self) {
        self.set_filter(PromptFilter::default());
    }

    /// Current view state as handed to listeners
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            visible: self.filtered_prompts().into_iter().cloned().collect(),
            categories: self.categories(),
            groups: self.groups(),
            filter: self.filter.clone(),
            total: self.prompts.len(),
        }
    }

    async fn persist(&self) -> Result<(), DomainError> {
        let value = serde_json::to_value(&self.prompts)?;
        self.storage
            .set(HashMap::from([(PROMPTS_KEY.to_string(), value)]))
            .await?;
        tracing::debug!("Persisted {} prompts", self.prompts.len());
        Ok(())
    }

    fn notify(&self) {
        if self.listeners.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for listener in &self.listeners {
            listener.prompts_changed(&snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStore;
    use crate::domain::UNCATEGORIZED;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingListener {
        snapshots: Mutex<Vec<StoreSnapshot>>,
    }

    impl RecordingListener {
        fn count(&self) -> usize {
            self.snapshots.lock().unwrap().len()
        }

        fn last(&self) -> StoreSnapshot {
            self.snapshots.lock().unwrap().last().cloned().unwrap()
        }
    }

    impl ChangeListener for RecordingListener {
        fn prompts_changed(&self, snapshot: &StoreSnapshot) {
            self.snapshots.lock().unwrap().push(snapshot.clone());
        }
    }

    struct FailingStore;

    #[async_trait]
    impl KeyValueStore for FailingStore {
        async fn get(&self, _keys: &[&str]) -> Result<HashMap<String, Value>, DomainError> {
            Ok(HashMap::new())
        }

        async fn set(&self, _items: HashMap<String, Value>) -> Result<(), DomainError> {
            Err(DomainError::Storage("quota exceeded".to_string()))
        }
    }

    fn input(title: &str, category: &str, groups: &str) -> PromptInput {
        PromptInput::new(title, format!("{} body", title))
            .with_category(category)
            .with_groups(groups)
    }

    async fn store_with(inputs: Vec<PromptInput>) -> PromptStore<MemoryStore> {
        let mut store = PromptStore::new(Arc::new(MemoryStore::new()));
        store.load().await.unwrap();
        for i in inputs {
            store.add(i).await.unwrap();
        }
        store
    }

    fn titles(prompts: &[&Prompt]) -> Vec<String> {
        prompts.iter().map(|p| p.title.clone()).collect()
    }

    #[tokio::test]
    async fn test_load_empty_storage() {
        let mut store = PromptStore::new(Arc::new(MemoryStore::new()));
        store.load().await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_load_is_idempotent() {
        let storage = Arc::new(MemoryStore::new());
        let mut store = PromptStore::new(storage.clone());
        store.load().await.unwrap();
        store.add(input("A", "work", "")).await.unwrap();

        store.load().await.unwrap();
        store.load().await.unwrap();
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_load_rejects_corrupt_data_and_keeps_memory() {
        let storage = Arc::new(MemoryStore::new());
        let mut store = PromptStore::new(storage.clone());
        store.add(input("A", "work", "")).await.unwrap();

        storage
            .set(HashMap::from([(PROMPTS_KEY.to_string(), json!("garbage"))]))
            .await
            .unwrap();

        let result = store.load().await;
        assert!(matches!(result, Err(DomainError::Serialization(_))));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_add_defaults_and_group_parsing() {
        let mut store = store_with(vec![]).await;
        let prompt = store
            .add(
                PromptInput::new("A", "hello world")
                    .with_category("")
                    .with_groups("x, y, "),
            )
            .await
            .unwrap();

        assert_eq!(prompt.category, UNCATEGORIZED);
        assert_eq!(prompt.groups, vec!["x", "y"]);
        assert_eq!(store.get(prompt.id), Some(&prompt));
    }

    #[tokio::test]
    async fn test_adds_are_newest_first() {
        let store = store_with(vec![
            input("first", "", ""),
            input("second", "", ""),
            input("third", "", ""),
        ])
        .await;

        assert_eq!(
            titles(&store.filtered_prompts()),
            vec!["third", "second", "first"]
        );
    }

    #[tokio::test]
    async fn test_add_then_reload_round_trips() {
        let storage = Arc::new(MemoryStore::new());
        let mut store = PromptStore::new(storage.clone());
        store.load().await.unwrap();
        let added = store.add(input("A", "work", "g1, g2")).await.unwrap();

        let mut reloaded = PromptStore::new(storage);
        reloaded.load().await.unwrap();
        assert_eq!(reloaded.prompts(), &[added]);
    }

    #[tokio::test]
    async fn test_update_replaces_fields_but_keeps_identity() {
        let mut store = store_with(vec![input("A", "work", "x")]).await;
        let original = store.prompts()[0].clone();

        let updated = store
            .update(original.id, input("B", "life", "y, z"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
        assert!(updated.updated_at >= original.updated_at);
        assert_eq!(updated.title, "B");
        assert_eq!(updated.category, "life");
        assert_eq!(updated.groups, vec!["y", "z"]);
        assert_eq!(store.prompts(), &[updated]);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_noop() {
        let storage = Arc::new(MemoryStore::new());
        let mut store = PromptStore::new(storage.clone());
        store.add(input("A", "work", "")).await.unwrap();
        let listener = Arc::new(RecordingListener::default());
        store.subscribe(listener.clone());
        let before = store.prompts().to_vec();

        let result = store
            .update(Uuid::new_v4(), input("B", "", ""))
            .await
            .unwrap();

        assert!(result.is_none());
        assert_eq!(store.prompts(), before.as_slice());
        assert_eq!(listener.count(), 0);

        let mut reloaded = PromptStore::new(storage);
        reloaded.load().await.unwrap();
        assert_eq!(reloaded.prompts(), before.as_slice());
    }

    #[tokio::test]
    async fn test_update_keeps_position() {
        let mut store = store_with(vec![input("A", "", ""), input("B", "", "")]).await;
        let older = store.prompts()[1].id;

        store.update(older, input("A2", "", "")).await.unwrap();

        assert_eq!(titles(&store.filtered_prompts()), vec!["B", "A2"]);
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one() {
        let mut store = store_with(vec![input("A", "", ""), input("B", "", "")]).await;
        let id = store.prompts()[0].id;

        assert!(store.delete(id).await.unwrap());
        assert_eq!(store.len(), 1);
        assert!(store.get(id).is_none());

        assert!(!store.delete(Uuid::new_v4()).await.unwrap());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_is_persisted() {
        let storage = Arc::new(MemoryStore::new());
        let mut store = PromptStore::new(storage.clone());
        let kept = store.add(input("keep", "", "")).await.unwrap();
        let gone = store.add(input("gone", "", "")).await.unwrap();
        store.delete(gone.id).await.unwrap();

        let mut reloaded = PromptStore::new(storage);
        reloaded.load().await.unwrap();
        assert_eq!(reloaded.prompts(), &[kept]);
    }

    #[tokio::test]
    async fn test_empty_filter_returns_whole_collection() {
        let store = store_with(vec![
            input("A", "work", ""),
            input("B", "life", ""),
        ])
        .await;
        assert!(store.filter().is_empty());
        assert_eq!(store.filtered_prompts().len(), store.len());
    }

    #[tokio::test]
    async fn test_category_filter_selects_matching() {
        let mut store = store_with(vec![
            input("P1", "work", ""),
            input("P2", "life", ""),
        ])
        .await;
        store.set_category_filter("work");
        assert_eq!(titles(&store.filtered_prompts()), vec!["P1"]);
    }

    #[tokio::test]
    async fn test_combined_filter_and_clear() {
        let mut store = store_with(vec![
            input("Alpha", "work", "daily"),
            input("Beta", "work", "weekly"),
            input("alphabet", "life", "daily"),
        ])
        .await;

        store.set_search("ALPHA");
        assert_eq!(titles(&store.filtered_prompts()), vec!["alphabet", "Alpha"]);

        store.set_category_filter("work");
        store.set_group_filter("daily");
        assert_eq!(titles(&store.filtered_prompts()), vec!["Alpha"]);

        store.clear_filter();
        assert_eq!(store.filtered_prompts().len(), 3);
    }

    #[tokio::test]
    async fn test_option_lists_ignore_filter() {
        let mut store = store_with(vec![
            input("A", "work", "b, a"),
            input("B", "life", "c, a"),
            input("C", "work", ""),
        ])
        .await;
        store.set_category_filter("life");

        assert_eq!(store.categories(), vec!["life", "work"]);
        assert_eq!(store.groups(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_categories_skip_empty_values() {
        let storage = Arc::new(MemoryStore::new());
        let stored = Prompt {
            category: String::new(),
            ..Prompt::new(input("legacy", "", ""))
        };
        storage
            .set(HashMap::from([(
                PROMPTS_KEY.to_string(),
                serde_json::to_value(vec![stored]).unwrap(),
            )]))
            .await
            .unwrap();

        let mut store = PromptStore::new(storage);
        store.load().await.unwrap();
        store.add(input("new", "", "")).await.unwrap();

        assert_eq!(store.categories(), vec![UNCATEGORIZED]);
    }

    #[tokio::test]
    async fn test_listeners_receive_snapshots() {
        let mut store = store_with(vec![]).await;
        let listener = Arc::new(RecordingListener::default());
        store.subscribe(listener.clone());

        let a = store.add(input("A", "work", "x")).await.unwrap();
        store.add(input("B", "life", "y")).await.unwrap();
        store.set_category_filter("work");

        let snapshot = listener.last();
        assert_eq!(listener.count(), 3);
        assert_eq!(snapshot.total, 2);
        assert_eq!(snapshot.visible, vec![a.clone()]);
        assert_eq!(snapshot.categories, vec!["life", "work"]);
        assert_eq!(snapshot.groups, vec!["x", "y"]);
        assert_eq!(snapshot.filter.category, "work");

        store.delete(a.id).await.unwrap();
        assert_eq!(listener.count(), 4);
        assert!(listener.last().visible.is_empty());
    }

    #[tokio::test]
    async fn test_persistence_failure_propagates_without_rollback() {
        let mut store = PromptStore::new(Arc::new(FailingStore));
        let listener = Arc::new(RecordingListener::default());
        store.subscribe(listener.clone());

        let result = store.add(input("A", "", "")).await;

        assert!(matches!(result, Err(DomainError::Storage(_))));
        assert_eq!(store.len(), 1);
        assert_eq!(listener.count(), 0);
    }

    #[tokio::test]
    async fn test_resolve_id_by_prefix() {
        let store = store_with(vec![input("A", "", ""), input("B", "", "")]).await;
        let id = store.prompts()[0].id;
        let full = id.to_string();

        assert_eq!(store.resolve_id(&full).unwrap(), id);
        assert_eq!(store.resolve_id(&full[..8]).unwrap(), id);
        assert_eq!(store.resolve_id(&full[..8].to_uppercase()).unwrap(), id);
        assert!(matches!(
            store.resolve_id("zzzz"),
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            store.resolve_id(""),
            Err(DomainError::Validation(_))
        ));
    }
}
