//! JSON file implementation of KeyValueStore
//!
//! The whole store is one JSON object on disk, mirroring extension
//! local storage. Writes go to a sibling temp file that is renamed over
//! the target.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::fs;

use promptdeck::{DomainError, KeyValueStore};

/// File-backed key-value store
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "storage.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Write to the temp file, then rename it over the target
    async fn replace_contents(&self, contents: String) -> Result<(), DomainError> {
        let temp = self.temp_path();
        fs::write(&temp, contents)
            .await
            .map_err(DomainError::storage)?;
        if let Err(err) = fs::rename(&temp, &self.path).await {
            let _ = fs::remove_file(&temp).await;
            return Err(DomainError::storage(err));
        }
        Ok(())
    }

    async fn read_all(&self) -> Result<Map<String, Value>, DomainError> {
        if !fs::try_exists(&self.path).await.map_err(DomainError::storage)? {
            return Ok(Map::new());
        }

        let contents = fs::read_to_string(&self.path)
            .await
            .map_err(DomainError::storage)?;
        if contents.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str(&contents)? {
            Value::Object(map) => Ok(map),
            other => Err(DomainError::Storage(format!(
                "Expected a JSON object in {:?}, found {}",
                self.path,
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, keys: &[&str]) -> Result<HashMap<String, Value>, DomainError> {
        let mut all = self.read_all().await?;
        Ok(keys
            .iter()
            .filter_map(|k| all.remove(*k).map(|v| (k.to_string(), v)))
            .collect())
    }

    async fn set(&self, items: HashMap<String, Value>) -> Result<(), DomainError> {
        let mut all = self.read_all().await?;
        all.extend(items);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(DomainError::storage)?;
            }
        }

        let contents = serde_json::to_string_pretty(&Value::Object(all))?;
        self.replace_contents(contents).await?;

        tracing::debug!("Wrote storage file {:?}", self.path);
        Ok(())
    }
}
