//! Persistent key-value state scoped to the extension.
//!
//! [`FileMemento`] keeps the store in a JSON file that outlives the process;
//! [`InMemoryMemento`] forgets everything when dropped.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::{SwanError, SwanResult};

/// File name of the global state store inside the data directory.
pub const GLOBAL_STATE_FILE: &str = "global-state.json";

/// Durable key-value storage provided by the host.
#[async_trait]
pub trait Memento: Send + Sync {
    /// Read a value.
    fn get(&self, key: &str) -> Option<Value>;

    /// Write a value, replacing any previous one.
    async fn update(&self, key: &str, value: Value) -> SwanResult<()>;

    /// All stored keys, sorted.
    fn keys(&self) -> Vec<String>;
}

/// Read a boolean flag, `false` when absent or not a boolean.
pub fn read_flag(memento: &dyn Memento, key: &str) -> bool {
    memento.get(key).and_then(|value| value.as_bool()).unwrap_or(false)
}

/// Store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct InMemoryMemento {
    values: Mutex<BTreeMap<String, Value>>,
}

impl InMemoryMemento {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Memento for InMemoryMemento {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.lock().get(key).cloned()
    }

    async fn update(&self, key: &str, value: Value) -> SwanResult<()> {
        self.values.lock().insert(key.to_string(), value);
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.values.lock().keys().cloned().collect()
    }
}

/// Store persisted as a JSON object on disk.
///
/// The whole file is rewritten on every update.
#[derive(Debug)]
pub struct FileMemento {
    path: PathBuf,
    values: Mutex<BTreeMap<String, Value>>,
}

impl FileMemento {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> SwanResult<Self> {
        let path = path.into();
        let values: BTreeMap<String, Value> = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content)
                .map_err(|e| SwanError::State(format!("{}: {e}", path.display())))?
        } else {
            BTreeMap::new()
        };

        tracing::debug!(path = %path.display(), keys = values.len(), "opened global state");
        Ok(Self { path, values: Mutex::new(values) })
    }

    /// Open `global-state.json` inside `dir`.
    pub fn open_in(dir: &Path) -> SwanResult<Self> {
        Self::open(dir.join(GLOBAL_STATE_FILE))
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Pretty-printed JSON of the current contents.
    pub fn to_json(&self) -> SwanResult<String> {
        serde_json::to_string_pretty(&*self.values.lock())
            .map_err(|e| SwanError::State(e.to_string()))
    }
}

#[async_trait]
impl Memento for FileMemento {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.lock().get(key).cloned()
    }

    async fn update(&self, key: &str, value: Value) -> SwanResult<()> {
        let content = {
            let mut values = self.values.lock();
            values.insert(key.to_string(), value);
            serde_json::to_string_pretty(&*values).map_err(|e| SwanError::State(e.to_string()))?
        };

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, content).await?;

        tracing::debug!(key, path = %self.path.display(), "global state updated");
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.values.lock().keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn test_in_memory_flag() {
        let memento = InMemoryMemento::new();
        assert!(!read_flag(&memento, "flag"));

        memento.update("flag", json!(true)).await.unwrap();
        memento.update("flag", json!(true)).await.unwrap();
        assert!(read_flag(&memento, "flag"));
        assert_eq!(memento.keys(), vec!["flag".to_string()]);
    }

    #[tokio::test]
    async fn test_non_bool_flag_reads_false() {
        let memento = InMemoryMemento::new();
        memento.update("flag", json!("yes")).await.unwrap();
        assert!(!read_flag(&memento, "flag"));
    }

    #[tokio::test]
    async fn test_file_memento_persists() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("nested");

        let memento = FileMemento::open_in(&nested).unwrap();
        assert!(memento.keys().is_empty());
        memento.update("swan.hasShownWelcome", json!(true)).await.unwrap();

        let reopened = FileMemento::open_in(&nested).unwrap();
        assert!(read_flag(&reopened, "swan.hasShownWelcome"));
        assert!(reopened.to_json().unwrap().contains("swan.hasShownWelcome"));
    }

    #[test]
    fn test_file_memento_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(GLOBAL_STATE_FILE);
        std::fs::write(&path, "{not json").unwrap();

        assert!(matches!(FileMemento::open(&path), Err(SwanError::State(_))));
    }
}
