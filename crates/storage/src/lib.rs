use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::sync::Mutex;

/// Key under which the session marker lives. Only its presence matters.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Persistent string-to-string store, the stand-in for the browser's
/// key-value storage the original client kept its session marker in.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;
    async fn clear(&self) -> Result<()>;
}

/// File-backed store: one flat JSON map per file, flushed on every write.
pub struct FileStore {
    path: PathBuf,
    cells: Mutex<HashMap<String, String>>,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        ensure_parent_dir_exists(&path)?;

        let cells = if path.exists() {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("failed to read store file '{}'", path.display()))?;
            serde_json::from_str(&raw).with_context(|| {
                format!("store file '{}' is not a valid JSON map", path.display())
            })?
        } else {
            HashMap::new()
        };

        Ok(Self {
            path,
            cells: Mutex::new(cells),
        })
    }

    fn flush(&self, cells: &HashMap<String, String>) -> Result<()> {
        let raw = serde_json::to_string_pretty(cells)?;
        fs::write(&self.path, raw)
            .with_context(|| format!("failed to write store file '{}'", self.path.display()))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.cells.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut cells = self.cells.lock().await;
        cells.insert(key.to_string(), value.to_string());
        self.flush(&cells)
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut cells = self.cells.lock().await;
        cells.remove(key);
        self.flush(&cells)
    }

    async fn clear(&self) -> Result<()> {
        let mut cells = self.cells.lock().await;
        cells.clear();
        self.flush(&cells)
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStore {
    cells: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.cells.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.cells
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.cells.lock().await.remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.cells.lock().await.clear();
        Ok(())
    }
}

fn ensure_parent_dir_exists(path: &Path) -> Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };

    if parent.as_os_str().is_empty() {
        return Ok(());
    }

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for store file '{}'",
            parent.display(),
            path.display()
        )
    })
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
