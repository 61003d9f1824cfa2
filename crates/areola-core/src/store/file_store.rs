use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;

use super::KeyValueStore;

/// File-backed store, one JSON file per key under a base directory.
///
/// This is what lets audit data survive across process runs, the way the
/// original views survive a page reload. Keys map directly to filenames,
/// so callers keep to simple identifier-like keys.
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    /// Create a store rooted at the given directory. The directory is
    /// created lazily on the first write.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{key}.json"))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.entry_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read store entry at {}", path.display()))?;
        Ok(Some(raw))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.base_path).with_context(|| {
            format!(
                "failed to create store directory at {}",
                self.base_path.display()
            )
        })?;
        let path = self.entry_path(key);
        fs::write(&path, value)
            .with_context(|| format!("failed to write store entry at {}", path.display()))
    }

    async fn clear(&self, key: &str) -> Result<()> {
        let path = self.entry_path(key);
        if !path.exists() {
            return Ok(());
        }
        fs::remove_file(&path)
            .with_context(|| format!("failed to remove store entry at {}", path.display()))
    }
}
