use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;

use crate::sweep::SweepResult;

pub mod file_store;

/// Fixed key under which the two views share the sweep result.
pub const AUDIT_DATA_KEY: &str = "auditData";

/// Injected string key/value persistence, the stand-in for browser local
/// storage that carries sweep results between independently routed views.
///
/// Single writer at a time by convention; concurrent writers to the same key
/// are undefined. Entries never expire, they are only overwritten.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
    async fn clear(&self, key: &str) -> Result<()>;
}

/// Mirror a full sweep result into the store under [`AUDIT_DATA_KEY`].
pub async fn save_audit_data<K: KeyValueStore + ?Sized>(
    store: &K,
    result: &SweepResult,
) -> Result<()> {
    let payload = serde_json::to_string(result).context("failed to serialize sweep result")?;
    store.set(AUDIT_DATA_KEY, &payload).await
}

/// Read back the mirrored sweep result.
///
/// An absent key is not an error; it is the defined "waiting for data"
/// state of the auditor view.
pub async fn load_audit_data<K: KeyValueStore + ?Sized>(store: &K) -> Result<Option<SweepResult>> {
    match store.get(AUDIT_DATA_KEY).await? {
        Some(raw) => {
            let result =
                serde_json::from_str(&raw).context("audit data in the store is corrupt")?;
            Ok(Some(result))
        }
        None => Ok(None),
    }
}

/// In-memory store. Clones share the same entries, mirroring how every view
/// of one browser session sees the same local storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| anyhow!("store mutex poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow!("store mutex poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn clear(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow!("store mutex poisoned"))?;
        entries.remove(key);
        Ok(())
    }
}
