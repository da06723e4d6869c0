//! Single-slot "last value" storage.
//!
//! Each [`SnapshotKey`] names exactly one slot. A write replaces the slot's
//! contents unconditionally and a read returns whatever the most recent
//! successful write left behind. There is no history, merging or locking:
//! concurrent writers to the same slot race and the last one wins.

use async_trait::async_trait;
use log::*;
use serde_json::Value;
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use tokio::sync::RwLock;

/// The slots known to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapshotKey {
    LastWebhookEvent,
    LastOAuthToken,
}

impl SnapshotKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SnapshotKey::LastWebhookEvent => "last_webhook_event",
            SnapshotKey::LastOAuthToken => "last_oauth_token",
        }
    }

    /// File name used by [`FileSnapshotStore`] for this slot.
    pub fn file_name(&self) -> &'static str {
        match self {
            SnapshotKey::LastWebhookEvent => "webhook.txt",
            SnapshotKey::LastOAuthToken => "oauthtoken.txt",
        }
    }
}

/// What a slot held when it was read back.
#[derive(Debug, Clone, PartialEq)]
pub enum Snapshot {
    /// The slot parsed as JSON.
    Json(Value),
    /// The slot held text that is not valid JSON (e.g. edited by hand).
    Raw(String),
}

impl Snapshot {
    fn from_text(text: String) -> Self {
        match serde_json::from_str(&text) {
            Ok(value) => Snapshot::Json(value),
            Err(_) => Snapshot::Raw(text),
        }
    }
}

#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Replace the slot's contents with `value`, pretty-printed.
    async fn write(&self, key: SnapshotKey, value: &Value) -> io::Result<()>;

    /// Read the slot back. `Ok(None)` means nothing has been written yet.
    async fn read(&self, key: SnapshotKey) -> io::Result<Option<Snapshot>>;
}

/// Stores each slot as a pretty-printed JSON file inside one directory.
pub struct FileSnapshotStore {
    dir: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: SnapshotKey) -> PathBuf {
        self.dir.join(key.file_name())
    }
}

#[async_trait]
impl SnapshotStore for FileSnapshotStore {
    async fn write(&self, key: SnapshotKey, value: &Value) -> io::Result<()> {
        let path = self.path_for(key);
        let contents = serde_json::to_string_pretty(value)?;
        tokio::fs::write(&path, contents).await?;
        debug!("Wrote {} snapshot to {}", key.as_str(), path.display());
        Ok(())
    }

    async fn read(&self, key: SnapshotKey) -> io::Result<Option<Snapshot>> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(text) => Ok(Some(Snapshot::from_text(text))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Keeps slots in memory. Used by tests and by deployments without a writable disk.
#[derive(Default)]
pub struct MemorySnapshotStore {
    slots: RwLock<HashMap<SnapshotKey, String>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put raw text into a slot, bypassing JSON serialization.
    pub async fn write_raw(&self, key: SnapshotKey, text: impl Into<String>) {
        self.slots.write().await.insert(key, text.into());
    }
}

#[async_trait]
impl SnapshotStore for MemorySnapshotStore {
    async fn write(&self, key: SnapshotKey, value: &Value) -> io::Result<()> {
        let contents = serde_json::to_string_pretty(value)?;
        self.slots.write().await.insert(key, contents);
        Ok(())
    }

    async fn read(&self, key: SnapshotKey) -> io::Result<Option<Snapshot>> {
        Ok(self
            .slots
            .read()
            .await
            .get(&key)
            .cloned()
            .map(Snapshot::from_text))
    }
}
