use config::Config;
use log::info;
use snapshot::{FileSnapshotStore, SnapshotStore};
use std::sync::Arc;

pub mod config;
pub mod logging;
pub mod snapshot;

/// Builds the file-backed snapshot store rooted at the configured directory.
pub fn init_snapshot_store(config: &Config) -> Arc<dyn SnapshotStore> {
    info!(
        "Snapshot store directory: {}",
        config.snapshot_dir.display()
    );
    Arc::new(FileSnapshotStore::new(config.snapshot_dir.clone()))
}

// Service-level state containing only infrastructure concerns
// Needs to implement Clone to be able to be passed into Router as State
#[derive(Clone)]
pub struct AppState {
    pub snapshot_store: Arc<dyn SnapshotStore>,
    pub config: Config,
}

impl AppState {
    pub fn new(app_config: Config, snapshot_store: &Arc<dyn SnapshotStore>) -> Self {
        Self {
            snapshot_store: Arc::clone(snapshot_store),
            config: app_config,
        }
    }

    pub fn snapshot_store_ref(&self) -> &dyn SnapshotStore {
        self.snapshot_store.as_ref()
    }
}
