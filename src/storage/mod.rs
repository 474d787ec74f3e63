pub mod document;
pub mod file;
pub mod http;
pub mod memory;
pub mod tiered;

pub use document::{DocumentSnapshotStore, LEADERBOARDS_COLLECTION};
pub use file::JsonFileStore;
pub use http::HttpDocumentStore;
pub use memory::MemoryDocumentStore;
pub use tiered::TieredStore;

use crate::config::toml_config::AppConfig;
use crate::core::SnapshotStore;
use crate::utils::error::Result;
use std::sync::Arc;

/// Builds the snapshot store described by `config`.
///
/// Returns the store and whether a hosted document store backs it. With a
/// hosted store configured, the local JSON files become a read-through mirror.
pub fn build_snapshot_store(config: &AppConfig) -> Result<(Arc<dyn SnapshotStore>, bool)> {
    let files: Arc<dyn SnapshotStore> = Arc::new(config.file_store());

    match config.document_store()? {
        Some(documents) => {
            tracing::info!("Using hosted document store with local mirror at {}", config.storage.data_dir);
            let hosted = DocumentSnapshotStore::with_collection(
                Arc::new(documents),
                config.storage.collection.clone(),
            );
            Ok((Arc::new(TieredStore::new(Arc::new(hosted), files)), true))
        }
        None => {
            tracing::info!("Using local JSON store at {}", config.storage.data_dir);
            Ok((files, false))
        }
    }
}
