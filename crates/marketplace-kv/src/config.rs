//! Backend selection.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{CacheError, FileStore, KvStore, MemoryStore};

/// Which backend to persist into.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StorageConfig {
    /// Process-local map. Nothing survives a restart.
    #[default]
    Memory,
    /// One file per key under `dir`.
    File {
        /// Root directory for stored entries.
        dir: PathBuf,
    },
}

impl StorageConfig {
    /// Build the configured backend.
    pub async fn open(&self) -> Result<Arc<dyn KvStore>, CacheError> {
        match self {
            Self::Memory => Ok(Arc::new(MemoryStore::new())),
            Self::File { dir } => Ok(Arc::new(FileStore::open(dir.clone()).await?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_memory() {
        assert_eq!(StorageConfig::default(), StorageConfig::Memory);
    }

    #[test]
    fn test_deserialize_file() {
        let config: StorageConfig =
            serde_json::from_str(r#"{"kind": "file", "dir": "/tmp/cart"}"#).unwrap();
        assert_eq!(
            config,
            StorageConfig::File {
                dir: PathBuf::from("/tmp/cart")
            }
        );
    }

    #[tokio::test]
    async fn test_open_file_backend() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig::File {
            dir: dir.path().join("kv"),
        };

        let store = config.open().await.unwrap();
        store.set("k", b"v").await.unwrap();
        assert!(dir.path().join("kv").is_dir());
    }
}
