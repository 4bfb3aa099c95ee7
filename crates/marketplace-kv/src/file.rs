//! Directory-backed key-value store.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

use crate::store::KvStore;
use crate::CacheError;

/// Longest key, in bytes, a [`FileStore`] accepts.
///
/// Its base64 form plus the `.json.tmp` suffix stays within the 255-byte
/// file name limit of common filesystems.
pub const MAX_KEY_LEN: usize = 180;

/// Durable backend keeping one file per key under a root directory.
///
/// File names are the URL-safe base64 of the key, so namespaced keys like
/// `@GoMarketplace:products` map to portable names. Keys longer than
/// [`MAX_KEY_LEN`] bytes are rejected with [`CacheError::StoreError`].
/// Writes land in a temporary sibling and are renamed over the target.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `root`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let store = FileStore::open("/var/lib/marketplace").await?;
    /// ```
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .map_err(|e| CacheError::OpenError(format!("{}: {}", root.display(), e)))?;
        Ok(Self { root })
    }

    /// Root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, CacheError> {
        if key.len() > MAX_KEY_LEN {
            return Err(CacheError::StoreError(format!(
                "key is {} bytes, file store keys are limited to {}",
                key.len(),
                MAX_KEY_LEN
            )));
        }
        Ok(self
            .root
            .join(format!("{}.json", URL_SAFE_NO_PAD.encode(key.as_bytes()))))
    }
}

#[async_trait]
impl KvStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        match tokio::fs::read(self.path_for(key)?).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CacheError::StoreError(format!("read {}: {}", key, e))),
        }
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");

        tokio::fs::write(&tmp, value)
            .await
            .map_err(|e| CacheError::StoreError(format!("write {}: {}", key, e)))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| CacheError::StoreError(format!("commit {}: {}", key, e)))?;

        tracing::trace!(key, path = %path.display(), bytes = value.len(), "wrote file entry");
        Ok(())
    }
}
