//! Cart store configuration.

use std::path::Path;

use marketplace_kv::{cache_key, StorageConfig};
use serde::{Deserialize, Serialize};

use crate::error::CartError;

/// Namespace the client stores its records under.
pub const DEFAULT_NAMESPACE: &str = "@GoMarketplace";

/// Record name of the cart snapshot within the namespace.
pub const DEFAULT_COLLECTION: &str = "products";

/// Cart store configuration.
///
/// Every field has a default, so an empty file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Application namespace for storage keys.
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Record name of the cart snapshot.
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Persistence backend.
    #[serde(default)]
    pub storage: StorageConfig,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_collection() -> String {
    DEFAULT_COLLECTION.to_string()
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            collection: default_collection(),
            storage: StorageConfig::default(),
        }
    }
}

impl CartConfig {
    /// Load config from a file.
    ///
    /// `.json` files are parsed as JSON, anything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CartError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CartError::Configuration(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content).map_err(|e| {
                CartError::Configuration(format!(
                    "Failed to parse JSON config {}: {}",
                    path.display(),
                    e
                ))
            })
        } else {
            toml::from_str(&content).map_err(|e| {
                CartError::Configuration(format!(
                    "Failed to parse TOML config {}: {}",
                    path.display(),
                    e
                ))
            })
        }
    }

    /// Fixed storage key of the cart snapshot.
    pub fn storage_key(&self) -> String {
        cache_key!(self.namespace.as_str(), self.collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_key() {
        assert_eq!(CartConfig::default().storage_key(), "@GoMarketplace:products");
    }

    #[test]
    fn test_load_empty_toml() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(b"").unwrap();

        let config = CartConfig::load(file.path()).unwrap();
        assert_eq!(config, CartConfig::default());
    }

    #[test]
    fn test_load_toml() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
namespace = "@Shop"

[storage]
kind = "file"
dir = "/var/lib/shop"
"#
        )
        .unwrap();

        let config = CartConfig::load(file.path()).unwrap();
        assert_eq!(config.storage_key(), "@Shop:products");
        assert_eq!(
            config.storage,
            StorageConfig::File {
                dir: "/var/lib/shop".into()
            }
        );
    }

    #[test]
    fn test_load_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"collection": "basket"}}"#).unwrap();

        let config = CartConfig::load(file.path()).unwrap();
        assert_eq!(config.storage_key(), "@GoMarketplace:basket");
        assert_eq!(config.storage, StorageConfig::Memory);
    }

    #[test]
    fn test_load_missing_file() {
        let err = CartConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, CartError::Configuration(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "namespace = ").unwrap();

        let err = CartConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, CartError::Configuration(_)));
    }
}
