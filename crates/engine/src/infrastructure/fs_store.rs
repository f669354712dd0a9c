//! Filesystem adapter for the document store port.
//!
//! Keys map to `<root>/<key>.json`. Key segments are validated so a key can
//! never escape the root directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;

use super::ports::{DocumentStore, StoreError};

/// JSON documents as files under a root directory
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    root: PathBuf,
}

impl FsDocumentStore {
    /// Open a store rooted at the given directory, creating it if needed.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)
            .await
            .map_err(StoreError::unavailable)?;
        tracing::debug!(root = %root.display(), "document store opened");
        Ok(Self { root })
    }

    /// Open a store in the platform data directory.
    pub async fn open_default() -> Result<Self, StoreError> {
        let dirs = directories::ProjectDirs::from("", "SheetBldr", "sheetbldr")
            .ok_or_else(|| StoreError::unavailable("no home directory available"))?;
        Self::open(dirs.data_dir()).await
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Validate a key and resolve it to a file path under the root.
    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        if key.is_empty() || key.starts_with('/') || key.ends_with('/') {
            return Err(StoreError::invalid_key(key));
        }
        let mut path = self.root.clone();
        for segment in key.split('/') {
            if segment.is_empty() || segment == "." || segment == ".." || segment.contains('\\') {
                return Err(StoreError::invalid_key(key));
            }
            path.push(segment);
        }
        path.set_extension("json");
        Ok(path)
    }
}

#[async_trait]
impl DocumentStore for FsDocumentStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let path = self.path_for(key)?;
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(StoreError::io("get", err)),
        };
        let value =
            serde_json::from_slice(&bytes).map_err(|err| StoreError::serialization(key, err))?;
        Ok(Some(value))
    }

    async fn put(&self, key: &str, document: &Value) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|err| StoreError::io("put", err))?;
        }
        let bytes = serde_json::to_vec_pretty(document)
            .map_err(|err| StoreError::serialization(key, err))?;
        fs::write(&path, bytes)
            .await
            .map_err(|err| StoreError::io("put", err))
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StoreError::io("delete", err)),
        }
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let dir = if prefix.is_empty() {
            self.root.clone()
        } else {
            // Reuse key validation; the placeholder segment is stripped again.
            self.path_for(&format!("{}/_", prefix.trim_end_matches('/')))?
                .parent()
                .map(Path::to_path_buf)
                .ok_or_else(|| StoreError::invalid_key(prefix))?
        };

        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(StoreError::io("list", err)),
        };

        let mut keys = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|err| StoreError::io("list", err))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                if prefix.is_empty() {
                    keys.push(stem.to_string());
                } else {
                    keys.push(format!("{}/{}", prefix.trim_end_matches('/'), stem));
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn store() -> (tempfile::TempDir, FsDocumentStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FsDocumentStore::open(dir.path().join("data"))
            .await
            .expect("open store");
        (dir, store)
    }

    #[tokio::test]
    async fn round_trips_documents() {
        let (_dir, store) = store().await;
        let doc = json!({"personalName": "Ayame", "honor": 50});

        store.put("characters/kitsune_Ayame", &doc).await.expect("put");
        let loaded = store
            .get("characters/kitsune_Ayame")
            .await
            .expect("get")
            .expect("document present");
        assert_eq!(loaded, doc);
    }

    #[tokio::test]
    async fn missing_document_is_none() {
        let (_dir, store) = store().await;
        assert_eq!(store.get("characters/nobody").await.expect("get"), None);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let (_dir, store) = store().await;
        store
            .put("settings", &json!({"language": "en"}))
            .await
            .expect("put");
        store.delete("settings").await.expect("first delete");
        store.delete("settings").await.expect("second delete");
        assert_eq!(store.get("settings").await.expect("get"), None);
    }

    #[tokio::test]
    async fn list_returns_keys_under_prefix() {
        let (_dir, store) = store().await;
        store
            .put("characters/kitsune_Ayame", &json!({}))
            .await
            .expect("put");
        store
            .put("characters/isawa_Tadaka", &json!({}))
            .await
            .expect("put");
        store.put("settings", &json!({})).await.expect("put");

        let keys = store.list("characters").await.expect("list");
        assert_eq!(
            keys,
            vec!["characters/isawa_Tadaka", "characters/kitsune_Ayame"]
        );
    }

    #[tokio::test]
    async fn rejects_escaping_keys() {
        let (_dir, store) = store().await;
        for key in ["../outside", "a/../../b", "/absolute", "", "a//b"] {
            let err = store.get(key).await.expect_err("invalid key");
            assert!(matches!(err, StoreError::InvalidKey(_)), "key: {key}");
        }
    }

    #[tokio::test]
    async fn corrupt_document_reports_serialization_error() {
        let (_dir, store) = store().await;
        let path = store.root().join("settings.json");
        tokio::fs::write(&path, b"{not json").await.expect("write");
        let err = store.get("settings").await.expect_err("corrupt");
        assert!(matches!(err, StoreError::Serialization { .. }));
    }
}
