//! Port traits for infrastructure boundaries.
//!
//! The document store is the only abstraction here: a key/value store of
//! JSON documents addressed by path-like string keys. Everything else in the
//! engine is concrete types.

use async_trait::async_trait;
use serde_json::Value;

/// Document store operation errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store backend cannot be opened at all. Permanent for the session;
    /// callers should surface this instead of proceeding.
    #[error("Document store unavailable: {0}")]
    Unavailable(String),

    /// An individual storage operation failed - includes the operation name
    /// for tracing.
    #[error("Storage error in {operation}: {message}")]
    Io {
        operation: &'static str,
        message: String,
    },

    /// A stored document is not valid JSON, or a value failed to encode.
    #[error("Serialization error for '{key}': {message}")]
    Serialization { key: String, message: String },

    /// The key does not form a valid relative path.
    #[error("Invalid document key: {0}")]
    InvalidKey(String),
}

impl StoreError {
    pub fn unavailable(message: impl ToString) -> Self {
        Self::Unavailable(message.to_string())
    }

    pub fn io(operation: &'static str, message: impl ToString) -> Self {
        Self::Io {
            operation,
            message: message.to_string(),
        }
    }

    pub fn serialization(key: impl Into<String>, message: impl ToString) -> Self {
        Self::Serialization {
            key: key.into(),
            message: message.to_string(),
        }
    }

    pub fn invalid_key(key: impl Into<String>) -> Self {
        Self::InvalidKey(key.into())
    }
}

/// Key/value store of JSON documents, addressed by `/`-separated keys
/// (`characters/kitsune_Ayame`, `content/en/skills`, `settings`).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a document. A missing document is `Ok(None)`, never an error.
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Write a document, replacing any previous version.
    async fn put(&self, key: &str, document: &Value) -> Result<(), StoreError>;

    /// Remove a document. Removing a missing document succeeds.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// Keys of every document directly under the prefix.
    async fn list(&self, prefix: &str) -> Result<Vec<String>, StoreError>;
}
