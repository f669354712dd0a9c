//! Application settings document.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ports::{DocumentStore, StoreError};

const SETTINGS_KEY: &str = "settings";

/// Per-user settings, persisted as one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    /// Selected content language
    #[serde(default = "default_language")]
    pub language: String,
    /// Tab restored on the next session
    #[serde(default)]
    pub last_tab: Option<String>,
    /// Last-chosen value per filter control
    #[serde(default)]
    pub filter_selections: BTreeMap<String, String>,
    /// When the content cache was last refreshed
    #[serde(default)]
    pub last_cache_refresh: Option<DateTime<Utc>>,
    /// Document key of the most recently opened character
    #[serde(default)]
    pub latest_character: Option<String>,
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            language: default_language(),
            last_tab: None,
            filter_selections: BTreeMap::new(),
            last_cache_refresh: None,
            latest_character: None,
        }
    }
}

impl AppSettings {
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Record the moment the content cache was refreshed.
    pub fn mark_cache_refreshed(&mut self, now: DateTime<Utc>) {
        self.last_cache_refresh = Some(now);
    }
}

/// Settings persistence with constructed-default fallback
pub struct SettingsRepository {
    store: Arc<dyn DocumentStore>,
}

impl SettingsRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Load settings. A missing or undecodable document falls back to the
    /// defaults (the latter with a warning).
    pub async fn get(&self) -> Result<AppSettings, StoreError> {
        match self.store.get(SETTINGS_KEY).await? {
            None => Ok(AppSettings::default()),
            Some(document) => match serde_json::from_value(document) {
                Ok(settings) => Ok(settings),
                Err(err) => {
                    tracing::warn!(error = %err, "settings document unreadable; using defaults");
                    Ok(AppSettings::default())
                }
            },
        }
    }

    pub async fn save(&self, settings: &AppSettings) -> Result<(), StoreError> {
        let document = serde_json::to_value(settings)
            .map_err(|err| StoreError::serialization(SETTINGS_KEY, err))?;
        self.store.put(SETTINGS_KEY, &document).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockDocumentStore;
    use serde_json::json;

    #[tokio::test]
    async fn missing_settings_fall_back_to_defaults() {
        let mut store = MockDocumentStore::new();
        store.expect_get().returning(|_| Ok(None));
        let repo = SettingsRepository::new(Arc::new(store));

        let settings = repo.get().await.expect("get");
        assert_eq!(settings, AppSettings::default());
        assert_eq!(settings.language, "en");
    }

    #[tokio::test]
    async fn unreadable_settings_fall_back_to_defaults() {
        let mut store = MockDocumentStore::new();
        store
            .expect_get()
            .returning(|_| Ok(Some(json!({"language": ["not", "a", "string"]}))));
        let repo = SettingsRepository::new(Arc::new(store));

        let settings = repo.get().await.expect("get");
        assert_eq!(settings, AppSettings::default());
    }

    #[tokio::test]
    async fn partial_documents_keep_field_defaults() {
        let mut store = MockDocumentStore::new();
        store
            .expect_get()
            .returning(|_| Ok(Some(json!({"language": "de", "lastTab": "skills"}))));
        let repo = SettingsRepository::new(Arc::new(store));

        let settings = repo.get().await.expect("get");
        assert_eq!(settings.language, "de");
        assert_eq!(settings.last_tab.as_deref(), Some("skills"));
        assert!(settings.filter_selections.is_empty());
        assert_eq!(settings.latest_character, None);
    }
}
