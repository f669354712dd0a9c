//! Content loading with language layering.
//!
//! Each catalog section is stored as one document per language layer, keyed
//! `content/<layer>/<section>` and shaped as a map of ref to item. Layers
//! merge base -> default language -> selected language with [`deep_merge`]:
//! keys are unioned on maps, and the deeper layer wins on scalar leaves.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use sheetbldr_domain::{
    CharacterTrait, Clan, ContentCatalog, Equipment, Family, Quality, Ring, School, Skill,
    Technique, Title,
};

use super::ports::{DocumentStore, StoreError};

/// Errors while loading the content catalog
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A section document exists but cannot be decoded
    #[error("Malformed {section} content: {message}")]
    Malformed {
        section: &'static str,
        message: String,
    },
}

/// All catalog sections, in load order.
pub const CONTENT_SECTIONS: [&str; 10] = [
    "rings",
    "skills",
    "techniques",
    "traits",
    "equipment",
    "qualities",
    "schools",
    "titles",
    "clans",
    "families",
];

/// The language-independent bottom layer.
const BASE_LAYER: &str = "base";

/// Merge `overlay` into `base`: object keys are unioned and merged
/// recursively; any non-object overlay value replaces the base value.
pub fn deep_merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(slot) => deep_merge(slot, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

/// Loads and merges content documents into a finalized catalog
pub struct ContentLoader {
    store: Arc<dyn DocumentStore>,
    default_language: String,
}

impl ContentLoader {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            default_language: "en".to_string(),
        }
    }

    pub fn with_default_language(mut self, language: impl Into<String>) -> Self {
        self.default_language = language.into();
        self
    }

    /// Load every section for the selected language and finalize the catalog
    /// (ability synthesis and derived technique fields).
    pub async fn load_catalog(&self, language: &str) -> Result<ContentCatalog, ContentError> {
        let mut catalog = ContentCatalog::new();

        for (key, mut item) in self.section::<Ring>("rings", language).await? {
            item.ring_ref = key.into();
            catalog.insert_ring(item);
        }
        for (key, mut item) in self.section::<Skill>("skills", language).await? {
            item.skill_ref = key.into();
            catalog.insert_skill(item);
        }
        for (key, mut item) in self.section::<Technique>("techniques", language).await? {
            item.tech_ref = key.into();
            catalog.insert_technique(item);
        }
        for (key, mut item) in self.section::<CharacterTrait>("traits", language).await? {
            item.trait_ref = key.into();
            catalog.insert_trait(item);
        }
        for (key, mut item) in self.section::<Equipment>("equipment", language).await? {
            item.item_ref = key.into();
            catalog.insert_equipment(item);
        }
        for (key, mut item) in self.section::<Quality>("qualities", language).await? {
            item.quality_ref = key.into();
            catalog.insert_quality(item);
        }
        for (key, mut item) in self.section::<School>("schools", language).await? {
            item.school_ref = key.into();
            catalog.insert_school(item);
        }
        for (key, mut item) in self.section::<Title>("titles", language).await? {
            item.title_ref = key.into();
            catalog.insert_title(item);
        }
        for (key, mut item) in self.section::<Clan>("clans", language).await? {
            item.clan_ref = key.into();
            catalog.insert_clan(item);
        }
        for (key, mut item) in self.section::<Family>("families", language).await? {
            item.family_ref = key.into();
            catalog.insert_family(item);
        }

        catalog.finalize();
        tracing::info!(language, "content catalog loaded");
        Ok(catalog)
    }

    /// Load, merge and decode one section. Items come back with their map
    /// key so the caller can stamp the ref.
    async fn section<T: DeserializeOwned>(
        &self,
        section: &'static str,
        language: &str,
    ) -> Result<Vec<(String, T)>, ContentError> {
        let merged = self.merged_section(section, language).await?;
        let map = match merged {
            Value::Object(map) => map,
            other => {
                return Err(ContentError::Malformed {
                    section,
                    message: format!("expected an object of items, got {other}"),
                })
            }
        };
        map.into_iter()
            .map(|(key, value)| {
                serde_json::from_value::<T>(value)
                    .map(|item| (key.clone(), item))
                    .map_err(|err| ContentError::Malformed {
                        section,
                        message: format!("{key}: {err}"),
                    })
            })
            .collect()
    }

    /// Merge the section's language layers. A missing layer document is
    /// skipped; a section with no documents at all is empty, with a warning.
    async fn merged_section(
        &self,
        section: &'static str,
        language: &str,
    ) -> Result<Value, ContentError> {
        let mut layers = vec![BASE_LAYER, self.default_language.as_str()];
        if language != self.default_language {
            layers.push(language);
        }
        layers.dedup();

        let mut merged = Value::Object(Map::new());
        let mut found = false;
        for layer in layers {
            let key = format!("content/{layer}/{section}");
            match self.store.get(&key).await? {
                Some(document) => {
                    found = true;
                    deep_merge(&mut merged, document);
                }
                None => tracing::debug!(%key, "content layer missing"),
            }
        }
        if !found {
            tracing::warn!(section, "no content documents found; section is empty");
        }
        Ok(merged)
    }
}
