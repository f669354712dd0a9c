//! Character document persistence.
//!
//! Characters are stored one document per character under `characters/`.
//! A document missing required fields is malformed: the caller routes back
//! to the creation flow rather than guessing. Unknown extra fields are
//! dropped with a warning, not fatal.

use std::sync::Arc;

use serde_json::Value;

use sheetbldr_domain::CharacterRecord;

use super::ports::{DocumentStore, StoreError};

/// Errors when loading a character document
#[derive(Debug, thiserror::Error)]
pub enum CharacterLoadError {
    /// No document at the key
    #[error("Character document not found: {0}")]
    Missing(String),

    /// The document cannot be a character record. Recovery is re-creation,
    /// never field guessing.
    #[error("Malformed character document '{key}': {message}")]
    Malformed { key: String, message: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Identity fields a character document must carry.
const REQUIRED_FIELDS: [&str; 4] = ["personalName", "clanRef", "familyRef", "schoolRef"];

/// Every field the character document schema knows.
const KNOWN_FIELDS: [&str; 22] = [
    "personalName",
    "clanRef",
    "familyRef",
    "schoolRef",
    "appearance",
    "giri",
    "ninjō",
    "relationships",
    "personality",
    "traitData",
    "startingRingsObj",
    "startingSkillsObj",
    "startingTechRefs",
    "equipmentData",
    "receivedXp",
    "learningLists",
    "honor",
    "glory",
    "status",
    "fatigue",
    "strife",
    "voidPoints",
];

const KEY_PREFIX: &str = "characters";

/// Load/save characters through the document store
pub struct CharacterRepository {
    store: Arc<dyn DocumentStore>,
}

impl CharacterRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Load a character by document key.
    pub async fn load(&self, key: &str) -> Result<CharacterRecord, CharacterLoadError> {
        let document = self
            .store
            .get(key)
            .await?
            .ok_or_else(|| CharacterLoadError::Missing(key.to_string()))?;

        let Value::Object(mut map) = document else {
            return Err(CharacterLoadError::Malformed {
                key: key.to_string(),
                message: "document is not an object".to_string(),
            });
        };

        let missing: Vec<&str> = REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|field| !map.contains_key(*field))
            .collect();
        if !missing.is_empty() {
            return Err(CharacterLoadError::Malformed {
                key: key.to_string(),
                message: format!("missing required fields: {}", missing.join(", ")),
            });
        }

        let unknown: Vec<String> = map
            .keys()
            .filter(|field| !KNOWN_FIELDS.contains(&field.as_str()))
            .cloned()
            .collect();
        for field in &unknown {
            tracing::warn!(key, field, "dropping unknown character field");
            map.remove(field);
        }

        serde_json::from_value(Value::Object(map)).map_err(|err| CharacterLoadError::Malformed {
            key: key.to_string(),
            message: err.to_string(),
        })
    }

    /// Persist a character under its own document key. Returns the key.
    pub async fn save(&self, character: &CharacterRecord) -> Result<String, StoreError> {
        let key = character.document_key();
        let document = serde_json::to_value(character)
            .map_err(|err| StoreError::serialization(key.clone(), err))?;
        self.store.put(&key, &document).await?;
        tracing::debug!(%key, "character saved");
        Ok(key)
    }

    pub async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.store.delete(key).await
    }

    /// Keys of every stored character.
    pub async fn list(&self) -> Result<Vec<String>, StoreError> {
        self.store.list(KEY_PREFIX).await
    }
}
