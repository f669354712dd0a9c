//! Distinctions, adversities, passions and anxieties.

use serde::{Deserialize, Serialize};

use crate::refs::{RingRef, TraitRef};

/// The four trait families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TraitType {
    Distinction,
    Adversity,
    Passion,
    Anxiety,
}

/// A trait from the content catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterTrait {
    #[serde(rename = "ref", default)]
    pub trait_ref: TraitRef,
    pub name: String,
    pub trait_type: TraitType,
    #[serde(default)]
    pub ring: Option<RingRef>,
    #[serde(default)]
    pub effect: String,
}

impl CharacterTrait {
    pub fn new(
        trait_ref: impl Into<TraitRef>,
        name: impl Into<String>,
        trait_type: TraitType,
    ) -> Self {
        Self {
            trait_ref: trait_ref.into(),
            name: name.into(),
            trait_type,
            ring: None,
            effect: String::new(),
        }
    }

    pub fn with_ring(mut self, ring: impl Into<RingRef>) -> Self {
        self.ring = Some(ring.into());
        self
    }

    pub fn with_effect(mut self, effect: impl Into<String>) -> Self {
        self.effect = effect.into();
        self
    }
}

/// A trait written by the player rather than picked from the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomTrait {
    pub name: String,
    pub trait_type: TraitType,
    #[serde(default)]
    pub effect: String,
}

/// One entry of a character's trait list: a catalog ref or an inline custom
/// trait.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TraitEntry {
    Ref {
        #[serde(rename = "ref")]
        trait_ref: TraitRef,
    },
    Custom(CustomTrait),
}
