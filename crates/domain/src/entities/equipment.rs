//! Equipment and item qualities.

use serde::{Deserialize, Serialize};

use crate::refs::{ItemRef, QualityRef};

/// An item quality (razor-edged, sacred, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quality {
    #[serde(rename = "ref", default)]
    pub quality_ref: QualityRef,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Quality {
    pub fn new(quality_ref: impl Into<QualityRef>, name: impl Into<String>) -> Self {
        Self {
            quality_ref: quality_ref.into(),
            name: name.into(),
            description: String::new(),
        }
    }
}

/// An equipment item from the content catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    #[serde(rename = "ref", default)]
    pub item_ref: ItemRef,
    pub name: String,
    #[serde(default)]
    pub category: String,
    /// Qualities every copy of this item carries
    #[serde(default)]
    pub qualities: Vec<QualityRef>,
    #[serde(default)]
    pub description: String,
}

impl Equipment {
    pub fn new(item_ref: impl Into<ItemRef>, name: impl Into<String>) -> Self {
        Self {
            item_ref: item_ref.into(),
            name: name.into(),
            category: String::new(),
            qualities: Vec::new(),
            description: String::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_quality(mut self, quality: impl Into<QualityRef>) -> Self {
        self.qualities.push(quality.into());
        self
    }
}

/// One line of a character's equipment list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentEntry {
    #[serde(rename = "ref")]
    pub item_ref: ItemRef,
    pub amount: u32,
    /// Qualities on this copy beyond the item's own (absent = none)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_refs: Option<Vec<QualityRef>>,
}

impl EquipmentEntry {
    pub fn new(item_ref: impl Into<ItemRef>, amount: u32) -> Self {
        Self {
            item_ref: item_ref.into(),
            amount,
            quality_refs: None,
        }
    }
}
