//! Titles: curricula unlocked after the previous one completes.

use serde::{Deserialize, Serialize};

use super::technique::Ability;
use crate::refs::{CurriculumRef, TitleRef};
use crate::value_objects::Curriculum;

/// The three social standing stats a title can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SocialStat {
    Honor,
    Glory,
    Status,
}

/// A one-time stat change applied when the title is taken.
///
/// The limit is a cap for positive amounts and a floor for negative ones. A
/// character already past the limit in the "wrong" direction is never pulled
/// back to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatAward {
    pub stat: SocialStat,
    pub amount: i32,
    #[serde(default)]
    pub limit: Option<u8>,
}

impl StatAward {
    pub fn new(stat: SocialStat, amount: i32) -> Self {
        Self {
            stat,
            amount,
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: u8) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// A title, owning a curriculum that opens once the previous one is done
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Title {
    #[serde(rename = "ref", default)]
    pub title_ref: TitleRef,
    pub name: String,
    /// Stat changes applied once, when the title is taken
    #[serde(default)]
    pub awards: Vec<StatAward>,
    /// Granted on taking the title; synthesized as an unranked title effect
    pub initial_effect: Ability,
    /// Granted when the curriculum completes; synthesized as an unranked
    /// title ability
    pub final_ability: Ability,
    #[serde(default)]
    pub curriculum: Curriculum,
}

impl Title {
    pub fn new(
        title_ref: impl Into<TitleRef>,
        name: impl Into<String>,
        initial_effect: Ability,
        final_ability: Ability,
    ) -> Self {
        Self {
            title_ref: title_ref.into(),
            name: name.into(),
            awards: Vec::new(),
            initial_effect,
            final_ability,
            curriculum: Curriculum::default(),
        }
    }

    pub fn with_award(mut self, award: StatAward) -> Self {
        self.awards.push(award);
        self
    }

    pub fn with_curriculum(mut self, curriculum: Curriculum) -> Self {
        self.curriculum = curriculum;
        self
    }

    pub fn curriculum_ref(&self) -> CurriculumRef {
        self.title_ref.clone().into()
    }
}
