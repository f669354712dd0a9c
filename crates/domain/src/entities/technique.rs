//! Techniques and the abilities synthesized into the technique universe.
//!
//! Two technique fields are derived rather than authored: the ring affinity
//! (when the document does not state one) and the set of activation-style
//! tags. Both are computed once per session by [`Technique::finalize`], which
//! the catalog runs during load.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::ring::STANDARD_RING_REFS;
use crate::refs::{ClanRef, RingRef, TechRef};

/// Classification of a technique, also used for school compatibility lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TechniqueGroup {
    Kata,
    Kiho,
    Invocation,
    Ritual,
    Shuji,
    Maho,
    Ninjutsu,
    SchoolAbility,
    MasteryAbility,
    TitleEffect,
    TitleAbility,
}

impl TechniqueGroup {
    /// The string form used by `TG:` curriculum expressions.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Kata => "kata",
            Self::Kiho => "kiho",
            Self::Invocation => "invocation",
            Self::Ritual => "ritual",
            Self::Shuji => "shuji",
            Self::Maho => "maho",
            Self::Ninjutsu => "ninjutsu",
            Self::SchoolAbility => "schoolAbility",
            Self::MasteryAbility => "masteryAbility",
            Self::TitleEffect => "titleEffect",
            Self::TitleAbility => "titleAbility",
        }
    }

    /// Abilities are granted automatically by schools and titles, never
    /// bought, so they are excluded from the missable classification.
    pub fn is_ability(self) -> bool {
        matches!(
            self,
            Self::SchoolAbility | Self::MasteryAbility | Self::TitleEffect | Self::TitleAbility
        )
    }
}

/// Activation-style tags derived from a technique's activation text.
/// Non-exclusive; a technique can carry several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivationKind {
    Action,
    Downtime,
    Opportunity,
    Void,
    Limited,
    Permanent,
    Tn,
}

/// A technique from the content catalog (or synthesized from an ability)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Technique {
    #[serde(rename = "ref", default)]
    pub tech_ref: TechRef,
    pub name: String,
    pub group: TechniqueGroup,
    /// 1-6; 7 means unranked (sorts after everything ranked)
    #[serde(default = "unranked")]
    pub rank: u8,
    /// Only learnable by characters of this clan when set
    #[serde(default)]
    pub clan: Option<ClanRef>,
    /// Explicit experience cost; absent means the default cost
    #[serde(default)]
    pub exp_cost: Option<u32>,
    /// Ring affinity. Authored in the document or inferred at finalization;
    /// stays `None` when neither source names a ring.
    #[serde(default)]
    pub ring: Option<RingRef>,
    #[serde(default)]
    pub activation: String,
    #[serde(default)]
    pub effect: String,
    /// Derived at finalization, never persisted
    #[serde(skip)]
    pub activation_set: BTreeSet<ActivationKind>,
}

/// Rank value meaning "unranked"
pub const UNRANKED: u8 = 7;

fn unranked() -> u8 {
    UNRANKED
}

impl Technique {
    /// Experience cost of a technique without an explicit `expCost`.
    pub const DEFAULT_EXP_COST: u32 = 3;

    pub fn new(
        tech_ref: impl Into<TechRef>,
        name: impl Into<String>,
        group: TechniqueGroup,
    ) -> Self {
        Self {
            tech_ref: tech_ref.into(),
            name: name.into(),
            group,
            rank: UNRANKED,
            clan: None,
            exp_cost: None,
            ring: None,
            activation: String::new(),
            effect: String::new(),
            activation_set: BTreeSet::new(),
        }
    }

    pub fn with_rank(mut self, rank: u8) -> Self {
        self.rank = rank;
        self
    }

    pub fn with_clan(mut self, clan: impl Into<ClanRef>) -> Self {
        self.clan = Some(clan.into());
        self
    }

    pub fn with_exp_cost(mut self, cost: u32) -> Self {
        self.exp_cost = Some(cost);
        self
    }

    pub fn with_ring(mut self, ring: impl Into<RingRef>) -> Self {
        self.ring = Some(ring.into());
        self
    }

    pub fn with_activation(mut self, activation: impl Into<String>) -> Self {
        self.activation = activation.into();
        self
    }

    pub fn with_effect(mut self, effect: impl Into<String>) -> Self {
        self.effect = effect.into();
        self
    }

    /// Experience cost to learn this technique.
    pub fn cost(&self) -> u32 {
        self.exp_cost.unwrap_or(Self::DEFAULT_EXP_COST)
    }

    /// Whether a character of the given clan may take this technique.
    pub fn allowed_for_clan(&self, clan: Option<&ClanRef>) -> bool {
        match (&self.clan, clan) {
            (None, _) => true,
            (Some(required), Some(actual)) => required == actual,
            (Some(_), None) => false,
        }
    }

    /// Compute the derived fields: ring affinity (if not authored) and the
    /// activation tag set. Run once per session by the catalog.
    pub fn finalize(&mut self) {
        if self.ring.is_none() {
            self.ring = infer_ring(&self.name, &self.activation, &self.effect);
        }
        self.activation_set = infer_activation_set(&self.activation);
    }
}

/// Scan technique text for a ring name; the earliest whole-word mention wins
/// ("repair" must not read as air).
fn infer_ring(name: &str, activation: &str, effect: &str) -> Option<RingRef> {
    let text = format!("{name} {activation} {effect}").to_lowercase();
    text.split(|c: char| !c.is_alphanumeric())
        .find(|token| STANDARD_RING_REFS.contains(token))
        .map(|token| RingRef::new(token.to_string()))
}

/// Derive activation tags from the activation text. Single-word markers are
/// matched as whole words so that e.g. "mountain" does not read as a TN.
fn infer_activation_set(activation: &str) -> BTreeSet<ActivationKind> {
    let text = activation.to_lowercase();
    let mut tags = BTreeSet::new();

    for token in text.split(|c: char| !c.is_alphanumeric()) {
        let tag = match token {
            "action" => Some(ActivationKind::Action),
            "downtime" => Some(ActivationKind::Downtime),
            "opportunity" => Some(ActivationKind::Opportunity),
            "limited" => Some(ActivationKind::Limited),
            "permanent" => Some(ActivationKind::Permanent),
            "tn" => Some(ActivationKind::Tn),
            _ => None,
        };
        if let Some(tag) = tag {
            tags.insert(tag);
        }
    }
    if text.contains("void point") {
        tags.insert(ActivationKind::Void);
    }
    tags
}

/// An ability embedded in a school or title document. Synthesized into the
/// technique universe at catalog finalization with a group and rank assigned
/// by its origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ability {
    #[serde(rename = "ref")]
    pub ability_ref: TechRef,
    pub name: String,
    #[serde(default)]
    pub ring: Option<RingRef>,
    #[serde(default)]
    pub activation: String,
    #[serde(default)]
    pub effect: String,
}

impl Ability {
    pub fn new(ability_ref: impl Into<TechRef>, name: impl Into<String>) -> Self {
        Self {
            ability_ref: ability_ref.into(),
            name: name.into(),
            ring: None,
            activation: String::new(),
            effect: String::new(),
        }
    }

    pub fn with_effect(mut self, effect: impl Into<String>) -> Self {
        self.effect = effect.into();
        self
    }

    /// Build the technique-universe entry for this ability.
    pub fn to_technique(&self, group: TechniqueGroup, rank: u8) -> Technique {
        let mut tech = Technique::new(self.ability_ref.clone(), self.name.clone(), group)
            .with_rank(rank)
            .with_activation(self.activation.clone())
            .with_effect(self.effect.clone());
        tech.ring = self.ring.clone();
        tech
    }
}
