//! Clans and families.

use serde::{Deserialize, Serialize};

use crate::refs::{ClanRef, FamilyRef, RingRef, SkillRef};

/// A great clan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clan {
    #[serde(rename = "ref", default)]
    pub clan_ref: ClanRef,
    pub name: String,
    /// Ring raised by one at creation
    #[serde(default)]
    pub ring_increase: Option<RingRef>,
    /// Skill granted at creation
    #[serde(default)]
    pub skill_increase: Option<SkillRef>,
    /// Starting status for members of this clan
    #[serde(default)]
    pub status: u8,
}

impl Clan {
    pub fn new(clan_ref: impl Into<ClanRef>, name: impl Into<String>) -> Self {
        Self {
            clan_ref: clan_ref.into(),
            name: name.into(),
            ring_increase: None,
            skill_increase: None,
            status: 0,
        }
    }

    pub fn with_ring_increase(mut self, ring: impl Into<RingRef>) -> Self {
        self.ring_increase = Some(ring.into());
        self
    }

    pub fn with_skill_increase(mut self, skill: impl Into<SkillRef>) -> Self {
        self.skill_increase = Some(skill.into());
        self
    }

    pub fn with_status(mut self, status: u8) -> Self {
        self.status = status;
        self
    }
}

/// A family within a clan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Family {
    #[serde(rename = "ref", default)]
    pub family_ref: FamilyRef,
    pub name: String,
    pub clan: ClanRef,
    /// Ring raised by one at creation
    #[serde(default)]
    pub ring_increase: Option<RingRef>,
    /// Skills granted at creation
    #[serde(default)]
    pub skills: Vec<SkillRef>,
    /// Starting glory for members of this family
    #[serde(default)]
    pub glory: u8,
}

impl Family {
    pub fn new(
        family_ref: impl Into<FamilyRef>,
        name: impl Into<String>,
        clan: impl Into<ClanRef>,
    ) -> Self {
        Self {
            family_ref: family_ref.into(),
            name: name.into(),
            clan: clan.into(),
            ring_increase: None,
            skills: Vec::new(),
            glory: 0,
        }
    }

    pub fn with_ring_increase(mut self, ring: impl Into<RingRef>) -> Self {
        self.ring_increase = Some(ring.into());
        self
    }

    pub fn with_skill(mut self, skill: impl Into<SkillRef>) -> Self {
        self.skills.push(skill.into());
        self
    }

    pub fn with_glory(mut self, glory: u8) -> Self {
        self.glory = glory;
        self
    }
}
