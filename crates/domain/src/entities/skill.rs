//! Skills from the content catalog.

use serde::{Deserialize, Serialize};

use crate::refs::{GroupRef, SkillRef};

/// A skill characters can learn and raise through curriculum ranks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    #[serde(rename = "ref", default)]
    pub skill_ref: SkillRef,
    pub name: String,
    /// Skill group used by `SG:` curriculum expressions (e.g. "social")
    pub group: GroupRef,
    #[serde(default)]
    pub description: String,
}

impl Skill {
    /// Experience cost of raising a skill is this much per point of the new rank.
    pub const COST_PER_RANK: u32 = 2;
    /// Skills cannot be raised past this rank.
    pub const MAX_RANK: u8 = 5;

    pub fn new(
        skill_ref: impl Into<SkillRef>,
        name: impl Into<String>,
        group: impl Into<GroupRef>,
    ) -> Self {
        Self {
            skill_ref: skill_ref.into(),
            name: name.into(),
            group: group.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
