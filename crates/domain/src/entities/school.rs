//! Schools: the first institution every character belongs to.

use serde::{Deserialize, Serialize};

use super::ring::RingValues;
use super::technique::{Ability, TechniqueGroup};
use crate::refs::{ClanRef, CurriculumRef, SchoolRef, SkillRef, TechRef};
use crate::value_objects::Curriculum;

/// A school, owning the character's first curriculum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct School {
    #[serde(rename = "ref", default)]
    pub school_ref: SchoolRef,
    pub name: String,
    #[serde(default)]
    pub clan: Option<ClanRef>,
    /// Starting honor for students of this school
    #[serde(default)]
    pub honor: u8,
    /// Technique groups members may learn outside the curriculum
    #[serde(default)]
    pub technique_groups: Vec<TechniqueGroup>,
    /// Ring increases applied at creation (deltas on the base of 1)
    #[serde(default = "RingValues::zero")]
    pub ring_increases: RingValues,
    /// Skills granted at rank 1 during creation
    #[serde(default)]
    pub starting_skills: Vec<SkillRef>,
    /// Techniques known from day one
    #[serde(default)]
    pub starting_techniques: Vec<TechRef>,
    /// Granted immediately on joining; synthesized as a rank-1 school ability
    pub initial_ability: Ability,
    /// Granted when the curriculum completes; synthesized as a rank-6 mastery
    /// ability
    pub mastery_ability: Ability,
    #[serde(default)]
    pub curriculum: Curriculum,
}

impl School {
    pub fn new(
        school_ref: impl Into<SchoolRef>,
        name: impl Into<String>,
        initial_ability: Ability,
        mastery_ability: Ability,
    ) -> Self {
        Self {
            school_ref: school_ref.into(),
            name: name.into(),
            clan: None,
            honor: 0,
            technique_groups: Vec::new(),
            ring_increases: RingValues::zero(),
            starting_skills: Vec::new(),
            starting_techniques: Vec::new(),
            initial_ability,
            mastery_ability,
            curriculum: Curriculum::default(),
        }
    }

    pub fn with_clan(mut self, clan: impl Into<ClanRef>) -> Self {
        self.clan = Some(clan.into());
        self
    }

    pub fn with_honor(mut self, honor: u8) -> Self {
        self.honor = honor;
        self
    }

    pub fn with_technique_group(mut self, group: TechniqueGroup) -> Self {
        self.technique_groups.push(group);
        self
    }

    pub fn with_ring_increases(mut self, increases: RingValues) -> Self {
        self.ring_increases = increases;
        self
    }

    pub fn with_starting_skill(mut self, skill: impl Into<SkillRef>) -> Self {
        self.starting_skills.push(skill.into());
        self
    }

    pub fn with_starting_technique(mut self, tech: impl Into<TechRef>) -> Self {
        self.starting_techniques.push(tech.into());
        self
    }

    pub fn with_curriculum(mut self, curriculum: Curriculum) -> Self {
        self.curriculum = curriculum;
        self
    }

    pub fn curriculum_ref(&self) -> CurriculumRef {
        self.school_ref.clone().into()
    }

    /// Whether this school's out-of-curriculum list covers the group.
    pub fn allows_group(&self, group: TechniqueGroup) -> bool {
        self.technique_groups.contains(&group)
    }
}
