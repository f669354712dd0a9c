//! Output of the character-creation questionnaire.
//!
//! The wizard UI itself lives elsewhere; what arrives here is the finished
//! set of choices, validated and folded into a fresh [`CharacterRecord`].

use serde::{Deserialize, Serialize};

use crate::entities::{CharacterRecord, ContentCatalog, EquipmentEntry, TraitEntry};
use crate::error::DomainError;
use crate::refs::{ClanRef, FamilyRef, SchoolRef, SkillRef};

/// Everything the creation questionnaire collects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterCreation {
    pub personal_name: String,
    pub clan_ref: ClanRef,
    pub family_ref: FamilyRef,
    pub school_ref: SchoolRef,

    #[serde(default)]
    pub appearance: String,
    #[serde(default)]
    pub giri: String,
    #[serde(default)]
    pub ninjo: String,
    #[serde(default)]
    pub relationships: String,
    #[serde(default)]
    pub personality: String,

    /// Free skill picks offered by the questionnaire, one bump each
    #[serde(default)]
    pub skill_choices: Vec<SkillRef>,
    #[serde(default)]
    pub trait_picks: Vec<TraitEntry>,
    #[serde(default)]
    pub equipment_picks: Vec<EquipmentEntry>,
}

impl CharacterCreation {
    pub fn new(
        personal_name: impl Into<String>,
        clan_ref: impl Into<ClanRef>,
        family_ref: impl Into<FamilyRef>,
        school_ref: impl Into<SchoolRef>,
    ) -> Self {
        Self {
            personal_name: personal_name.into(),
            clan_ref: clan_ref.into(),
            family_ref: family_ref.into(),
            school_ref: school_ref.into(),
            appearance: String::new(),
            giri: String::new(),
            ninjo: String::new(),
            relationships: String::new(),
            personality: String::new(),
            skill_choices: Vec::new(),
            trait_picks: Vec::new(),
            equipment_picks: Vec::new(),
        }
    }

    pub fn with_skill_choice(mut self, skill: impl Into<SkillRef>) -> Self {
        self.skill_choices.push(skill.into());
        self
    }

    /// Validate the choices against the catalog and build the record: rings
    /// start at 1 and take the clan/family/school increases, granted skills
    /// start at 1 (choices stack), the school's techniques are known from the
    /// start, and honor/glory/status come from school, family and clan.
    pub fn build(&self, catalog: &ContentCatalog) -> Result<CharacterRecord, DomainError> {
        if self.personal_name.trim().is_empty() {
            return Err(DomainError::validation("personal name cannot be empty"));
        }

        let clan = catalog.clan(&self.clan_ref)?;
        let family = catalog.family(&self.family_ref)?;
        let school = catalog.school(&self.school_ref)?;
        if family.clan != self.clan_ref {
            return Err(DomainError::validation(format!(
                "family {} does not belong to clan {}",
                self.family_ref, self.clan_ref
            )));
        }

        let mut character = CharacterRecord::new(
            self.personal_name.clone(),
            self.clan_ref.clone(),
            self.family_ref.clone(),
            self.school_ref.clone(),
        );
        character.appearance = self.appearance.clone();
        character.giri = self.giri.clone();
        character.ninjo = self.ninjo.clone();
        character.relationships = self.relationships.clone();
        character.personality = self.personality.clone();
        character.trait_data = self.trait_picks.clone();
        character.equipment_data = self.equipment_picks.clone();

        // Rings: base 1, plus one from clan and family, plus school increases.
        if let Some(ring) = &clan.ring_increase {
            catalog.ring(ring)?;
            character.starting_rings.bump(ring);
        }
        if let Some(ring) = &family.ring_increase {
            catalog.ring(ring)?;
            character.starting_rings.bump(ring);
        }
        for (ring_ref, increase) in school.ring_increases.pairs() {
            if increase > 0 {
                let rank = character
                    .starting_rings
                    .get(&ring_ref)
                    .unwrap_or(1);
                character.starting_rings.set(&ring_ref, rank + increase);
            }
        }

        // Skills: every grant and choice bumps by one, starting from zero.
        let mut grant = |skill_ref: &SkillRef| -> Result<(), DomainError> {
            catalog.skill(skill_ref)?;
            *character.starting_skills.entry(skill_ref.clone()).or_insert(0) += 1;
            Ok(())
        };
        if let Some(skill) = &clan.skill_increase {
            grant(skill)?;
        }
        for skill in &family.skills {
            grant(skill)?;
        }
        for skill in &school.starting_skills {
            grant(skill)?;
        }
        for skill in &self.skill_choices {
            grant(skill)?;
        }

        for tech in &school.starting_techniques {
            catalog.technique(tech)?;
            character.starting_tech_refs.push(tech.clone());
        }

        character.set_honor(i32::from(school.honor));
        character.set_glory(i32::from(family.glory));
        character.set_status(i32::from(clan.status));

        Ok(character)
    }
}
