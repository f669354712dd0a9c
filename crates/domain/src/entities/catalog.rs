//! The content catalog: immutable per-session reference data.
//!
//! Loaded once per session (per language) and then only read. The one
//! mutation is [`ContentCatalog::finalize`], which synthesizes school/title
//! abilities into the technique universe and computes the derived technique
//! fields. Run it exactly once, after the last section is inserted.

use std::collections::BTreeMap;

use super::character_trait::CharacterTrait;
use super::clan::{Clan, Family};
use super::equipment::{Equipment, Quality};
use super::ring::Ring;
use super::school::School;
use super::skill::Skill;
use super::technique::{Ability, Technique, TechniqueGroup, UNRANKED};
use super::title::Title;
use crate::error::DomainError;
use crate::refs::{
    ClanRef, CurriculumRef, FamilyRef, GroupRef, ItemRef, QualityRef, RingRef, SchoolRef, SkillRef,
    TechRef, TitleRef, TraitRef,
};
use crate::value_objects::Curriculum;

/// Anything owning a curriculum: a school or a title.
#[derive(Debug, Clone, Copy)]
pub enum Institution<'a> {
    School(&'a School),
    Title(&'a Title),
}

impl<'a> Institution<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            Self::School(school) => &school.name,
            Self::Title(title) => &title.name,
        }
    }

    pub fn curriculum(&self) -> &'a Curriculum {
        match self {
            Self::School(school) => &school.curriculum,
            Self::Title(title) => &title.curriculum,
        }
    }

    /// Granted the moment the institution is joined.
    pub fn initial_ability(&self) -> &'a Ability {
        match self {
            Self::School(school) => &school.initial_ability,
            Self::Title(title) => &title.initial_effect,
        }
    }

    /// Granted when the curriculum completes.
    pub fn final_ability(&self) -> &'a Ability {
        match self {
            Self::School(school) => &school.mastery_ability,
            Self::Title(title) => &title.final_ability,
        }
    }

    pub fn is_school(&self) -> bool {
        matches!(self, Self::School(_))
    }
}

/// All reference data for one session, keyed by ref
#[derive(Debug, Clone, Default)]
pub struct ContentCatalog {
    rings: BTreeMap<RingRef, Ring>,
    skills: BTreeMap<SkillRef, Skill>,
    techniques: BTreeMap<TechRef, Technique>,
    traits: BTreeMap<TraitRef, CharacterTrait>,
    equipment: BTreeMap<ItemRef, Equipment>,
    qualities: BTreeMap<QualityRef, Quality>,
    schools: BTreeMap<SchoolRef, School>,
    titles: BTreeMap<TitleRef, Title>,
    clans: BTreeMap<ClanRef, Clan>,
    families: BTreeMap<FamilyRef, Family>,
}

impl ContentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Section insertion (used by the content loader and test fixtures)
    // -------------------------------------------------------------------------

    pub fn insert_ring(&mut self, ring: Ring) {
        self.rings.insert(ring.ring_ref.clone(), ring);
    }

    pub fn insert_skill(&mut self, skill: Skill) {
        self.skills.insert(skill.skill_ref.clone(), skill);
    }

    pub fn insert_technique(&mut self, technique: Technique) {
        self.techniques.insert(technique.tech_ref.clone(), technique);
    }

    pub fn insert_trait(&mut self, entry: CharacterTrait) {
        self.traits.insert(entry.trait_ref.clone(), entry);
    }

    pub fn insert_equipment(&mut self, item: Equipment) {
        self.equipment.insert(item.item_ref.clone(), item);
    }

    pub fn insert_quality(&mut self, quality: Quality) {
        self.qualities.insert(quality.quality_ref.clone(), quality);
    }

    pub fn insert_school(&mut self, school: School) {
        self.schools.insert(school.school_ref.clone(), school);
    }

    pub fn insert_title(&mut self, title: Title) {
        self.titles.insert(title.title_ref.clone(), title);
    }

    pub fn insert_clan(&mut self, clan: Clan) {
        self.clans.insert(clan.clan_ref.clone(), clan);
    }

    pub fn insert_family(&mut self, family: Family) {
        self.families.insert(family.family_ref.clone(), family);
    }

    /// Synthesize institution abilities into the technique universe and
    /// compute every technique's derived fields.
    pub fn finalize(&mut self) {
        let mut synthesized: Vec<Technique> = Vec::new();
        for school in self.schools.values() {
            synthesized.push(
                school
                    .initial_ability
                    .to_technique(TechniqueGroup::SchoolAbility, 1),
            );
            synthesized.push(
                school
                    .mastery_ability
                    .to_technique(TechniqueGroup::MasteryAbility, 6),
            );
        }
        for title in self.titles.values() {
            synthesized.push(
                title
                    .initial_effect
                    .to_technique(TechniqueGroup::TitleEffect, UNRANKED),
            );
            synthesized.push(
                title
                    .final_ability
                    .to_technique(TechniqueGroup::TitleAbility, UNRANKED),
            );
        }
        for tech in synthesized {
            self.insert_technique(tech);
        }

        for tech in self.techniques.values_mut() {
            tech.finalize();
        }
    }

    // -------------------------------------------------------------------------
    // Lookups
    // -------------------------------------------------------------------------

    pub fn ring(&self, ring_ref: &RingRef) -> Result<&Ring, DomainError> {
        self.rings
            .get(ring_ref)
            .ok_or_else(|| DomainError::unknown_ref("ring", ring_ref.as_str()))
    }

    pub fn skill(&self, skill_ref: &SkillRef) -> Result<&Skill, DomainError> {
        self.skills
            .get(skill_ref)
            .ok_or_else(|| DomainError::unknown_ref("skill", skill_ref.as_str()))
    }

    pub fn technique(&self, tech_ref: &TechRef) -> Result<&Technique, DomainError> {
        self.techniques
            .get(tech_ref)
            .ok_or_else(|| DomainError::unknown_ref("technique", tech_ref.as_str()))
    }

    pub fn trait_item(&self, trait_ref: &TraitRef) -> Result<&CharacterTrait, DomainError> {
        self.traits
            .get(trait_ref)
            .ok_or_else(|| DomainError::unknown_ref("trait", trait_ref.as_str()))
    }

    pub fn equipment_item(&self, item_ref: &ItemRef) -> Result<&Equipment, DomainError> {
        self.equipment
            .get(item_ref)
            .ok_or_else(|| DomainError::unknown_ref("equipment", item_ref.as_str()))
    }

    pub fn quality(&self, quality_ref: &QualityRef) -> Result<&Quality, DomainError> {
        self.qualities
            .get(quality_ref)
            .ok_or_else(|| DomainError::unknown_ref("quality", quality_ref.as_str()))
    }

    pub fn school(&self, school_ref: &SchoolRef) -> Result<&School, DomainError> {
        self.schools
            .get(school_ref)
            .ok_or_else(|| DomainError::unknown_ref("school", school_ref.as_str()))
    }

    pub fn title(&self, title_ref: &TitleRef) -> Result<&Title, DomainError> {
        self.titles
            .get(title_ref)
            .ok_or_else(|| DomainError::unknown_ref("title", title_ref.as_str()))
    }

    pub fn clan(&self, clan_ref: &ClanRef) -> Result<&Clan, DomainError> {
        self.clans
            .get(clan_ref)
            .ok_or_else(|| DomainError::unknown_ref("clan", clan_ref.as_str()))
    }

    pub fn family(&self, family_ref: &FamilyRef) -> Result<&Family, DomainError> {
        self.families
            .get(family_ref)
            .ok_or_else(|| DomainError::unknown_ref("family", family_ref.as_str()))
    }

    /// Resolve a curriculum ref to the school or title owning it.
    pub fn institution(&self, curriculum_ref: &CurriculumRef) -> Option<Institution<'_>> {
        let as_school = SchoolRef::new(curriculum_ref.as_str());
        if let Some(school) = self.schools.get(&as_school) {
            return Some(Institution::School(school));
        }
        let as_title = TitleRef::new(curriculum_ref.as_str());
        self.titles.get(&as_title).map(Institution::Title)
    }

    // -------------------------------------------------------------------------
    // Iteration and group queries
    // -------------------------------------------------------------------------

    pub fn rings(&self) -> impl Iterator<Item = &Ring> {
        self.rings.values()
    }

    pub fn skills(&self) -> impl Iterator<Item = &Skill> {
        self.skills.values()
    }

    pub fn techniques(&self) -> impl Iterator<Item = &Technique> {
        self.techniques.values()
    }

    pub fn traits(&self) -> impl Iterator<Item = &CharacterTrait> {
        self.traits.values()
    }

    pub fn equipment(&self) -> impl Iterator<Item = &Equipment> {
        self.equipment.values()
    }

    pub fn schools(&self) -> impl Iterator<Item = &School> {
        self.schools.values()
    }

    pub fn titles(&self) -> impl Iterator<Item = &Title> {
        self.titles.values()
    }

    pub fn clans(&self) -> impl Iterator<Item = &Clan> {
        self.clans.values()
    }

    pub fn families(&self) -> impl Iterator<Item = &Family> {
        self.families.values()
    }

    /// Every skill belonging to the named group (the `SG:` expression).
    pub fn skills_in_group<'a>(&'a self, group: &'a GroupRef) -> impl Iterator<Item = &'a Skill> {
        self.skills.values().filter(move |skill| &skill.group == group)
    }

    /// Techniques matching a `TG:` expression for a character of the given
    /// clan: group and rank always filter, ring only when present, and
    /// clan-restricted techniques only match that clan.
    pub fn techniques_matching<'a>(
        &'a self,
        ring: Option<&'a RingRef>,
        group: &'a GroupRef,
        max_rank: u8,
        clan: Option<&'a ClanRef>,
    ) -> impl Iterator<Item = &'a Technique> {
        self.techniques.values().filter(move |tech| {
            tech.group.as_str() == group.as_str()
                && tech.rank <= max_rank
                && ring.is_none_or(|ring| tech.ring.as_ref() == Some(ring))
                && tech.allowed_for_clan(clan)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_with_school() -> ContentCatalog {
        let mut catalog = ContentCatalog::new();
        catalog.insert_school(School::new(
            "shrine-keeper",
            "Shrine Keeper",
            Ability::new("blessing", "Blessing").with_effect("Invoke the water kami"),
            Ability::new("grand-blessing", "Grand Blessing"),
        ));
        catalog.insert_title(Title::new(
            "emerald-magistrate",
            "Emerald Magistrate",
            Ability::new("jurisdiction", "Jurisdiction"),
            Ability::new("emerald-edict", "Emerald Edict"),
        ));
        catalog
    }

    #[test]
    fn finalize_synthesizes_institution_abilities() {
        let mut catalog = catalog_with_school();
        catalog.finalize();

        let initial = catalog.technique(&TechRef::new("blessing")).expect("blessing");
        assert_eq!(initial.group, TechniqueGroup::SchoolAbility);
        assert_eq!(initial.rank, 1);

        let mastery = catalog
            .technique(&TechRef::new("grand-blessing"))
            .expect("grand-blessing");
        assert_eq!(mastery.group, TechniqueGroup::MasteryAbility);
        assert_eq!(mastery.rank, 6);

        let effect = catalog
            .technique(&TechRef::new("jurisdiction"))
            .expect("jurisdiction");
        assert_eq!(effect.group, TechniqueGroup::TitleEffect);
        assert_eq!(effect.rank, UNRANKED);

        let ability = catalog
            .technique(&TechRef::new("emerald-edict"))
            .expect("emerald-edict");
        assert_eq!(ability.group, TechniqueGroup::TitleAbility);
        assert_eq!(ability.rank, UNRANKED);
    }

    #[test]
    fn finalize_derives_technique_fields_for_synthesized_abilities() {
        let mut catalog = catalog_with_school();
        catalog.finalize();
        let initial = catalog.technique(&TechRef::new("blessing")).expect("blessing");
        // Ring inferred from the ability's effect text; no activation text,
        // no activation tags.
        assert_eq!(initial.ring, Some(RingRef::new("water")));
        assert!(initial.activation_set.is_empty());
    }

    #[test]
    fn institution_resolves_schools_before_titles() {
        let mut catalog = catalog_with_school();
        catalog.finalize();

        let school = catalog
            .institution(&CurriculumRef::new("shrine-keeper"))
            .expect("school institution");
        assert!(school.is_school());

        let title = catalog
            .institution(&CurriculumRef::new("emerald-magistrate"))
            .expect("title institution");
        assert!(!title.is_school());

        assert!(catalog.institution(&CurriculumRef::new("nonexistent")).is_none());
    }

    #[test]
    fn techniques_matching_filters_ring_rank_and_clan() {
        let mut catalog = ContentCatalog::new();
        catalog.insert_technique(
            Technique::new("water-kata", "Water Kata", TechniqueGroup::Kata)
                .with_rank(2)
                .with_ring("water"),
        );
        catalog.insert_technique(
            Technique::new("fire-kata", "Fire Kata", TechniqueGroup::Kata)
                .with_rank(2)
                .with_ring("fire"),
        );
        catalog.insert_technique(
            Technique::new("deep-kata", "Deep Kata", TechniqueGroup::Kata)
                .with_rank(5)
                .with_ring("water"),
        );
        catalog.insert_technique(
            Technique::new("crane-kata", "Crane Kata", TechniqueGroup::Kata)
                .with_rank(1)
                .with_ring("water")
                .with_clan("crane"),
        );

        let water = RingRef::new("water");
        let kata = GroupRef::new("kata");
        let lion = ClanRef::new("lion");

        let matched: Vec<&str> = catalog
            .techniques_matching(Some(&water), &kata, 3, Some(&lion))
            .map(|t| t.tech_ref.as_str())
            .collect();
        assert_eq!(matched, vec!["water-kata"]);

        // Any ring, crane character: the clan-restricted kata now matches.
        let crane = ClanRef::new("crane");
        let matched: Vec<&str> = catalog
            .techniques_matching(None, &kata, 3, Some(&crane))
            .map(|t| t.tech_ref.as_str())
            .collect();
        assert_eq!(matched, vec!["crane-kata", "fire-kata", "water-kata"]);
    }
}
