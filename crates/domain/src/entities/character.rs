//! The persisted character record.
//!
//! Everything here is replay input or session bookkeeping; derived state
//! (ranks reached, classification sets) is never stored on the record.
//! The learning lists are append-only: entries are never edited or removed,
//! only whole lists are cleared by a full reset.

use serde::{Deserialize, Serialize};

use std::collections::BTreeMap;

use super::character_trait::TraitEntry;
use super::equipment::EquipmentEntry;
use super::ring::RingValues;
use super::title::{SocialStat, StatAward};
use crate::error::DomainError;
use crate::refs::{ClanRef, CurriculumRef, FamilyRef, SchoolRef, SkillRef, TechRef};
use crate::value_objects::LearningEntry;

/// Honor, glory and status live on a 0-100 scale.
pub const SOCIAL_STAT_MAX: u8 = 100;

/// One curriculum's ordered acquisition log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningList {
    pub curriculum: CurriculumRef,
    #[serde(default)]
    pub entries: Vec<LearningEntry>,
}

impl LearningList {
    pub fn new(curriculum: impl Into<CurriculumRef>) -> Self {
        Self {
            curriculum: curriculum.into(),
            entries: Vec::new(),
        }
    }
}

/// The persisted character document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterRecord {
    // Identity
    pub personal_name: String,
    pub clan_ref: ClanRef,
    pub family_ref: FamilyRef,
    pub school_ref: SchoolRef,

    // Narrative
    #[serde(default)]
    pub appearance: String,
    #[serde(default)]
    pub giri: String,
    #[serde(rename = "ninjō", default)]
    pub ninjo: String,
    #[serde(default)]
    pub relationships: String,
    #[serde(default)]
    pub personality: String,

    // Creation grants (cost-free; replay seeds)
    #[serde(default)]
    pub trait_data: Vec<TraitEntry>,
    #[serde(rename = "startingRingsObj", default)]
    pub starting_rings: RingValues,
    #[serde(rename = "startingSkillsObj", default)]
    pub starting_skills: BTreeMap<SkillRef, u8>,
    #[serde(default)]
    pub starting_tech_refs: Vec<TechRef>,
    #[serde(default)]
    pub equipment_data: Vec<EquipmentEntry>,

    // Experience
    #[serde(default)]
    pub received_xp: u32,
    /// School first, then titles in acquisition order. Replay order.
    #[serde(default)]
    pub learning_lists: Vec<LearningList>,

    // Session counters
    #[serde(default)]
    pub honor: u8,
    #[serde(default)]
    pub glory: u8,
    #[serde(default)]
    pub status: u8,
    #[serde(default)]
    pub fatigue: u32,
    #[serde(default)]
    pub strife: u32,
    #[serde(default)]
    pub void_points: u8,
}

impl CharacterRecord {
    pub fn new(
        personal_name: impl Into<String>,
        clan_ref: impl Into<ClanRef>,
        family_ref: impl Into<FamilyRef>,
        school_ref: impl Into<SchoolRef>,
    ) -> Self {
        let school_ref = school_ref.into();
        Self {
            personal_name: personal_name.into(),
            clan_ref: clan_ref.into(),
            family_ref: family_ref.into(),
            school_ref: school_ref.clone(),
            appearance: String::new(),
            giri: String::new(),
            ninjo: String::new(),
            relationships: String::new(),
            personality: String::new(),
            trait_data: Vec::new(),
            starting_rings: RingValues::default(),
            starting_skills: BTreeMap::new(),
            starting_tech_refs: Vec::new(),
            equipment_data: Vec::new(),
            received_xp: 0,
            learning_lists: vec![LearningList::new(CurriculumRef::from(school_ref))],
            honor: 0,
            glory: 0,
            status: 0,
            fatigue: 0,
            strife: 0,
            void_points: 0,
        }
    }

    /// Document-store key for this character.
    pub fn document_key(&self) -> String {
        format!("characters/{}_{}", self.family_ref, self.personal_name)
    }

    /// The school's curriculum ref (always the first learning list).
    pub fn school_curriculum(&self) -> CurriculumRef {
        self.school_ref.clone().into()
    }

    // -------------------------------------------------------------------------
    // Learning log
    // -------------------------------------------------------------------------

    /// Open a learning list for a newly acquired curriculum.
    pub fn register_curriculum(
        &mut self,
        curriculum: impl Into<CurriculumRef>,
    ) -> Result<(), DomainError> {
        let curriculum = curriculum.into();
        if self.learning_list(&curriculum).is_some() {
            return Err(DomainError::constraint(format!(
                "curriculum already registered: {curriculum}"
            )));
        }
        self.learning_lists.push(LearningList::new(curriculum));
        Ok(())
    }

    pub fn learning_list(&self, curriculum: &CurriculumRef) -> Option<&LearningList> {
        self.learning_lists
            .iter()
            .find(|list| &list.curriculum == curriculum)
    }

    /// Append one entry to a registered curriculum's log. The only mutation
    /// primitive for the log.
    pub fn append_learning(
        &mut self,
        curriculum: &CurriculumRef,
        entry: LearningEntry,
    ) -> Result<(), DomainError> {
        let list = self
            .learning_lists
            .iter_mut()
            .find(|list| &list.curriculum == curriculum)
            .ok_or_else(|| {
                DomainError::constraint(format!("curriculum not registered: {curriculum}"))
            })?;
        list.entries.push(entry);
        Ok(())
    }

    /// Remove the most recent entry of a curriculum's log. Exists solely so a
    /// failed mutate-then-recompute can roll back; callers never edit history.
    pub fn pop_learning(&mut self, curriculum: &CurriculumRef) -> Option<LearningEntry> {
        self.learning_lists
            .iter_mut()
            .find(|list| &list.curriculum == curriculum)
            .and_then(|list| list.entries.pop())
    }

    /// Full reset: every per-curriculum log is cleared (the partitions stay
    /// registered).
    pub fn reset_learning(&mut self) {
        for list in &mut self.learning_lists {
            list.entries.clear();
        }
    }

    // -------------------------------------------------------------------------
    // Clamped session counters
    // -------------------------------------------------------------------------

    /// Set honor, clamped to [0, 100]. Returns the stored value.
    pub fn set_honor(&mut self, value: i32) -> u8 {
        self.honor = clamp_social(value);
        self.honor
    }

    /// Set glory, clamped to [0, 100]. Returns the stored value.
    pub fn set_glory(&mut self, value: i32) -> u8 {
        self.glory = clamp_social(value);
        self.glory
    }

    /// Set status, clamped to [0, 100]. Returns the stored value.
    pub fn set_status(&mut self, value: i32) -> u8 {
        self.status = clamp_social(value);
        self.status
    }

    /// Set fatigue, clamped to >= 0. Returns the stored value.
    pub fn set_fatigue(&mut self, value: i32) -> u32 {
        self.fatigue = value.max(0) as u32;
        self.fatigue
    }

    /// Set strife, clamped to >= 0. Returns the stored value.
    pub fn set_strife(&mut self, value: i32) -> u32 {
        self.strife = value.max(0) as u32;
        self.strife
    }

    /// Set void points, clamped to [0, void_rank]. The ceiling is the
    /// character's current void-ring rank, which only the caller holding
    /// derived state knows.
    pub fn set_void_points(&mut self, value: i32, void_rank: u8) -> u8 {
        self.void_points = value.clamp(0, i32::from(void_rank)) as u8;
        self.void_points
    }

    pub fn social_stat(&self, stat: SocialStat) -> u8 {
        match stat {
            SocialStat::Honor => self.honor,
            SocialStat::Glory => self.glory,
            SocialStat::Status => self.status,
        }
    }

    /// Apply a title's one-time stat change.
    ///
    /// The award's limit caps the movement in the award's own direction only:
    /// a character already beyond the limit is left where they are rather
    /// than pulled back to it.
    pub fn apply_social_award(&mut self, award: &StatAward) -> u8 {
        let current = i32::from(self.social_stat(award.stat));
        let target = current + award.amount;
        let bounded = match award.limit {
            Some(limit) => {
                let limit = i32::from(limit);
                if award.amount >= 0 {
                    target.min(limit.max(current))
                } else {
                    target.max(limit.min(current))
                }
            }
            None => target,
        };
        match award.stat {
            SocialStat::Honor => self.set_honor(bounded),
            SocialStat::Glory => self.set_glory(bounded),
            SocialStat::Status => self.set_status(bounded),
        }
    }
}

fn clamp_social(value: i32) -> u8 {
    value.clamp(0, i32::from(SOCIAL_STAT_MAX)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::{ContentKind, LearningEntry};

    fn character() -> CharacterRecord {
        CharacterRecord::new("Ayame", "phoenix", "kitsune", "shrine-keeper")
    }

    #[test]
    fn new_character_registers_school_curriculum() {
        let character = character();
        assert_eq!(character.learning_lists.len(), 1);
        assert_eq!(
            character.learning_lists[0].curriculum,
            CurriculumRef::new("shrine-keeper")
        );
    }

    #[test]
    fn document_key_uses_family_and_personal_name() {
        assert_eq!(character().document_key(), "characters/kitsune_Ayame");
    }

    #[test]
    fn append_requires_registered_curriculum() {
        let mut character = character();
        let entry = LearningEntry::normal(ContentKind::Skill, "courtesy");

        let missing = CurriculumRef::new("emerald-magistrate");
        assert!(character.append_learning(&missing, entry.clone()).is_err());

        let school = character.school_curriculum();
        character
            .append_learning(&school, entry)
            .expect("append to school list");
        assert_eq!(character.learning_lists[0].entries.len(), 1);
    }

    #[test]
    fn register_rejects_duplicates() {
        let mut character = character();
        character
            .register_curriculum(CurriculumRef::new("emerald-magistrate"))
            .expect("register title");
        assert!(character
            .register_curriculum(CurriculumRef::new("emerald-magistrate"))
            .is_err());
    }

    #[test]
    fn reset_clears_entries_but_keeps_partitions() {
        let mut character = character();
        let school = character.school_curriculum();
        character
            .append_learning(&school, LearningEntry::normal(ContentKind::Ring, "void"))
            .expect("append");
        character
            .register_curriculum(CurriculumRef::new("emerald-magistrate"))
            .expect("register");

        character.reset_learning();

        assert_eq!(character.learning_lists.len(), 2);
        assert!(character.learning_lists.iter().all(|l| l.entries.is_empty()));
    }

    #[test]
    fn social_setters_clamp_to_bounds() {
        let mut character = character();
        assert_eq!(character.set_honor(150), 100);
        assert_eq!(character.set_honor(-5), 0);
        assert_eq!(character.set_glory(42), 42);
        assert_eq!(character.set_status(101), 100);
    }

    #[test]
    fn fatigue_and_strife_clamp_to_zero() {
        let mut character = character();
        assert_eq!(character.set_fatigue(-3), 0);
        assert_eq!(character.set_fatigue(7), 7);
        assert_eq!(character.set_strife(-1), 0);
    }

    #[test]
    fn void_points_clamp_to_void_rank() {
        let mut character = character();
        assert_eq!(character.set_void_points(5, 3), 3);
        assert_eq!(character.set_void_points(-1, 3), 0);
        assert_eq!(character.set_void_points(2, 3), 2);
    }

    #[test]
    fn award_respects_limit_in_its_direction() {
        let mut character = character();
        character.set_glory(58);
        let award = StatAward::new(SocialStat::Glory, 5).with_limit(60);
        assert_eq!(character.apply_social_award(&award), 60);
    }

    #[test]
    fn award_never_pulls_back_past_an_exceeded_limit() {
        let mut character = character();
        character.set_glory(70);
        let award = StatAward::new(SocialStat::Glory, 5).with_limit(60);
        // Already beyond the cap: the award fizzles, but never reduces.
        assert_eq!(character.apply_social_award(&award), 70);

        character.set_honor(20);
        let penalty = StatAward::new(SocialStat::Honor, -10).with_limit(30);
        // Already below the floor: stays put.
        assert_eq!(character.apply_social_award(&penalty), 20);
    }

    #[test]
    fn negative_award_clamps_at_floor() {
        let mut character = character();
        character.set_status(35);
        let penalty = StatAward::new(SocialStat::Status, -10).with_limit(30);
        assert_eq!(character.apply_social_award(&penalty), 30);
    }

    #[test]
    fn round_trips_through_json() {
        let mut character = character();
        character.set_honor(45);
        character.starting_skills.insert("courtesy".into(), 1);
        let school = character.school_curriculum();
        character
            .append_learning(&school, LearningEntry::free(ContentKind::Skill, "courtesy"))
            .expect("append");

        let json = serde_json::to_string(&character).expect("serialize");
        let back: CharacterRecord = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, character);
    }
}
