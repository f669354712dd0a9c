//! SheetBldr domain types.
//!
//! Pure data and invariants: the content catalog, the character record with
//! its append-only learning log, curricula, and the parsed ref-string wire
//! formats. No I/O and no async here; the engine crate drives these types.

pub mod entities;
pub mod error;
pub mod refs;
pub mod value_objects;

pub use entities::{
    Ability, ActivationKind, CharacterRecord, CharacterTrait, Clan, ContentCatalog, CustomTrait,
    Equipment, EquipmentEntry, Family, Institution, LearningList, Quality, Ring, RingValues,
    School, Skill, SocialStat, StatAward, Technique, TechniqueGroup, Title, TraitEntry, TraitType,
    SOCIAL_STAT_MAX, STANDARD_RING_REFS, UNRANKED,
};

pub use error::DomainError;

pub use refs::{
    ClanRef, CurriculumRef, FamilyRef, GroupRef, ItemRef, QualityRef, RingRef, SchoolRef, SkillRef,
    TechRef, TitleRef, TraitRef,
};

pub use value_objects::{
    CharacterCreation, ContentKind, Curriculum, CurriculumEntry, CurriculumRank, LearningEntry,
    LearningTag, RefParseError,
};
