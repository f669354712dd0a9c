//! Catalog content, institutions, and the character record.

mod catalog;
mod character;
mod character_trait;
mod clan;
mod equipment;
mod ring;
mod school;
mod skill;
mod technique;
mod title;

pub use catalog::{ContentCatalog, Institution};
pub use character::{CharacterRecord, LearningList, SOCIAL_STAT_MAX};
pub use character_trait::{CharacterTrait, CustomTrait, TraitEntry, TraitType};
pub use clan::{Clan, Family};
pub use equipment::{Equipment, EquipmentEntry, Quality};
pub use ring::{Ring, RingValues, STANDARD_RING_REFS};
pub use school::School;
pub use skill::Skill;
pub use technique::{Ability, ActivationKind, Technique, TechniqueGroup, UNRANKED};
pub use title::{SocialStat, StatAward, Title};
