//! Full replay of a character's learning log.
//!
//! The log is consumed strictly in order, one curriculum at a time (school
//! first, then titles in acquisition order). Each rank of a curriculum
//! consumes entries until its cumulative threshold is met; the final rank
//! drains whatever remains. Costs always hit the spent total; curriculum
//! progress gets the full cost for in-list or forced entries and exactly half
//! otherwise, accumulated as a real number and never rounded.

use std::collections::{BTreeMap, BTreeSet};

use sheetbldr_domain::{
    CharacterRecord, ContentCatalog, ContentKind, CurriculumEntry, CurriculumRank, LearningEntry,
    LearningList, LearningTag, Ring, RingRef, Skill, SkillRef, TechRef,
};

use super::derived::{CurriculumProgress, DerivedState, SkillSets, TechniqueSets};
use super::ProgressionError;

/// Replay the whole learning log and derive the classification sets.
///
/// Fails only when the log or a curriculum references content the catalog
/// does not have; on failure no derived state is produced.
pub fn recompute(
    character: &CharacterRecord,
    catalog: &ContentCatalog,
) -> Result<DerivedState, ProgressionError> {
    Replay::seed(character, catalog)?.run()
}

struct Replay<'a> {
    character: &'a CharacterRecord,
    catalog: &'a ContentCatalog,

    ring_ranks: BTreeMap<RingRef, u8>,
    skill_ranks: BTreeMap<SkillRef, u8>,
    learned: BTreeSet<TechRef>,

    past_skills: BTreeSet<SkillRef>,
    current_skills: BTreeSet<SkillRef>,
    future_skills: BTreeSet<SkillRef>,
    past_techs: BTreeSet<TechRef>,
    current_techs: BTreeSet<TechRef>,
    future_techs: BTreeSet<TechRef>,

    spent_xp: u32,
    curricula: Vec<CurriculumProgress>,
}

impl<'a> Replay<'a> {
    /// Seed the running maps from the creation grants. The school's initial
    /// ability is granted outright before any entry is consumed.
    fn seed(
        character: &'a CharacterRecord,
        catalog: &'a ContentCatalog,
    ) -> Result<Self, ProgressionError> {
        let ring_ranks = character.starting_rings.pairs().into_iter().collect();
        let skill_ranks = character.starting_skills.clone();
        let mut learned: BTreeSet<TechRef> =
            character.starting_tech_refs.iter().cloned().collect();
        let mut past_techs = BTreeSet::new();

        let school = catalog.school(&character.school_ref).map_err(|_| {
            ProgressionError::UnknownCurriculum(character.school_ref.to_string())
        })?;
        let initial = school.initial_ability.ability_ref.clone();
        learned.insert(initial.clone());
        past_techs.insert(initial);

        Ok(Self {
            character,
            catalog,
            ring_ranks,
            skill_ranks,
            learned,
            past_skills: BTreeSet::new(),
            current_skills: BTreeSet::new(),
            future_skills: BTreeSet::new(),
            past_techs,
            current_techs: BTreeSet::new(),
            future_techs: BTreeSet::new(),
            spent_xp: 0,
            curricula: Vec::new(),
        })
    }

    fn run(mut self) -> Result<DerivedState, ProgressionError> {
        let character = self.character;
        for list in &character.learning_lists {
            self.replay_curriculum(list)?;
        }
        self.derive()
    }

    fn replay_curriculum(&mut self, list: &LearningList) -> Result<(), ProgressionError> {
        let catalog = self.catalog;
        let institution = catalog
            .institution(&list.curriculum)
            .ok_or_else(|| ProgressionError::UnknownCurriculum(list.curriculum.to_string()))?;
        let curriculum = institution.curriculum();
        let final_ability = institution.final_ability().ability_ref.clone();

        // The final ability is not learnable until the curriculum completes.
        self.future_techs.insert(final_ability.clone());

        // A title's effect is granted the moment the title is taken. The
        // school's counterpart was already granted during seeding.
        if !institution.is_school() {
            let effect = institution.initial_ability().ability_ref.clone();
            self.learned.insert(effect.clone());
            self.past_techs.insert(effect);
        }

        let mut progress = CurriculumProgress {
            curriculum: list.curriculum.clone(),
            progress_xp: 0.0,
            rank: 1,
            ranks_total: curriculum.len() as u8,
        };
        let mut previous_ranks_xp = 0.0_f64;
        let mut cursor = 0_usize;

        for (index, rank) in curriculum.ranks.iter().enumerate() {
            let is_final = index + 1 == curriculum.ranks.len();
            let (rank_skills, rank_techs) = self.resolve_rank(rank)?;
            let next_threshold = previous_ranks_xp + f64::from(rank.rank_up_cost);

            // Consume entries until the rank's threshold is met. The final
            // rank drains the rest of the log regardless of threshold math.
            while (progress.progress_xp < next_threshold || is_final)
                && cursor < list.entries.len()
            {
                self.consume(
                    &list.entries[cursor],
                    &rank_skills,
                    &rank_techs,
                    &mut progress,
                )?;
                cursor += 1;
            }

            // Classify the rank by where progress landed after consumption.
            if progress.progress_xp < previous_ranks_xp {
                self.future_skills.extend(rank_skills);
                self.future_techs.extend(rank_techs);
            } else if progress.progress_xp < next_threshold {
                self.current_skills.extend(rank_skills);
                self.current_techs.extend(rank_techs);
            } else {
                self.past_skills.extend(rank_skills);
                self.past_techs.extend(rank_techs);
                progress.rank += 1;
                if is_final {
                    self.learned.insert(final_ability.clone());
                }
            }

            previous_ranks_xp = next_threshold;
        }

        tracing::debug!(
            curriculum = %list.curriculum,
            progress_xp = progress.progress_xp,
            rank = progress.rank,
            "curriculum replayed"
        );
        self.curricula.push(progress);
        Ok(())
    }

    /// Expand one rank's content expressions into concrete skill and
    /// technique sets. Group expressions filter by the character's clan.
    fn resolve_rank(
        &self,
        rank: &CurriculumRank,
    ) -> Result<(BTreeSet<SkillRef>, BTreeSet<TechRef>), ProgressionError> {
        let clan = Some(&self.character.clan_ref);
        let mut skills = BTreeSet::new();
        let mut techs = BTreeSet::new();

        for entry in &rank.entries {
            match entry {
                CurriculumEntry::Skill(skill_ref) => {
                    self.catalog.skill(skill_ref)?;
                    skills.insert(skill_ref.clone());
                }
                CurriculumEntry::Technique(tech_ref) => {
                    self.catalog.technique(tech_ref)?;
                    techs.insert(tech_ref.clone());
                }
                CurriculumEntry::SkillGroup(group) => {
                    skills.extend(
                        self.catalog
                            .skills_in_group(group)
                            .map(|skill| skill.skill_ref.clone()),
                    );
                }
                CurriculumEntry::TechniqueGroup {
                    ring,
                    group,
                    max_rank,
                } => {
                    techs.extend(
                        self.catalog
                            .techniques_matching(ring.as_ref(), group, *max_rank, clan)
                            .map(|tech| tech.tech_ref.clone()),
                    );
                }
            }
        }
        Ok((skills, techs))
    }

    /// Apply one log entry: advance the rank/learned state, price it, and
    /// credit the curriculum.
    fn consume(
        &mut self,
        entry: &LearningEntry,
        rank_skills: &BTreeSet<SkillRef>,
        rank_techs: &BTreeSet<TechRef>,
        progress: &mut CurriculumProgress,
    ) -> Result<(), ProgressionError> {
        let cost = match entry.kind {
            ContentKind::Ring => {
                let ring_ref = RingRef::new(entry.id.clone());
                self.catalog.ring(&ring_ref)?;
                let rank = self.ring_ranks.entry(ring_ref).or_insert(0);
                *rank += 1;
                Ring::COST_PER_RANK * u32::from(*rank)
            }
            ContentKind::Skill => {
                let skill_ref = SkillRef::new(entry.id.clone());
                self.catalog.skill(&skill_ref)?;
                let rank = self.skill_ranks.entry(skill_ref).or_insert(0);
                *rank += 1;
                Skill::COST_PER_RANK * u32::from(*rank)
            }
            ContentKind::Technique => {
                let tech_ref = TechRef::new(entry.id.clone());
                let technique = self.catalog.technique(&tech_ref)?;
                let cost = technique.cost();
                self.learned.insert(tech_ref);
                cost
            }
        };

        if entry.tag == LearningTag::Free {
            return Ok(());
        }

        self.spent_xp += cost;

        let in_list = entry.tag == LearningTag::Forced
            || match entry.kind {
                ContentKind::Skill => rank_skills.contains(&SkillRef::new(entry.id.clone())),
                ContentKind::Technique => rank_techs.contains(&TechRef::new(entry.id.clone())),
                // Rings are never on a rank's list; only a forced tag earns
                // them full credit.
                ContentKind::Ring => false,
            };
        progress.progress_xp += if in_list {
            f64::from(cost)
        } else {
            f64::from(cost) / 2.0
        };
        Ok(())
    }

    /// Fold the replayed maps and rank classifications into the query sets.
    fn derive(self) -> Result<DerivedState, ProgressionError> {
        let school = self
            .catalog
            .school(&self.character.school_ref)
            .map_err(|_| {
                ProgressionError::UnknownCurriculum(self.character.school_ref.to_string())
            })?;
        let school_rank = self.curricula.first().map(|p| p.rank).unwrap_or(1);
        let clan = Some(&self.character.clan_ref);

        let upgradable_rings: BTreeMap<RingRef, u8> = self
            .ring_ranks
            .iter()
            .filter(|(_, rank)| **rank < Ring::MAX_RANK)
            .map(|(ring, rank)| (ring.clone(), *rank))
            .collect();

        let skill_rank_of =
            |skill: &SkillRef| self.skill_ranks.get(skill).copied().unwrap_or(0);
        let included_skill_refs: BTreeSet<&SkillRef> = self
            .past_skills
            .iter()
            .chain(&self.current_skills)
            .chain(&self.future_skills)
            .collect();
        let skills = SkillSets {
            learned: self
                .skill_ranks
                .iter()
                .filter(|(_, rank)| **rank > 0)
                .map(|(skill, rank)| (skill.clone(), *rank))
                .collect(),
            upgradable: self
                .skill_ranks
                .iter()
                .filter(|(_, rank)| **rank < Skill::MAX_RANK)
                .map(|(skill, rank)| (skill.clone(), *rank))
                .collect(),
            included: included_skill_refs
                .iter()
                .map(|skill| ((*skill).clone(), skill_rank_of(skill)))
                .collect(),
            current: self
                .current_skills
                .iter()
                .map(|skill| (skill.clone(), skill_rank_of(skill)))
                .collect(),
        };

        // Base compatibility comes from the school's technique groups alone;
        // current/future curriculum content widens it, learned content leaves.
        let mut base_compatible = BTreeSet::new();
        let mut base_available = BTreeSet::new();
        for tech in self.catalog.techniques() {
            if school.allows_group(tech.group) && tech.allowed_for_clan(clan) {
                base_compatible.insert(tech.tech_ref.clone());
                if tech.rank <= school_rank {
                    base_available.insert(tech.tech_ref.clone());
                }
            }
        }

        let compatible: BTreeSet<TechRef> = base_compatible
            .iter()
            .chain(&self.current_techs)
            .chain(&self.future_techs)
            .filter(|tech| !self.learned.contains(*tech))
            .cloned()
            .collect();
        let available: BTreeSet<TechRef> = base_available
            .iter()
            .chain(&self.current_techs)
            .filter(|tech| !self.learned.contains(*tech))
            .cloned()
            .collect();
        let included: BTreeSet<TechRef> = self
            .past_techs
            .iter()
            .chain(&self.current_techs)
            .chain(&self.future_techs)
            .cloned()
            .collect();
        let missable: BTreeSet<TechRef> = included
            .iter()
            .filter(|tech| !base_compatible.contains(*tech))
            .filter(|tech| {
                self.catalog
                    .technique(tech)
                    .map(|t| !t.group.is_ability())
                    .unwrap_or(false)
            })
            .cloned()
            .collect();

        let techniques = TechniqueSets {
            learned: self.learned,
            compatible,
            available,
            included,
            current: self.current_techs,
            missable,
        };

        Ok(DerivedState {
            spent_xp: self.spent_xp,
            ring_ranks: self.ring_ranks,
            skill_ranks: self.skill_ranks,
            upgradable_rings,
            curricula: self.curricula,
            skills,
            techniques,
        })
    }
}
