//! Derived state: what a replay of the learning log produces.

use std::collections::{BTreeMap, BTreeSet};

use sheetbldr_domain::{CurriculumRef, RingRef, SkillRef, TechRef};

/// Where one curriculum stands after replay
#[derive(Debug, Clone, PartialEq)]
pub struct CurriculumProgress {
    pub curriculum: CurriculumRef,
    /// Experience counted toward this curriculum's rank advancement.
    /// Fractional: out-of-list entries contribute exact halves.
    pub progress_xp: f64,
    /// Current rank, starting at 1; one past the last rank when complete
    pub rank: u8,
    /// Number of ranks in the curriculum
    pub ranks_total: u8,
}

impl CurriculumProgress {
    /// Every rank's threshold has been passed.
    pub fn is_complete(&self) -> bool {
        self.rank > self.ranks_total
    }
}

/// Skill classifications, each mapping a skill to its replayed rank
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillSets {
    /// Rank above zero
    pub learned: BTreeMap<SkillRef, u8>,
    /// Rank below the cap, so a further rank can be bought
    pub upgradable: BTreeMap<SkillRef, u8>,
    /// Named by any rank of any of the character's curricula
    pub included: BTreeMap<SkillRef, u8>,
    /// Named by a currently-active curriculum rank
    pub current: BTreeMap<SkillRef, u8>,
}

/// Technique classifications driving the filtered catalog views
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TechniqueSets {
    /// Known: bought, granted at creation, or granted by an institution
    pub learned: BTreeSet<TechRef>,
    /// Learnable in principle: the school's technique groups plus anything a
    /// current or future curriculum rank names, minus what is already known
    pub compatible: BTreeSet<TechRef>,
    /// Learnable right now: compatible and within the school rank, or named
    /// by a current curriculum rank, minus what is already known
    pub available: BTreeSet<TechRef>,
    /// Named by any rank of any of the character's curricula
    pub included: BTreeSet<TechRef>,
    /// Named by a currently-active curriculum rank (not filtered by learned)
    pub current: BTreeSet<TechRef>,
    /// In a curriculum but outside the school's groups: skipping past the
    /// rank loses easy access. Auto-granted abilities are never missable.
    pub missable: BTreeSet<TechRef>,
}

/// Everything the replay derives. Rebuilt in full; handed to callers by
/// shared reference, so reads cannot outlive a recompute.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedState {
    /// Total experience spent, across all curricula
    pub spent_xp: u32,
    /// Replayed ring ranks
    pub ring_ranks: BTreeMap<RingRef, u8>,
    /// Replayed skill ranks (only skills that appeared somewhere)
    pub skill_ranks: BTreeMap<SkillRef, u8>,
    /// Rings below the cap, with their current rank
    pub upgradable_rings: BTreeMap<RingRef, u8>,
    /// One entry per curriculum, in replay order (school first)
    pub curricula: Vec<CurriculumProgress>,
    pub skills: SkillSets,
    pub techniques: TechniqueSets,
}

impl DerivedState {
    pub fn curriculum(&self, curriculum: &CurriculumRef) -> Option<&CurriculumProgress> {
        self.curricula.iter().find(|p| &p.curriculum == curriculum)
    }

    /// The school curriculum's rank (the school is always replayed first).
    pub fn school_rank(&self) -> u8 {
        self.curricula.first().map(|p| p.rank).unwrap_or(1)
    }

    pub fn ring_rank(&self, ring: &RingRef) -> u8 {
        self.ring_ranks.get(ring).copied().unwrap_or(0)
    }

    pub fn skill_rank(&self, skill: &SkillRef) -> u8 {
        self.skill_ranks.get(skill).copied().unwrap_or(0)
    }

    /// Ceiling for the void-point counter.
    pub fn void_rank(&self) -> u8 {
        self.ring_rank(&RingRef::new("void"))
    }

    pub fn is_learned(&self, tech: &TechRef) -> bool {
        self.techniques.learned.contains(tech)
    }
}
