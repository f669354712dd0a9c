//! The active session: one catalog, one character, one derived state.
//!
//! Every mutation goes through `&mut self` and ends in a full recompute, so
//! readers can never observe derived state that lags the learning log. On a
//! failed recompute the mutation is rolled back and the previous derived
//! state stays in place.

use sheetbldr_domain::{
    CharacterRecord, ContentCatalog, ContentKind, CurriculumRef, DomainError, LearningEntry, Ring,
    RingRef, Skill, SkillRef, TechRef, TitleRef,
};
use thiserror::Error;

use crate::progression::{recompute, DerivedState, ProgressionError};

/// Errors surfaced by session operations
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Progression(#[from] ProgressionError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Titles unlock only once the most recent curriculum is complete
    #[error("Curriculum not yet complete: {0}")]
    CurriculumIncomplete(CurriculumRef),
}

/// Spent/progress deltas of a hypothetical learning entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LearningPreview {
    /// Experience the entry would cost
    pub cost: u32,
    /// Curriculum progress the entry would contribute
    pub progress_delta: f64,
}

/// Owns the loaded catalog, the active character, and the state derived from
/// them
#[derive(Debug)]
pub struct Session {
    catalog: ContentCatalog,
    character: CharacterRecord,
    derived: DerivedState,
}

impl Session {
    /// Start a session by running the first full recompute.
    pub fn start(
        catalog: ContentCatalog,
        character: CharacterRecord,
    ) -> Result<Self, SessionError> {
        let derived = recompute(&character, &catalog)?;
        tracing::info!(character = %character.personal_name, "session started");
        Ok(Self {
            catalog,
            character,
            derived,
        })
    }

    pub fn catalog(&self) -> &ContentCatalog {
        &self.catalog
    }

    pub fn character(&self) -> &CharacterRecord {
        &self.character
    }

    pub fn derived(&self) -> &DerivedState {
        &self.derived
    }

    /// Experience received minus experience spent.
    pub fn available_xp(&self) -> i64 {
        i64::from(self.character.received_xp) - i64::from(self.derived.spent_xp)
    }

    // -------------------------------------------------------------------------
    // Learning
    // -------------------------------------------------------------------------

    /// Append one entry to a curriculum's log and recompute. On failure the
    /// entry is removed again and the previous derived state remains.
    pub fn record_learning(
        &mut self,
        curriculum: &CurriculumRef,
        entry: LearningEntry,
    ) -> Result<&DerivedState, SessionError> {
        self.character.append_learning(curriculum, entry)?;
        match recompute(&self.character, &self.catalog) {
            Ok(derived) => {
                self.derived = derived;
                Ok(&self.derived)
            }
            Err(err) => {
                self.character.pop_learning(curriculum);
                tracing::warn!(%curriculum, error = %err, "learning entry rejected");
                Err(err.into())
            }
        }
    }

    /// Cost and progress contribution the entry would have, without mutating
    /// the character.
    pub fn preview_learning(
        &self,
        curriculum: &CurriculumRef,
        entry: LearningEntry,
    ) -> Result<LearningPreview, SessionError> {
        let mut scratch = self.character.clone();
        scratch.append_learning(curriculum, entry)?;
        let next = recompute(&scratch, &self.catalog)?;

        let progress_before = self
            .derived
            .curriculum(curriculum)
            .map(|p| p.progress_xp)
            .unwrap_or(0.0);
        let progress_after = next
            .curriculum(curriculum)
            .map(|p| p.progress_xp)
            .unwrap_or(0.0);
        Ok(LearningPreview {
            cost: next.spent_xp - self.derived.spent_xp,
            progress_delta: progress_after - progress_before,
        })
    }

    /// Cost of the next step for a piece of content: the next ring or skill
    /// rank at the current replayed rank, or the technique's price (zero once
    /// learned).
    pub fn upgrade_cost(
        &self,
        kind: ContentKind,
        id: &str,
        already_learned: bool,
    ) -> Result<u32, SessionError> {
        match kind {
            ContentKind::Ring => {
                let ring_ref = RingRef::new(id);
                self.catalog.ring(&ring_ref)?;
                let next = u32::from(self.derived.ring_rank(&ring_ref)) + 1;
                Ok(Ring::COST_PER_RANK * next)
            }
            ContentKind::Skill => {
                let skill_ref = SkillRef::new(id);
                self.catalog.skill(&skill_ref)?;
                let next = u32::from(self.derived.skill_rank(&skill_ref)) + 1;
                Ok(Skill::COST_PER_RANK * next)
            }
            ContentKind::Technique => {
                let technique = self.catalog.technique(&TechRef::new(id))?;
                Ok(if already_learned { 0 } else { technique.cost() })
            }
        }
    }

    // -------------------------------------------------------------------------
    // Titles
    // -------------------------------------------------------------------------

    /// Take a title: requires the most recently unlocked curriculum to be
    /// complete, applies the title's one-time stat awards, and opens its
    /// learning list.
    pub fn add_title(&mut self, title_ref: &TitleRef) -> Result<&DerivedState, SessionError> {
        let title = self.catalog.title(title_ref)?;
        if let Some(last) = self.derived.curricula.last() {
            if !last.is_complete() {
                return Err(SessionError::CurriculumIncomplete(last.curriculum.clone()));
            }
        }

        let curriculum_ref = title.curriculum_ref();
        let awards = title.awards.clone();

        let backup = self.character.clone();
        self.character.register_curriculum(curriculum_ref.clone())?;
        for award in &awards {
            self.character.apply_social_award(award);
        }
        match recompute(&self.character, &self.catalog) {
            Ok(derived) => {
                self.derived = derived;
                tracing::info!(title = %title_ref, "title acquired");
                Ok(&self.derived)
            }
            Err(err) => {
                self.character = backup;
                Err(err.into())
            }
        }
    }

    // -------------------------------------------------------------------------
    // Reset and reload
    // -------------------------------------------------------------------------

    /// Clear every learning list and recompute from the creation grants.
    pub fn reset_character(&mut self) -> Result<&DerivedState, SessionError> {
        self.character.reset_learning();
        self.derived = recompute(&self.character, &self.catalog)?;
        tracing::info!(character = %self.character.personal_name, "character reset");
        Ok(&self.derived)
    }

    /// Swap in a newly loaded catalog (language change) and recompute. The
    /// old catalog and derived state stay in place when the replay fails
    /// against the new content.
    pub fn replace_catalog(
        &mut self,
        catalog: ContentCatalog,
    ) -> Result<&DerivedState, SessionError> {
        let derived = recompute(&self.character, &catalog)?;
        self.catalog = catalog;
        self.derived = derived;
        Ok(&self.derived)
    }

    // -------------------------------------------------------------------------
    // Session counters
    // -------------------------------------------------------------------------

    pub fn set_honor(&mut self, value: i32) -> u8 {
        self.character.set_honor(value)
    }

    pub fn set_glory(&mut self, value: i32) -> u8 {
        self.character.set_glory(value)
    }

    pub fn set_status(&mut self, value: i32) -> u8 {
        self.character.set_status(value)
    }

    pub fn set_fatigue(&mut self, value: i32) -> u32 {
        self.character.set_fatigue(value)
    }

    pub fn set_strife(&mut self, value: i32) -> u32 {
        self.character.set_strife(value)
    }

    /// Void points are capped by the replayed void-ring rank.
    pub fn set_void_points(&mut self, value: i32) -> u8 {
        let void_rank = self.derived.void_rank();
        self.character.set_void_points(value, void_rank)
    }

    pub fn add_received_xp(&mut self, amount: u32) -> u32 {
        self.character.received_xp += amount;
        self.character.received_xp
    }
}
