//! Curriculum progression: the learning-log replay and its derived state.
//!
//! The replay is a pure function of the character record and the content
//! catalog. It is re-run in full after every learning event, on load, on
//! reset, and on language change; nothing derived is ever persisted.

mod derived;
mod replay;

pub use derived::{CurriculumProgress, DerivedState, SkillSets, TechniqueSets};
pub use replay::recompute;

use sheetbldr_domain::DomainError;
use thiserror::Error;

/// Errors that abort a recompute. A failed recompute never yields partial
/// derived state.
#[derive(Debug, Error, Clone)]
pub enum ProgressionError {
    /// The learning log or a curriculum names content the catalog does not
    /// have
    #[error("Unknown {kind} ref: {id}")]
    UnknownRef { kind: &'static str, id: String },

    /// A learning list is keyed by a curriculum no school or title owns
    #[error("Unknown curriculum: {0}")]
    UnknownCurriculum(String),
}

impl From<DomainError> for ProgressionError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::UnknownRef { kind, id } => Self::UnknownRef { kind, id },
            other => Self::UnknownRef {
                kind: "content",
                id: other.to_string(),
            },
        }
    }
}
