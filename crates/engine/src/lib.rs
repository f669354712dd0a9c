//! SheetBldr engine.
//!
//! Everything that executes around the domain types:
//!
//! - `progression/` - the learning-log replay and its derived state
//! - `session` - the owning aggregate: catalog + character + derived state
//! - `infrastructure/` - document-store port, filesystem adapter,
//!   content loading with language merge, character and settings persistence

pub mod infrastructure;
pub mod progression;
pub mod session;

/// Shared fixtures for unit and integration tests.
#[cfg(test)]
pub mod test_fixtures;

/// End-to-end tests across loading, session mutation and persistence.
#[cfg(test)]
mod e2e_tests;

pub use infrastructure::{
    AppSettings, CharacterLoadError, CharacterRepository, ContentError, ContentLoader,
    DocumentStore, FsDocumentStore, SettingsRepository, StoreError,
};
pub use progression::{
    recompute, CurriculumProgress, DerivedState, ProgressionError, SkillSets, TechniqueSets,
};
pub use session::{LearningPreview, Session, SessionError};
