//! Infrastructure: the document-store port, its filesystem adapter, and the
//! repositories built on top of it.

pub mod app_settings;
pub mod character_repository;
pub mod content_loader;
pub mod fs_store;
pub mod ports;

pub use app_settings::{AppSettings, SettingsRepository};
pub use character_repository::{CharacterLoadError, CharacterRepository};
pub use content_loader::{deep_merge, ContentError, ContentLoader, CONTENT_SECTIONS};
pub use fs_store::FsDocumentStore;
pub use ports::{DocumentStore, StoreError};

#[cfg(test)]
pub use ports::MockDocumentStore;
