//! # pharmcase core
//!
//! Core business logic for the pharmcase case library.
//!
//! This crate contains pure data operations and the persistence layer:
//! - Versioned snapshot persistence under a single slot file ([`snapshot`])
//! - The embedded seed catalogue used when no usable snapshot exists ([`seed`])
//! - The in-memory case library mediating every mutation ([`library`])
//! - Read-side filtering, search and progress projections ([`views`])
//!
//! **No UI concerns**: rendering, forms and AI invocation flows belong to
//! consumers; the collaborator wire contract lives in `pharmcase-assistant`.

pub mod config;
pub mod constants;
pub mod error;
pub mod library;
pub mod seed;
pub mod snapshot;
pub mod views;

// Re-export facades
pub use config::{resolve_data_dir, LibraryConfig};
pub use error::{SeedError, StoreError, StoreResult};
pub use library::{CaseLibrary, LibraryEvent, SubscriberId};
pub use seed::seed_catalogue;
pub use snapshot::{
    migration_for, CaseSnapshot, FileSnapshotStore, Migration, SchemaVersion, SnapshotStore,
};
pub use views::{
    filter_options, progress, search, CaseFilter, FilterOptions, ProgressSummary, TagFilter,
};

// Re-export the domain types consumers handle through this crate
pub use pharmcase_ids::CaseId;
pub use pharmcase_types::{
    CaseDraft, CaseStudy, CaseTags, DraftError, NonEmptyText, QuizQuestion, TagDimension,
};
