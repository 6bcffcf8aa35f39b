//! Domain models for requirements management.
//!
//! This module contains the core domain types: requirement records and their
//! vocabularies, version snapshots, client payload validation, identity
//! generation, and the in-memory catalog.

/// Requirement record model.
pub mod requirement;
pub use requirement::{Link, Requirement, RequirementFields};

pub mod vocabulary;
pub use vocabulary::{
    InvalidValueError, Layer, LinkType, Priority, RequirementType, Source, Status, Term,
    UnknownVocabularyError, Vocabulary,
};

pub mod version;
pub use version::{SnapshotData, VersionSnapshot};

pub mod input;
pub use input::{LinkInput, Reason, RequirementInput, ValidationError};

/// Display identifier generation.
pub mod display_id;
pub use display_id::IdGenerator;

mod config;
pub use config::Config;

pub mod catalog;
pub use catalog::Catalog;
