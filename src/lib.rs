//! In-memory Requirements Management
//!
//! Requirements are classified by controlled vocabularies, carry their own
//! revision history, and link to one another for traceability. Everything
//! lives in a thread-safe, in-memory [`RequirementStore`].

pub mod domain;
pub use domain::{
    Config, Layer, Link, LinkType, Priority, Requirement, RequirementInput, RequirementType,
    Source, Status, ValidationError, Vocabulary,
};

/// Thread-safe storage, traceability views and demo datasets.
pub mod storage;
pub use storage::{RequirementStore, StoreError, TraceEdge};
