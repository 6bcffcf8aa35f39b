pub mod fixtures;
pub use fixtures::{Dataset, Fixture, FixtureRecord, UnknownDatasetError};

pub mod store;
pub use store::{RequirementStore, StoreError};

pub mod traceability;
pub use traceability::{TraceEdge, TraceabilityGraph};

pub mod export;
