//! Version history captured when a requirement is updated.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{
    requirement::RequirementFields,
    vocabulary::{Priority, RequirementType, Source, Status},
};

/// The classification state of a requirement immediately before an update.
///
/// Snapshots are created once, appended to the owning requirement's history,
/// and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionSnapshot {
    timestamp: DateTime<Utc>,
    data: SnapshotData,
}

/// The fields preserved by a [`VersionSnapshot`].
///
/// Layer and links are not part of the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotData {
    /// Requirement type.
    #[serde(rename = "type")]
    pub requirement_type: RequirementType,
    /// Description text.
    pub description: String,
    /// Optional rationale.
    pub rationale: Option<String>,
    /// Origin of the requirement.
    pub source: Source,
    /// Priority.
    pub priority: Priority,
    /// Lifecycle status.
    pub status: Status,
    /// Optional verification method.
    pub verification: Option<String>,
}

impl VersionSnapshot {
    /// Record `fields` as they stand at `timestamp`.
    pub(crate) fn capture(fields: &RequirementFields, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            data: SnapshotData {
                requirement_type: fields.requirement_type,
                description: fields.description.as_str().to_string(),
                rationale: fields.rationale.clone(),
                source: fields.source,
                priority: fields.priority,
                status: fields.status,
                verification: fields.verification.clone(),
            },
        }
    }

    /// When the snapshot was taken, i.e. the time of the update that
    /// superseded these values.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// The preserved field values.
    #[must_use]
    pub const fn data(&self) -> &SnapshotData {
        &self.data
    }
}
