use chrono::{DateTime, Utc};
use non_empty_string::NonEmptyString;
use serde::Serialize;

use crate::domain::{
    version::VersionSnapshot,
    vocabulary::{Layer, LinkType, Priority, RequirementType, Source, Status},
};

/// A requirement record.
///
/// A requirement is identified by its display ID, classified by its
/// [`RequirementFields`], and carries the history of every classification it
/// had before its most recent update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Requirement {
    display_id: String,
    #[serde(flatten)]
    fields: RequirementFields,
    versions: Vec<VersionSnapshot>,
}

/// The client-supplied, validated content of a requirement.
///
/// This is everything except the server-assigned display ID and the version
/// history. Updates replace the whole field set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequirementFields {
    /// Abstraction level, if classified.
    pub layer: Option<Layer>,
    /// Requirement type.
    #[serde(rename = "type")]
    pub requirement_type: RequirementType,
    /// What is required. Never empty.
    #[serde(serialize_with = "non_empty_as_str")]
    pub description: NonEmptyString,
    /// Why it is required.
    pub rationale: Option<String>,
    /// Where the requirement came from.
    pub source: Source,
    /// Relative importance.
    pub priority: Priority,
    /// Lifecycle status.
    pub status: Status,
    /// How the requirement will be verified.
    pub verification: Option<String>,
    /// Outgoing traceability links, in the order they were supplied.
    pub links: Vec<Link>,
}

/// A directed, typed traceability link to another requirement.
///
/// The target is referenced by display ID only. It need not exist.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Link {
    /// Display ID of the target requirement.
    pub target_id: String,
    /// The asserted relationship.
    #[serde(rename = "type")]
    pub link_type: LinkType,
}

impl Link {
    /// Creates a link to `target_id`.
    pub fn new(target_id: impl Into<String>, link_type: LinkType) -> Self {
        Self {
            target_id: target_id.into(),
            link_type,
        }
    }
}

impl Requirement {
    /// Construct a new requirement with an empty history.
    pub(crate) const fn new(display_id: String, fields: RequirementFields) -> Self {
        Self {
            display_id,
            fields,
            versions: Vec::new(),
        }
    }

    /// Replace the fields of this requirement, keeping the display ID and
    /// appending a snapshot of the superseded values to the history.
    ///
    /// Fields are replaced wholesale: an optional field left out of `fields`
    /// (links included) is cleared rather than carried over.
    #[must_use]
    pub(crate) fn revise(self, fields: RequirementFields, timestamp: DateTime<Utc>) -> Self {
        let Self {
            display_id,
            fields: previous,
            mut versions,
        } = self;

        versions.push(VersionSnapshot::capture(&previous, timestamp));

        Self {
            display_id,
            fields,
            versions,
        }
    }

    /// The unique display identifier, e.g. `REQ-00000001`.
    #[must_use]
    pub fn display_id(&self) -> &str {
        &self.display_id
    }

    /// The current field set.
    #[must_use]
    pub const fn fields(&self) -> &RequirementFields {
        &self.fields
    }

    /// The abstraction level, if any.
    #[must_use]
    pub const fn layer(&self) -> Option<Layer> {
        self.fields.layer
    }

    /// The requirement type.
    #[must_use]
    pub const fn requirement_type(&self) -> RequirementType {
        self.fields.requirement_type
    }

    /// The description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.fields.description.as_str()
    }

    /// The rationale, if any.
    #[must_use]
    pub fn rationale(&self) -> Option<&str> {
        self.fields.rationale.as_deref()
    }

    /// The source.
    #[must_use]
    pub const fn source(&self) -> Source {
        self.fields.source
    }

    /// The priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.fields.priority
    }

    /// The lifecycle status.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.fields.status
    }

    /// The verification method, if any.
    #[must_use]
    pub fn verification(&self) -> Option<&str> {
        self.fields.verification.as_deref()
    }

    /// Outgoing links.
    #[must_use]
    pub fn links(&self) -> &[Link] {
        &self.fields.links
    }

    /// Prior classifications, oldest first.
    #[must_use]
    pub fn versions(&self) -> &[VersionSnapshot] {
        &self.versions
    }
}

fn non_empty_as_str<S>(value: &NonEmptyString, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(value.as_str())
}
