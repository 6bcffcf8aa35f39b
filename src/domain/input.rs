//! Unvalidated requirement payloads and their validation.
//!
//! Callers at the boundary (JSON bodies, fixture files, forms) hand over
//! strings that may be missing or outside a vocabulary. [`RequirementInput`]
//! models that raw shape; [`RequirementInput::validate`] turns it into typed
//! [`RequirementFields`] or reports the first offending field.

use non_empty_string::NonEmptyString;
use serde::Deserialize;

use crate::domain::{
    requirement::{Link, RequirementFields},
    vocabulary::{InvalidValueError, LinkType, Term},
};

/// A requirement field set as supplied by a client.
///
/// Unknown keys are ignored during deserialization, and an explicit `null` is
/// treated the same as an absent key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RequirementInput {
    /// Layer name, optional.
    pub layer: Option<String>,
    /// Requirement type name, required.
    #[serde(rename = "type")]
    pub requirement_type: Option<String>,
    /// Description, required and non-empty.
    pub description: Option<String>,
    /// Rationale, optional.
    pub rationale: Option<String>,
    /// Source name, required.
    pub source: Option<String>,
    /// Priority name, required.
    pub priority: Option<String>,
    /// Status name, required.
    pub status: Option<String>,
    /// Verification method, optional.
    pub verification: Option<String>,
    /// Outgoing links, optional. Absent means no links.
    pub links: Option<Vec<LinkInput>>,
}

/// A link as supplied by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LinkInput {
    /// Display ID of the target.
    pub target_id: Option<String>,
    /// Link type name.
    #[serde(rename = "type")]
    pub link_type: Option<String>,
}

/// Why a field was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Reason {
    /// A required field was not supplied.
    #[error("field is required")]
    Missing,
    /// A required string was empty.
    #[error("must not be empty")]
    Empty,
    /// The value is not a member of the field's vocabulary.
    #[error(transparent)]
    InvalidValue(#[from] InvalidValueError),
}

/// A requirement payload violated a field constraint.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid field '{field}': {reason}")]
pub struct ValidationError {
    field: String,
    reason: Reason,
}

impl ValidationError {
    fn new(field: impl Into<String>, reason: impl Into<Reason>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Path of the offending field, e.g. `priority` or `links[1].type`.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Why the field was rejected.
    #[must_use]
    pub const fn reason(&self) -> &Reason {
        &self.reason
    }
}

impl RequirementInput {
    /// Validate the payload.
    ///
    /// Fields are checked in declaration order and the first violation is
    /// reported. Link targets are not checked against the store.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the field when a required field is
    /// missing, the description is empty, or a value is outside its
    /// vocabulary.
    pub fn validate(self) -> Result<RequirementFields, ValidationError> {
        let layer = optional_term(self.layer.as_deref(), "layer")?;
        let requirement_type = required_term(self.requirement_type.as_deref(), "type")?;
        let description = self
            .description
            .ok_or_else(|| ValidationError::new("description", Reason::Missing))
            .and_then(|description| {
                NonEmptyString::new(description)
                    .map_err(|_| ValidationError::new("description", Reason::Empty))
            })?;
        let source = required_term(self.source.as_deref(), "source")?;
        let priority = required_term(self.priority.as_deref(), "priority")?;
        let status = required_term(self.status.as_deref(), "status")?;
        let links = self
            .links
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(index, link)| link.validate(index))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RequirementFields {
            layer,
            requirement_type,
            description,
            rationale: self.rationale,
            source,
            priority,
            status,
            verification: self.verification,
            links,
        })
    }
}

impl LinkInput {
    fn validate(self, index: usize) -> Result<Link, ValidationError> {
        let target_id = self.target_id.ok_or_else(|| {
            ValidationError::new(format!("links[{index}].target_id"), Reason::Missing)
        })?;
        let link_type: LinkType =
            required_term(self.link_type.as_deref(), &format!("links[{index}].type"))?;
        Ok(Link::new(target_id, link_type))
    }
}

impl TryFrom<RequirementInput> for RequirementFields {
    type Error = ValidationError;

    fn try_from(input: RequirementInput) -> Result<Self, Self::Error> {
        input.validate()
    }
}

impl From<RequirementFields> for RequirementInput {
    fn from(fields: RequirementFields) -> Self {
        let RequirementFields {
            layer,
            requirement_type,
            description,
            rationale,
            source,
            priority,
            status,
            verification,
            links,
        } = fields;

        Self {
            layer: layer.map(|layer| layer.as_str().to_string()),
            requirement_type: Some(requirement_type.as_str().to_string()),
            description: Some(description.as_str().to_string()),
            rationale,
            source: Some(source.as_str().to_string()),
            priority: Some(priority.as_str().to_string()),
            status: Some(status.as_str().to_string()),
            verification,
            links: Some(
                links
                    .into_iter()
                    .map(|link| LinkInput {
                        target_id: Some(link.target_id),
                        link_type: Some(link.link_type.as_str().to_string()),
                    })
                    .collect(),
            ),
        }
    }
}

fn required_term<T: Term>(raw: Option<&str>, field: &str) -> Result<T, ValidationError> {
    let raw = raw.ok_or_else(|| ValidationError::new(field, Reason::Missing))?;
    T::parse(raw).map_err(|error| ValidationError::new(field, error))
}

fn optional_term<T: Term>(raw: Option<&str>, field: &str) -> Result<Option<T>, ValidationError> {
    raw.map(|raw| T::parse(raw).map_err(|error| ValidationError::new(field, error)))
        .transpose()
}
