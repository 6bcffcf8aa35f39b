//! Closed vocabularies used to classify requirements and links.
//!
//! Every value has a fixed wire string (the literal used in JSON payloads and
//! CSV output) and a fixed declaration order, which is the order metadata
//! lookups report.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A closed set of string-valued terms.
pub trait Term: Copy + Sized + 'static {
    /// Name of the vocabulary, used in error messages.
    const NAME: &'static str;

    /// Every term, in declaration order.
    const ALL: &'static [Self];

    /// The wire string of this term.
    fn as_str(self) -> &'static str;

    /// The wire strings of every term, in declaration order.
    #[must_use]
    fn values() -> Vec<&'static str> {
        Self::ALL.iter().map(|term| term.as_str()).collect()
    }

    /// Parses a wire string.
    ///
    /// Matching is exact: `"high"` is not a priority, `"High"` is.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidValueError`] if `raw` is not one of [`Term::values`].
    fn parse(raw: &str) -> Result<Self, InvalidValueError> {
        Self::ALL
            .iter()
            .copied()
            .find(|term| term.as_str() == raw)
            .ok_or_else(|| InvalidValueError {
                vocabulary: Self::NAME,
                value: raw.to_string(),
                allowed: Self::values(),
            })
    }
}

/// Error returned when a string is not a member of a vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{value}' is not a valid {vocabulary}: expected one of {}", .allowed.join(", "))]
pub struct InvalidValueError {
    vocabulary: &'static str,
    value: String,
    allowed: Vec<&'static str>,
}

impl InvalidValueError {
    /// The rejected value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The values that would have been accepted.
    #[must_use]
    pub fn allowed(&self) -> &[&'static str] {
        &self.allowed
    }
}

/// Abstraction level of a requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Layer {
    /// Business needs and goals.
    Business,
    /// System-level behaviour.
    System,
    /// Software-level behaviour.
    Software,
    /// Test and verification activities.
    Test,
}

impl Term for Layer {
    const NAME: &'static str = "layer";
    const ALL: &'static [Self] = &[Self::Business, Self::System, Self::Software, Self::Test];

    fn as_str(self) -> &'static str {
        match self {
            Self::Business => "Business",
            Self::System => "System",
            Self::Software => "Software",
            Self::Test => "Test",
        }
    }
}

/// Kind of requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RequirementType {
    /// Something the system must do.
    Functional,
    /// A quality the system must have.
    #[serde(rename = "Non-Functional")]
    NonFunctional,
    /// A limit imposed on the solution.
    Constraint,
    /// A verification activity.
    Verification,
}

impl Term for RequirementType {
    const NAME: &'static str = "type";
    const ALL: &'static [Self] = &[
        Self::Functional,
        Self::NonFunctional,
        Self::Constraint,
        Self::Verification,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Functional => "Functional",
            Self::NonFunctional => "Non-Functional",
            Self::Constraint => "Constraint",
            Self::Verification => "Verification",
        }
    }
}

/// Relative importance of a requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    /// Nice to have.
    Low,
    /// Expected.
    Medium,
    /// Must have.
    High,
}

impl Term for Priority {
    const NAME: &'static str = "priority";
    const ALL: &'static [Self] = &[Self::Low, Self::Medium, Self::High];

    fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// Lifecycle state of a requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Status {
    /// Being written.
    Draft,
    /// Accepted by review.
    Approved,
    /// Declined by review.
    Rejected,
    /// Submitted for review.
    Proposed,
    /// Scheduled for implementation.
    Planned,
}

impl Term for Status {
    const NAME: &'static str = "status";
    const ALL: &'static [Self] = &[
        Self::Draft,
        Self::Approved,
        Self::Rejected,
        Self::Proposed,
        Self::Planned,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Proposed => "Proposed",
            Self::Planned => "Planned",
        }
    }
}

/// Where a requirement came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Source {
    /// A stakeholder interview or request.
    Stakeholder,
    /// An existing document.
    Document,
    /// Behaviour of a system being replaced.
    PreviousSystem,
    /// A law, standard or regulation.
    Regulation,
    /// A customer support ticket.
    SupportTicket,
    /// The product owner.
    ProductOwner,
    /// The development team.
    Developer,
}

impl Term for Source {
    const NAME: &'static str = "source";
    const ALL: &'static [Self] = &[
        Self::Stakeholder,
        Self::Document,
        Self::PreviousSystem,
        Self::Regulation,
        Self::SupportTicket,
        Self::ProductOwner,
        Self::Developer,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Stakeholder => "Stakeholder",
            Self::Document => "Document",
            Self::PreviousSystem => "PreviousSystem",
            Self::Regulation => "Regulation",
            Self::SupportTicket => "SupportTicket",
            Self::ProductOwner => "ProductOwner",
            Self::Developer => "Developer",
        }
    }
}

/// Relationship asserted by a traceability link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LinkType {
    /// The source cannot be met unless the target is.
    DependsOn,
    /// The source fulfils the target.
    Satisfies,
    /// The source elaborates the target in more detail.
    Refines,
    /// The source and the target cannot both be met.
    ConflictsWith,
}

impl Term for LinkType {
    const NAME: &'static str = "link type";
    const ALL: &'static [Self] = &[
        Self::DependsOn,
        Self::Satisfies,
        Self::Refines,
        Self::ConflictsWith,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::DependsOn => "DependsOn",
            Self::Satisfies => "Satisfies",
            Self::Refines => "Refines",
            Self::ConflictsWith => "ConflictsWith",
        }
    }
}

macro_rules! impl_display_from_str {
    ($($term:ty),+) => {
        $(
            impl fmt::Display for $term {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }

            impl FromStr for $term {
                type Err = InvalidValueError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    <Self as Term>::parse(s)
                }
            }
        )+
    };
}

impl_display_from_str!(Layer, RequirementType, Priority, Status, Source, LinkType);

/// The vocabularies exposed through metadata lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vocabulary {
    /// [`Layer`] values.
    Layer,
    /// [`RequirementType`] values.
    Type,
    /// [`Priority`] values.
    Priority,
    /// [`Source`] values.
    Source,
    /// [`Status`] values.
    Status,
    /// [`LinkType`] values.
    LinkType,
}

impl Vocabulary {
    /// The wire strings of this vocabulary, in declaration order.
    #[must_use]
    pub fn values(self) -> Vec<&'static str> {
        match self {
            Self::Layer => Layer::values(),
            Self::Type => RequirementType::values(),
            Self::Priority => Priority::values(),
            Self::Source => Source::values(),
            Self::Status => Status::values(),
            Self::LinkType => LinkType::values(),
        }
    }
}

/// Error returned when a vocabulary name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "unknown vocabulary '{0}': expected one of layers, types, priority, source, status, link-types"
)]
pub struct UnknownVocabularyError(String);

impl FromStr for Vocabulary {
    type Err = UnknownVocabularyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "layer" | "layers" => Ok(Self::Layer),
            "type" | "types" => Ok(Self::Type),
            "priority" | "priorities" => Ok(Self::Priority),
            "source" | "sources" => Ok(Self::Source),
            "status" | "statuses" => Ok(Self::Status),
            "link-types" | "link_types" | "links" => Ok(Self::LinkType),
            _ => Err(UnknownVocabularyError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("layers", &["Business", "System", "Software", "Test"])]
    #[test_case("types", &["Functional", "Non-Functional", "Constraint", "Verification"])]
    #[test_case("priority", &["Low", "Medium", "High"])]
    #[test_case("status", &["Draft", "Approved", "Rejected", "Proposed", "Planned"])]
    #[test_case("link-types", &["DependsOn", "Satisfies", "Refines", "ConflictsWith"])]
    fn metadata_lookup_in_declaration_order(name: &str, expected: &[&str]) {
        let vocabulary: Vocabulary = name.parse().unwrap();
        assert_eq!(vocabulary.values(), expected);
    }

    #[test]
    fn sources_are_reported_verbatim() {
        let values = Vocabulary::Source.values();
        assert_eq!(values.len(), 7);
        assert_eq!(values[2], "PreviousSystem");
        assert_eq!(values[6], "Developer");
    }

    #[test]
    fn unknown_vocabulary_is_rejected() {
        let error = "colours".parse::<Vocabulary>().unwrap_err();
        assert!(error.to_string().contains("colours"));
    }

    #[test]
    fn parse_is_exact() {
        assert_eq!("High".parse::<Priority>().unwrap(), Priority::High);
        assert!("high".parse::<Priority>().is_err());
        assert!("Critical".parse::<Priority>().is_err());
    }

    #[test]
    fn invalid_value_lists_alternatives() {
        let error = Priority::parse("Critical").unwrap_err();
        assert_eq!(error.value(), "Critical");
        assert_eq!(error.allowed(), &["Low", "Medium", "High"]);
        assert_eq!(
            error.to_string(),
            "'Critical' is not a valid priority: expected one of Low, Medium, High"
        );
    }

    #[test]
    fn serde_uses_wire_strings() {
        let json = serde_json::to_string(&RequirementType::NonFunctional).unwrap();
        assert_eq!(json, "\"Non-Functional\"");
        let parsed: RequirementType = serde_json::from_str("\"Non-Functional\"").unwrap();
        assert_eq!(parsed, RequirementType::NonFunctional);
    }

    #[test]
    fn display_matches_as_str() {
        for term in LinkType::ALL {
            assert_eq!(term.to_string(), term.as_str());
        }
    }
}
