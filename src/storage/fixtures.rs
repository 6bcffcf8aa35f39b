//! Bundled demo datasets.
//!
//! Each dataset is a JSON document embedded in the binary. Records use the
//! same shape as client payloads, plus an optional local `key` and
//! `id_prefix`. Display IDs are never stored in a dataset: the store issues
//! them when the dataset is loaded, and a link whose `target_id` names a key
//! is pointed at the record that key belongs to.

use std::{fmt, str::FromStr};

use serde::Deserialize;

use crate::domain::RequirementInput;

/// The demo datasets that ship with the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    /// An ice-cream shop, traced from business goals down to tests.
    IceCream,
    /// A battle station with no links between its requirements.
    DeathStar,
}

impl Dataset {
    /// Every bundled dataset.
    pub const ALL: &[Self] = &[Self::IceCream, Self::DeathStar];

    /// The canonical name of the dataset.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::IceCream => "ice-cream",
            Self::DeathStar => "death-star",
        }
    }

    const fn json(self) -> &'static str {
        match self {
            Self::IceCream => include_str!("fixtures/ice_cream.json"),
            Self::DeathStar => include_str!("fixtures/death_star.json"),
        }
    }

    /// Parses the embedded dataset.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded document is malformed.
    pub fn fixture(self) -> Result<Fixture, serde_json::Error> {
        serde_json::from_str(self.json())
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The name does not match any bundled dataset.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown dataset '{0}': expected one of ice-cream, death-star")]
pub struct UnknownDatasetError(String);

impl FromStr for Dataset {
    type Err = UnknownDatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ice-cream" | "ice_cream" | "icecream" => Ok(Self::IceCream),
            "death-star" | "death_star" | "deathstar" => Ok(Self::DeathStar),
            _ => Err(UnknownDatasetError(s.to_string())),
        }
    }
}

/// A set of records to load into a store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Fixture {
    id_prefix: String,
    records: Vec<FixtureRecord>,
}

impl Fixture {
    /// Creates a fixture whose records are issued display IDs under
    /// `id_prefix` unless they carry their own.
    #[must_use]
    pub fn new(id_prefix: impl Into<String>, records: Vec<FixtureRecord>) -> Self {
        Self {
            id_prefix: id_prefix.into(),
            records,
        }
    }

    /// The default prefix for issued display IDs.
    #[must_use]
    pub fn id_prefix(&self) -> &str {
        &self.id_prefix
    }

    /// The records, in load order.
    #[must_use]
    pub fn records(&self) -> &[FixtureRecord] {
        &self.records
    }

    /// Consumes the fixture, returning its records.
    #[must_use]
    pub fn into_records(self) -> Vec<FixtureRecord> {
        self.records
    }
}

/// One record of a [`Fixture`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FixtureRecord {
    #[serde(default)]
    key: Option<String>,
    #[serde(default)]
    id_prefix: Option<String>,
    #[serde(flatten)]
    input: RequirementInput,
}

impl FixtureRecord {
    /// Creates a record with no key, using the fixture's prefix.
    #[must_use]
    pub const fn new(input: RequirementInput) -> Self {
        Self {
            key: None,
            id_prefix: None,
            input,
        }
    }

    /// Names the record so that links elsewhere in the fixture can target it.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Overrides the fixture's prefix for this record.
    #[must_use]
    pub fn with_id_prefix(mut self, id_prefix: impl Into<String>) -> Self {
        self.id_prefix = Some(id_prefix.into());
        self
    }

    /// The record's local key, if any.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// The record's own prefix, if any.
    #[must_use]
    pub fn id_prefix(&self) -> Option<&str> {
        self.id_prefix.as_deref()
    }

    /// The requirement payload.
    #[must_use]
    pub const fn input(&self) -> &RequirementInput {
        &self.input
    }

    /// Splits the record into its key, its prefix and its payload.
    #[must_use]
    pub fn into_parts(self) -> (Option<String>, Option<String>, RequirementInput) {
        (self.key, self.id_prefix, self.input)
    }
}
