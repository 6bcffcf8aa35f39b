//! In-memory collection of requirements keyed by display ID.
//!
//! The [`Catalog`] knows nothing about locking or identity generation. It
//! keeps records in insertion order and swaps them whole on update, which is
//! what the thread-safe store builds on.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};

use crate::domain::requirement::{Requirement, RequirementFields};

/// An insertion-ordered map from display ID to [`Requirement`].
#[derive(Debug, Default)]
pub struct Catalog {
    /// Records keyed by display ID, tagged with their insertion position.
    requirements: HashMap<String, Slot>,

    /// Display IDs by insertion position.
    /// Replacing a record keeps its position.
    order: BTreeMap<u64, String>,

    next_position: u64,
}

#[derive(Debug)]
struct Slot {
    position: u64,
    requirement: Requirement,
}

impl Catalog {
    /// Creates a catalog with pre-allocated capacity for the given number of
    /// requirements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            requirements: HashMap::with_capacity(capacity),
            order: BTreeMap::new(),
            next_position: 0,
        }
    }

    /// Inserts a requirement.
    ///
    /// A record with the same display ID is replaced in place and returned.
    pub fn insert(&mut self, requirement: Requirement) -> Option<Requirement> {
        if let Some(slot) = self.requirements.get_mut(requirement.display_id()) {
            return Some(std::mem::replace(&mut slot.requirement, requirement));
        }

        let position = self.next_position;
        self.next_position += 1;

        let id = requirement.display_id().to_string();
        self.order.insert(position, id.clone());
        self.requirements.insert(
            id,
            Slot {
                position,
                requirement,
            },
        );
        None
    }

    /// Retrieves a requirement by display ID.
    #[must_use]
    pub fn get(&self, display_id: &str) -> Option<&Requirement> {
        self.requirements
            .get(display_id)
            .map(|slot| &slot.requirement)
    }

    /// Replaces the fields of a stored requirement, appending a snapshot of
    /// the previous values to its history.
    ///
    /// Returns `None` if no requirement has this display ID.
    pub fn revise(
        &mut self,
        display_id: &str,
        fields: RequirementFields,
        timestamp: DateTime<Utc>,
    ) -> Option<&Requirement> {
        let (key, mut slot) = self.requirements.remove_entry(display_id)?;
        slot.requirement = slot.requirement.revise(fields, timestamp);
        Some(&self.requirements.entry(key).or_insert(slot).requirement)
    }

    /// Removes a requirement, returning it if it was present.
    pub fn remove(&mut self, display_id: &str) -> Option<Requirement> {
        let slot = self.requirements.remove(display_id)?;
        self.order.remove(&slot.position);
        Some(slot.requirement)
    }

    /// Removes every requirement.
    pub fn clear(&mut self) {
        self.requirements.clear();
        self.order.clear();
    }

    /// The number of stored requirements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }

    /// Iterates over all requirements in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Requirement> + '_ {
        self.order.values().filter_map(|id| self.get(id))
    }
}

impl FromIterator<Requirement> for Catalog {
    fn from_iter<I: IntoIterator<Item = Requirement>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut catalog = Self::with_capacity(iter.size_hint().0);
        for requirement in iter {
            catalog.insert(requirement);
        }
        catalog
    }
}
