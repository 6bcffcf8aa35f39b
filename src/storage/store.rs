//! A thread-safe, in-memory store of requirements
//!
//! The [`RequirementStore`] is a cloneable handle around a [`Catalog`] and an
//! [`IdGenerator`]. Every operation runs under one lock: mutations hold the
//! write lock for their whole read-modify-write, so concurrent updates to the
//! same record are serialized and none of their snapshots are lost. Reads
//! return owned copies.

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use chrono::Utc;
use tracing::instrument;

use crate::{
    domain::{
        Catalog, Config, IdGenerator, Requirement, RequirementFields, RequirementInput, Status,
        ValidationError,
    },
    storage::{
        fixtures::Fixture,
        traceability::{self, TraceEdge, TraceabilityGraph},
    },
};

/// Errors returned by [`RequirementStore`] operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No requirement has the given display ID.
    #[error("requirement {0} not found")]
    NotFound(String),

    /// The supplied fields violate a constraint.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Two records of one fixture share a key.
    #[error("fixture key '{0}' names more than one record")]
    DuplicateKey(String),
}

/// A process-wide store of requirements with an explicitly controlled
/// lifetime.
///
/// Cloning the store produces another handle to the same records.
#[derive(Debug, Clone, Default)]
pub struct RequirementStore {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Debug)]
struct Inner {
    catalog: Catalog,
    ids: IdGenerator,
}

impl Default for Inner {
    fn default() -> Self {
        Self {
            catalog: Catalog::default(),
            ids: Config::default().id_generator(),
        }
    }
}

impl RequirementStore {
    /// Creates an empty store with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store that issues display IDs according to `config`.
    #[must_use]
    pub fn with_config(config: &Config) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                catalog: Catalog::default(),
                ids: config.id_generator(),
            })),
        }
    }

    // Records are swapped whole, so a poisoned lock never guards a torn record.
    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Validates `input` and stores it as a new requirement with a freshly
    /// issued display ID and an empty history.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] if a required field is missing, the
    /// description is empty, or a value is outside its vocabulary.
    #[instrument(skip(self, input))]
    pub fn create(&self, input: RequirementInput) -> Result<Requirement, StoreError> {
        let fields = RequirementFields::try_from(input)?;

        let mut inner = self.write();
        let display_id = inner.ids.next_id();
        let requirement = Requirement::new(display_id, fields);
        inner.catalog.insert(requirement.clone());
        drop(inner);

        tracing::info!("Added requirement: {}", requirement.display_id());
        Ok(requirement)
    }

    /// Returns every stored requirement, in insertion order.
    #[must_use]
    pub fn get_all(&self) -> Vec<Requirement> {
        self.read().catalog.iter().cloned().collect()
    }

    /// Returns the requirement with the given display ID.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if it is not stored.
    pub fn get(&self, display_id: &str) -> Result<Requirement, StoreError> {
        self.read()
            .catalog
            .get(display_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(display_id.to_string()))
    }

    /// Replaces the fields of a stored requirement.
    ///
    /// The previous classification is appended to the record's history with
    /// the current time. This is a full replacement: optional fields omitted
    /// from `input` (links included) are cleared, not merged.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] if `input` is invalid, in which case
    /// the stored record is left untouched, or [`StoreError::NotFound`] if no
    /// requirement has this display ID.
    #[instrument(skip(self, input))]
    pub fn update(
        &self,
        display_id: &str,
        input: RequirementInput,
    ) -> Result<Requirement, StoreError> {
        let fields = RequirementFields::try_from(input)?;

        let revised = self
            .write()
            .catalog
            .revise(display_id, fields, Utc::now())
            .cloned()
            .ok_or_else(|| StoreError::NotFound(display_id.to_string()))?;

        tracing::info!(
            "Updated requirement: {} (version {})",
            display_id,
            revised.versions().len()
        );
        Ok(revised)
    }

    /// Moves a requirement to a new lifecycle status, e.g. when it is approved
    /// or rejected in review.
    ///
    /// This is an update whose field set is the current one with `status`
    /// changed, so it appends a version and keeps every other field.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no requirement has this display ID.
    #[instrument(skip(self))]
    pub fn set_status(&self, display_id: &str, status: Status) -> Result<Requirement, StoreError> {
        let mut inner = self.write();

        let mut fields = inner
            .catalog
            .get(display_id)
            .map(|requirement| requirement.fields().clone())
            .ok_or_else(|| StoreError::NotFound(display_id.to_string()))?;
        fields.status = status;

        let revised = inner
            .catalog
            .revise(display_id, fields, Utc::now())
            .cloned()
            .ok_or_else(|| StoreError::NotFound(display_id.to_string()))?;
        drop(inner);

        tracing::info!("Set status of {display_id} to {status}");
        Ok(revised)
    }

    /// Removes a requirement and returns it.
    ///
    /// Links from other requirements to the removed one are left in place.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no requirement has this display ID,
    /// including when it has already been deleted.
    #[instrument(skip(self))]
    pub fn delete(&self, display_id: &str) -> Result<Requirement, StoreError> {
        let removed = self
            .write()
            .catalog
            .remove(display_id)
            .ok_or_else(|| StoreError::NotFound(display_id.to_string()))?;

        tracing::info!("Deleted requirement: {display_id}");
        Ok(removed)
    }

    /// Removes every requirement.
    ///
    /// Display IDs issued before clearing are not issued again.
    pub fn clear(&self) {
        self.write().catalog.clear();
        tracing::debug!("Cleared requirement store");
    }

    /// Replaces the store's contents with a fixture dataset.
    ///
    /// Every record is validated before anything is removed, so an invalid
    /// dataset leaves the store unchanged. Each record is issued a fresh
    /// display ID from the store's counter, under its own prefix or the
    /// fixture's. Link targets that name a record key are rewritten to that
    /// record's display ID; any other target is kept as written. Returns the
    /// number of records loaded.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] for the first invalid record, or
    /// [`StoreError::DuplicateKey`] if two records share a key.
    #[instrument(skip_all, fields(prefix = fixture.id_prefix()))]
    pub fn load_fixture(&self, fixture: Fixture) -> Result<usize, StoreError> {
        let default_prefix = fixture.id_prefix().to_string();
        let mut keys = HashSet::new();
        let records = fixture
            .into_records()
            .into_iter()
            .map(|record| -> Result<_, StoreError> {
                let (key, id_prefix, input) = record.into_parts();
                if let Some(key) = &key {
                    if !keys.insert(key.clone()) {
                        return Err(StoreError::DuplicateKey(key.clone()));
                    }
                }
                Ok((key, id_prefix, RequirementFields::try_from(input)?))
            })
            .collect::<Result<Vec<_>, StoreError>>()?;

        let mut inner = self.write();
        let Inner { catalog, ids } = &mut *inner;
        catalog.clear();

        let mut issued = HashMap::with_capacity(keys.len());
        let records: Vec<_> = records
            .into_iter()
            .map(|(key, id_prefix, fields)| {
                let display_id =
                    ids.next_id_with_prefix(id_prefix.as_deref().unwrap_or(&default_prefix));
                if let Some(key) = key {
                    issued.insert(key, display_id.clone());
                }
                (display_id, fields)
            })
            .collect();

        for (display_id, mut fields) in records {
            for link in &mut fields.links {
                if let Some(target) = issued.get(&link.target_id) {
                    link.target_id.clone_from(target);
                }
            }
            catalog.insert(Requirement::new(display_id, fields));
        }
        let loaded = catalog.len();
        drop(inner);

        tracing::info!("Loaded {loaded} fixture requirements");
        Ok(loaded)
    }

    /// The number of stored requirements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().catalog.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().catalog.is_empty()
    }

    /// Every traceability link in the store as a `(source, type, target)`
    /// edge, in store order and then link order.
    ///
    /// Computed from the live contents on every call.
    #[must_use]
    pub fn export_edges(&self) -> Vec<TraceEdge> {
        traceability::edges(&self.read().catalog).collect()
    }

    /// A snapshot of the link graph for incoming/outgoing/dangling queries.
    #[must_use]
    pub fn traceability_graph(&self) -> TraceabilityGraph {
        TraceabilityGraph::from_catalog(&self.read().catalog)
    }
}
