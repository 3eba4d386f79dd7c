//! # Record Store
//!
//! [`RecordStore`] owns the canonical, ordered collection of reports together
//! with the transient selection and filter state the dashboard works against.
//!
//! ## Ordering
//!
//! Collection order drives display order. It changes only when:
//! - a record is added (it goes to the front, most-recent-first)
//! - [`RecordStore::reorder`] moves a record between canonical positions
//! - [`RecordStore::remove`] drops a record (survivors keep their relative order)
//!
//! Filtering never touches order. [`RecordStore::filtered_view`] is a pure
//! derivation over the current collection and filter, so it is never stale.
//!
//! ## Indices
//!
//! `reorder` takes **canonical** indices. Drag gestures arrive in filtered-view
//! coordinates and must be translated first; see [`crate::index`].
//!
//! ## Concurrency
//!
//! Every mutation takes `&mut self`, so mutations cannot interleave. Hosts that
//! share the store across threads wrap it in a [`SharedStore`].
//!
//! ## Seeding
//!
//! Initial records come from a [`seed::SeedSource`]. The store is volatile and
//! lives as long as the process does.

use crate::error::{ReportError, Result};
use crate::filter::{CategoryFilter, RecordFilter, StatusFilter};
use crate::model::{Record, RecordId, RecordPatch};
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

pub mod seed;

/// A store shared between threads. Writers hold the lock for one whole
/// mutation, which keeps the single-mutation atomicity of the plain store.
pub type SharedStore = Arc<RwLock<RecordStore>>;

#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<Record>,
    selected: Option<Record>,
    filter: RecordFilter,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store already initialized with `seed`.
    pub fn with_records(seed: Vec<Record>) -> Result<Self> {
        let mut store = Self::new();
        store.initialize(seed)?;
        Ok(store)
    }

    pub fn into_shared(self) -> SharedStore {
        Arc::new(RwLock::new(self))
    }

    /// Replaces the whole collection and resets selection and filters.
    ///
    /// A seed with repeated ids is rejected and the store is left as it was.
    pub fn initialize(&mut self, seed: Vec<Record>) -> Result<()> {
        let mut seen = HashSet::with_capacity(seed.len());
        for record in &seed {
            if !seen.insert(&record.id) {
                return Err(ReportError::DuplicateId(record.id.clone()));
            }
        }

        debug!(count = seed.len(), "initializing record store");
        self.records = seed;
        self.selected = None;
        self.filter = RecordFilter::default();
        Ok(())
    }

    /// Inserts `record` at the front of the collection.
    pub fn add(&mut self, record: Record) -> Result<()> {
        if self.position(&record.id).is_some() {
            return Err(ReportError::DuplicateId(record.id));
        }
        debug!(id = %record.id, "adding record");
        self.records.insert(0, record);
        Ok(())
    }

    /// Merges `patch` into the record with `id` and bumps `date_modified`.
    ///
    /// A missing id is a no-op; the return value says whether anything was
    /// applied.
    pub fn update(&mut self, id: &RecordId, patch: RecordPatch) -> bool {
        let Some(record) = self.records.iter_mut().find(|r| &r.id == id) else {
            debug!(%id, "update ignored, no such record");
            return false;
        };

        patch.apply_to(record);
        record.date_modified = Utc::now().max(record.date_created);
        debug!(%id, "record updated");
        true
    }

    /// Removes the record with `id`, keeping the order of the others.
    pub fn remove(&mut self, id: &RecordId) -> Option<Record> {
        let pos = self.position(id)?;
        let removed = self.records.remove(pos);
        if self.selected.as_ref().is_some_and(|s| &s.id == id) {
            self.selected = None;
        }
        debug!(%id, "record removed");
        Some(removed)
    }

    /// Sets the selection. Not validated against the collection.
    pub fn select(&mut self, record: Option<Record>) {
        self.selected = record;
    }

    pub fn selected(&self) -> Option<&Record> {
        self.selected.as_ref()
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.filter.search_term = term.into();
    }

    pub fn set_category_filter(&mut self, category: impl Into<CategoryFilter>) {
        self.filter.category = category.into();
    }

    pub fn set_status_filter(&mut self, status: impl Into<StatusFilter>) {
        self.filter.status = status.into();
    }

    pub fn filter(&self) -> &RecordFilter {
        &self.filter
    }

    /// Moves the record at canonical `from` to canonical `to`, shifting the
    /// records in between. Out-of-range indices leave the collection as is.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        let len = self.records.len();
        if from >= len || to >= len {
            debug!(from, to, len, "reorder ignored, index out of range");
            return false;
        }
        if from != to {
            let moved = self.records.remove(from);
            self.records.insert(to, moved);
        }
        true
    }

    /// Records passing the current filter, in canonical order.
    pub fn filtered(&self) -> impl Iterator<Item = &Record> + '_ {
        self.records.iter().filter(|r| self.filter.matches(r))
    }

    /// Owned snapshot of [`RecordStore::filtered`].
    pub fn filtered_view(&self) -> Vec<Record> {
        self.filtered().cloned().collect()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, id: &RecordId) -> Option<&Record> {
        self.records.iter().find(|r| &r.id == id)
    }

    pub fn position(&self, id: &RecordId) -> Option<usize> {
        self.records.iter().position(|r| &r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{Category, Status};

    pub struct StoreFixture {
        pub store: RecordStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: RecordStore::new(),
            }
        }

        /// The bundled sample reports.
        pub fn with_samples(mut self) -> Self {
            self.store.initialize(seed::sample_records()).unwrap();
            self
        }

        /// Adds `count` general draft records with ids "r1".."rN". The last
        /// one added ends up first.
        pub fn with_records(mut self, count: usize) -> Self {
            for i in 0..count {
                let record = Record::new(
                    format!("Report {}", i + 1),
                    format!("Patient {}", i + 1),
                    format!("P{:03}", i + 1),
                    format!("<p>Content {}</p>", i + 1),
                )
                .with_id(format!("r{}", i + 1));
                self.store.add(record).unwrap();
            }
            self
        }

        pub fn with_record(mut self, id: &str, category: Category, status: Status) -> Self {
            let record = Record::new(format!("Report {}", id), "Jane Roe", "P100", "")
                .with_id(id)
                .with_category(category)
                .with_status(status);
            self.store.add(record).unwrap();
            self
        }
    }
}
