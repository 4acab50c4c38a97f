//! Module: catalog::cache
//! Responsibility: query-scoped ownership and lazy population of per-table
//! snapshots and their secondary indexes. Does not own: record enumeration
//! (table handlers) or scan sequencing.

use crate::{
    catalog::{
        lookup::IndexLookup,
        scan::{IndexScanRows, TableScanRows},
        source::{CatalogTable, ProcessId},
        store::IndexStorage,
    },
    error::InternalError,
    model::IndexDescriptor,
    obs::sink::{self, MetricsEvent},
};
use std::{any::Any, collections::HashMap, rc::Rc};
use thiserror::Error as ThisError;

///
/// SlotError
///

#[derive(Debug, ThisError)]
pub enum SlotError {
    #[error("table slot '{0}' does not hold the requested record type")]
    RecordTypeMismatch(&'static str),
}

impl From<SlotError> for InternalError {
    fn from(err: SlotError) -> Self {
        Self::catalog_invariant(err.to_string())
    }
}

///
/// TableSlot
///
/// One table's fully materialized snapshot: the record slice in population
/// order plus every declared secondary index. A slot is built in a single
/// population pass and published only when complete; callers never observe
/// a partially built slot.
///

#[derive(Debug)]
pub struct TableSlot<T> {
    records: Vec<Rc<T>>,
    indexes: HashMap<&'static str, IndexStorage<Rc<T>>>,
}

impl<T: 'static> TableSlot<T> {
    fn build<H>(table: &H) -> Result<Self, InternalError>
    where
        H: CatalogTable<Record = T>,
    {
        let mut records = Vec::new();
        table.populate(&mut |record| records.push(Rc::new(record)))?;

        let mut built: Vec<(&'static IndexDescriptor, IndexStorage<Rc<T>>)> = table
            .indexes()
            .iter()
            .map(|descriptor| (descriptor, IndexStorage::for_descriptor(descriptor)))
            .collect();

        // One pass over the records feeds every declared index.
        for record in &records {
            for (descriptor, storage) in &mut built {
                storage.add(table.index_key(descriptor, record), Rc::clone(record));
            }
        }

        let indexes = built
            .into_iter()
            .map(|(descriptor, storage)| (descriptor.name, storage))
            .collect();

        Ok(Self { records, indexes })
    }

    /// The materialized snapshot, in population order. This is the explicit
    /// full-scan path.
    #[must_use]
    pub fn records(&self) -> &[Rc<T>] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The named secondary index storage.
    ///
    /// The set of valid names is fixed when the table's indexes are
    /// declared, so an unknown name signals a bug in index wiring and
    /// panics rather than degrading silently.
    #[must_use]
    pub fn index_storage(&self, name: &str) -> &IndexStorage<Rc<T>> {
        self.indexes.get(name).map_or_else(
            || panic!("unknown index name: {name}"),
            |storage| storage,
        )
    }

    /// Row sequence for an index lookup over this slot.
    #[must_use]
    pub fn index_rows<'a, H>(&'a self, table: &'a H, lookup: &'a IndexLookup) -> IndexScanRows<'a, H>
    where
        H: CatalogTable<Record = T>,
    {
        IndexScanRows::new(table, self.index_storage(lookup.index.name), lookup)
    }

    /// Row sequence over the full snapshot.
    #[must_use]
    pub fn table_rows<'a, H>(&'a self, table: &'a H) -> TableScanRows<'a, H>
    where
        H: CatalogTable<Record = T>,
    {
        TableScanRows::new(table, &self.records)
    }
}

///
/// CatalogCache
///
/// Per-query cache of table slots, tagged with the process identity it was
/// created under. Exclusively owned by one query execution; that ownership
/// rule substitutes for locking and is relied on, not enforced.
///

pub struct CatalogCache {
    pid: ProcessId,
    slots: HashMap<&'static str, Rc<dyn Any>>,
}

impl CatalogCache {
    fn new(pid: ProcessId) -> Self {
        Self {
            pid,
            slots: HashMap::new(),
        }
    }

    #[must_use]
    pub const fn process_id(&self) -> ProcessId {
        self.pid
    }

    #[must_use]
    pub fn is_populated(&self, table_name: &str) -> bool {
        self.slots.contains_key(table_name)
    }

    /// The slot for this table, populating it on first access.
    ///
    /// Population runs the handler's enumeration walk to completion and
    /// builds every declared index before the slot becomes visible. On
    /// failure nothing is inserted; a later access within the same query
    /// re-runs population from scratch.
    pub fn table<H>(&mut self, table: &H) -> Result<Rc<TableSlot<H::Record>>, InternalError>
    where
        H: CatalogTable,
    {
        let name = table.descriptor().name;

        if let Some(slot) = self.slots.get(name) {
            return Rc::clone(slot)
                .downcast::<TableSlot<H::Record>>()
                .map_err(|_| SlotError::RecordTypeMismatch(name).into());
        }

        let slot = Rc::new(TableSlot::build(table)?);
        sink::record(MetricsEvent::TablePopulated {
            table: name,
            records: slot.records.len() as u64,
            indexes: slot.indexes.len() as u64,
        });
        self.slots.insert(name, Rc::clone(&slot) as Rc<dyn Any>);

        Ok(slot)
    }
}

///
/// CatalogSession
///
/// Explicit per-session owner of the query-scoped cache. The engine passes
/// this scope down to every call that needs catalog data; there is no
/// ambient or global cache state.
///

#[derive(Default)]
pub struct CatalogSession {
    cache: Option<CatalogCache>,
}

impl CatalogSession {
    #[must_use]
    pub const fn new() -> Self {
        Self { cache: None }
    }

    /// The cache for this query identity.
    ///
    /// Returns the held cache when the identity matches; otherwise the
    /// previous cache is discarded wholesale and a fresh, empty cache is
    /// installed under the new identity. No slot data migrates across the
    /// boundary.
    pub fn acquire(&mut self, pid: ProcessId) -> &mut CatalogCache {
        let fresh = !matches!(&self.cache, Some(cache) if cache.process_id() == pid);
        if fresh {
            self.cache = Some(CatalogCache::new(pid));
        }
        sink::record(MetricsEvent::CacheAcquired { fresh });

        self.cache.get_or_insert_with(|| CatalogCache::new(pid))
    }
}

///
/// TESTS
///
