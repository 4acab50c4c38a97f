use std::cell::RefCell;

///
/// CatalogCounters
/// Accumulated counters for cache lifecycle and scan activity.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CatalogCounters {
    pub caches_created: u64,
    pub caches_reused: u64,
    pub tables_populated: u64,
    pub records_materialized: u64,
    pub indexes_built: u64,
    pub index_scans: u64,
    pub full_scans: u64,
    pub rows_scanned: u64,
}

thread_local! {
    static STATE: RefCell<CatalogCounters> = RefCell::new(CatalogCounters::default());
}

pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut CatalogCounters) -> R) -> R {
    STATE.with(|cell| f(&mut cell.borrow_mut()))
}

pub(crate) fn snapshot() -> CatalogCounters {
    STATE.with(|cell| *cell.borrow())
}

pub(crate) fn reset() {
    STATE.with(|cell| *cell.borrow_mut() = CatalogCounters::default());
}
