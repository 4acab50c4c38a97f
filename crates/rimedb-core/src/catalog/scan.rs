//! Module: catalog::scan
//! Responsibility: sequencing a lookup's key ranges into one lazy ordered
//! record stream, and the pull-based row interfaces built on top of it.
//! Does not own: storage layout or slot population.

use crate::{
    catalog::{
        key::KeyRange,
        lookup::IndexLookup,
        source::CatalogTable,
        store::{IndexStorage, StorageScan},
    },
    error::InternalError,
    obs::sink::{self, MetricsEvent, ScanKind},
    value::Row,
};
use std::{rc::Rc, slice};

///
/// IndexScan
///
/// Forward-only sequence of stored records matching an ordered list of key
/// ranges. Ranges are serviced strictly in list order, one at a time; at
/// most one storage traversal is in flight per scan. A range with neither
/// bound cannot be serviced by this index family and yields zero records.
/// Not restartable; traversal is synchronous and pulls one record per
/// `next`, so an abandoned scan holds no resources beyond its borrow.
///

pub struct IndexScan<'a, T> {
    storage: &'a IndexStorage<T>,
    ranges: &'a [KeyRange],
    cursor: usize,
    active: Option<StorageScan<'a, T>>,
    closed: bool,
}

impl<'a, T> IndexScan<'a, T> {
    #[must_use]
    pub const fn new(storage: &'a IndexStorage<T>, ranges: &'a [KeyRange]) -> Self {
        Self {
            storage,
            ranges,
            cursor: 0,
            active: None,
            closed: false,
        }
    }

    /// Next matching record, or `None` once every range is exhausted.
    pub fn next(&mut self) -> Option<&'a T> {
        if self.closed {
            return None;
        }

        loop {
            if let Some(active) = self.active.as_mut() {
                match active.next() {
                    Some(record) => return Some(record),
                    None => {
                        self.active = None;
                        self.cursor += 1;
                    }
                }
                continue;
            }

            let range = self.ranges.get(self.cursor)?;
            match (range.lower(), range.upper()) {
                (Some(lower), Some(upper)) => {
                    self.active = Some(self.storage.iter_range(lower, upper));
                }
                (Some(lower), None) => self.active = Some(self.storage.iter_from(lower)),
                (None, Some(upper)) => self.active = Some(self.storage.iter_up_to(upper)),
                (None, None) => {
                    // Unbounded both sides: not serviceable, zero records.
                    self.cursor += 1;
                }
            }
        }
    }

    /// Drop any in-flight traversal and pin the scan at end-of-data.
    /// Safe after partial consumption; idempotent.
    pub fn close(&mut self) {
        self.active = None;
        self.closed = true;
    }
}

///
/// RowIter
///
/// The pull-based row sequence exposed to the surrounding engine. `Ok(None)`
/// is exhaustion, a normal terminal condition distinct from error. `close`
/// releases resources and must be safe after partial consumption.
///

pub trait RowIter {
    fn next_row(&mut self) -> Result<Option<Row>, InternalError>;

    fn close(&mut self);
}

///
/// IndexScanRows
///
/// Row sequence over an index lookup: drives the scan sequence and converts
/// each stored record through the table handler's row conversion.
///

pub struct IndexScanRows<'a, H: CatalogTable> {
    table: &'a H,
    scan: IndexScan<'a, Rc<H::Record>>,
    rows_emitted: u64,
    finished: bool,
}

impl<'a, H: CatalogTable> IndexScanRows<'a, H> {
    #[must_use]
    pub fn new(
        table: &'a H,
        storage: &'a IndexStorage<Rc<H::Record>>,
        lookup: &'a IndexLookup,
    ) -> Self {
        debug_assert_eq!(
            lookup.index.table,
            table.descriptor().name,
            "lookup index does not belong to this table"
        );
        sink::record(MetricsEvent::ScanStarted {
            kind: ScanKind::Index,
            table: table.descriptor().name,
        });

        Self {
            table,
            scan: IndexScan::new(storage, &lookup.ranges),
            rows_emitted: 0,
            finished: false,
        }
    }

    fn finish(&mut self) {
        if !self.finished {
            self.finished = true;
            sink::record(MetricsEvent::RowsScanned {
                table: self.table.descriptor().name,
                rows: self.rows_emitted,
            });
        }
    }
}

impl<H: CatalogTable> RowIter for IndexScanRows<'_, H> {
    fn next_row(&mut self) -> Result<Option<Row>, InternalError> {
        match self.scan.next() {
            Some(record) => {
                self.rows_emitted += 1;
                Ok(Some(self.table.to_row(record)))
            }
            None => {
                self.finish();
                Ok(None)
            }
        }
    }

    fn close(&mut self) {
        self.scan.close();
        self.finish();
    }
}

///
/// TableScanRows
///
/// Row sequence over a slot's full materialized snapshot, in population
/// order: the explicit full-scan path for callers that need every record.
///

pub struct TableScanRows<'a, H: CatalogTable> {
    table: &'a H,
    records: slice::Iter<'a, Rc<H::Record>>,
    rows_emitted: u64,
    finished: bool,
    closed: bool,
}

impl<'a, H: CatalogTable> TableScanRows<'a, H> {
    #[must_use]
    pub fn new(table: &'a H, records: &'a [Rc<H::Record>]) -> Self {
        sink::record(MetricsEvent::ScanStarted {
            kind: ScanKind::Full,
            table: table.descriptor().name,
        });

        Self {
            table,
            records: records.iter(),
            rows_emitted: 0,
            finished: false,
            closed: false,
        }
    }

    fn finish(&mut self) {
        if !self.finished {
            self.finished = true;
            sink::record(MetricsEvent::RowsScanned {
                table: self.table.descriptor().name,
                rows: self.rows_emitted,
            });
        }
    }
}

impl<H: CatalogTable> RowIter for TableScanRows<'_, H> {
    fn next_row(&mut self) -> Result<Option<Row>, InternalError> {
        if self.closed {
            return Ok(None);
        }

        match self.records.next() {
            Some(record) => {
                self.rows_emitted += 1;
                Ok(Some(self.table.to_row(record)))
            }
            None => {
                self.finish();
                Ok(None)
            }
        }
    }

    fn close(&mut self) {
        self.closed = true;
        self.finish();
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::key::IndexKey;

    fn storage_with(oids: &[u32]) -> IndexStorage<u32> {
        let mut storage = IndexStorage::unique();
        for &oid in oids {
            storage.add(IndexKey::single(oid), oid);
        }

        storage
    }

    fn drain(scan: &mut IndexScan<'_, u32>) -> Vec<u32> {
        let mut out = Vec::new();
        while let Some(record) = scan.next() {
            out.push(*record);
        }

        out
    }

    #[test]
    fn ranges_are_serviced_strictly_in_list_order() {
        let storage = storage_with(&[1, 2, 3, 10, 11, 20]);
        let ranges = vec![
            KeyRange::span(IndexKey::single(10u32), IndexKey::single(12u32)),
            KeyRange::below(IndexKey::single(3u32)),
            KeyRange::at_least(IndexKey::single(20u32)),
        ];

        let mut scan = IndexScan::new(&storage, &ranges);
        assert_eq!(drain(&mut scan), vec![10, 11, 1, 2, 20]);
        assert!(scan.next().is_none());
    }

    #[test]
    fn unbounded_range_yields_zero_records_and_advances() {
        let storage = storage_with(&[5, 6]);
        let ranges = vec![
            KeyRange::unbounded(),
            KeyRange::at_least(IndexKey::single(6u32)),
        ];

        let mut scan = IndexScan::new(&storage, &ranges);
        assert_eq!(drain(&mut scan), vec![6]);
    }

    #[test]
    fn close_pins_the_scan_at_end_of_data() {
        let storage = storage_with(&[1, 2, 3]);
        let ranges = vec![KeyRange::at_least(IndexKey::single(0u32))];

        let mut scan = IndexScan::new(&storage, &ranges);
        assert_eq!(scan.next(), Some(&1));

        scan.close();
        assert!(scan.next().is_none());

        // Idempotent.
        scan.close();
        assert!(scan.next().is_none());
    }

    #[test]
    fn empty_range_list_is_immediately_exhausted() {
        let storage = storage_with(&[1]);
        let ranges: Vec<KeyRange> = Vec::new();

        let mut scan = IndexScan::new(&storage, &ranges);
        assert!(scan.next().is_none());
    }
}
