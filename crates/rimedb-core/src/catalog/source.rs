use crate::{
    catalog::key::IndexKey,
    error::InternalError,
    model::{IndexDescriptor, TableDescriptor},
    value::Row,
};
use std::fmt::{self, Display};

///
/// ProcessId
///
/// Opaque identity of one query execution, stable for the query's lifetime.
/// The cache uses it as its generation key: a different identity at acquire
/// time discards the whole cache.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ProcessId(u64);

impl ProcessId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

///
/// CatalogTable
///
/// The seam for the excluded per-table handlers. Each implementation
/// supplies the static schema, the declared secondary indexes, a
/// callback-driven enumeration of all catalog objects of its kind within
/// the current database, key extraction for every declared index, and
/// conversion from one stored record to an output row.
///

pub trait CatalogTable {
    type Record: 'static;

    fn descriptor(&self) -> &'static TableDescriptor;

    /// Declared secondary indexes; fixed at compile time. Every name here
    /// is a valid argument to the populated slot's storage lookup, and no
    /// other name is.
    fn indexes(&self) -> &'static [IndexDescriptor];

    /// Walk all catalog objects of this table's kind, emitting one record
    /// per object. A returned error aborts population; the cache then
    /// leaves the slot unpopulated so a later access retries from scratch.
    fn populate(&self, emit: &mut dyn FnMut(Self::Record)) -> Result<(), InternalError>;

    /// Extract the key this record sorts under in the given declared index.
    fn index_key(&self, index: &IndexDescriptor, record: &Self::Record) -> IndexKey;

    /// Convert one stored record to an output row. Invoked by the scan's
    /// consumer, one record at a time.
    fn to_row(&self, record: &Self::Record) -> Row;
}
