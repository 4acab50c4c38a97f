//! Core runtime for RimeDB: query-scoped catalog snapshots, ordered
//! secondary indexes, range-scan sequencing, and the ergonomics exported
//! via the `prelude`.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod catalog;
pub mod error;
pub mod model;
pub mod obs;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// CONSTANTS
///

/// Maximum number of key parts allowed in one index key.
///
/// Catalog indexes cover at most a handful of columns; the limit keeps
/// composite comparisons bounded and simplifies sizing tests in the stores.
pub const MAX_KEY_PARTS: usize = 4;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, stores, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        catalog::{CatalogSession, CatalogTable, IndexKey, KeyPart, KeyRange, ProcessId},
        model::{IndexDescriptor, TableDescriptor},
        value::{Row, Value},
    };
}
