use crate::{catalog::key::KeyRange, model::IndexDescriptor};

///
/// IndexLookup
///
/// One planner-produced index access: the chosen index plus the ordered,
/// disjoint key ranges the predicate lowered to. Ranges are serviced
/// strictly in list order by the scan sequence.
///

#[derive(Clone, Debug)]
pub struct IndexLookup {
    pub index: &'static IndexDescriptor,
    pub ranges: Vec<KeyRange>,
}

impl IndexLookup {
    #[must_use]
    pub const fn new(index: &'static IndexDescriptor, ranges: Vec<KeyRange>) -> Self {
        Self { index, ranges }
    }
}

///
/// LookupPartition
/// The single partition an index lookup enumerates; keyed by index name.
/// This index family is never physically sharded.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LookupPartition {
    index_name: &'static str,
}

impl LookupPartition {
    #[must_use]
    pub const fn key(&self) -> &'static [u8] {
        self.index_name.as_bytes()
    }
}

///
/// PartitionSequence
/// Yields exactly one partition per lookup, then end-of-data.
///

#[derive(Debug)]
pub struct PartitionSequence {
    partition: LookupPartition,
    used: bool,
}

impl PartitionSequence {
    #[must_use]
    pub const fn for_lookup(lookup: &IndexLookup) -> Self {
        Self {
            partition: LookupPartition {
                index_name: lookup.index.name,
            },
            used: false,
        }
    }
}

impl Iterator for PartitionSequence {
    type Item = LookupPartition;

    fn next(&mut self) -> Option<LookupPartition> {
        if self.used {
            return None;
        }
        self.used = true;

        Some(self.partition)
    }
}

///
/// TESTS
///
