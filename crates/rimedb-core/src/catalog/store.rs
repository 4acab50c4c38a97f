//! Module: catalog::store
//! Responsibility: ordered index storage over composite keys, with bounded
//! ascending traversal. Does not own: range sequencing or row conversion.

use crate::{catalog::key::IndexKey, model::IndexDescriptor};
use std::{
    collections::{BTreeMap, btree_map},
    ops::Bound,
    slice,
};

///
/// IndexStorage
///
/// B-tree-backed ordered container for one secondary index, abstracting
/// over the unique and non-unique cases behind a single type. A unique
/// store keeps at most one record per distinct key (later inserts replace
/// earlier ones); a multi store groups duplicates per key in insertion
/// order. Storage holds exactly the records inserted since the owning
/// cache slot was built; nothing survives a query-generation change.
///

#[derive(Debug)]
pub struct IndexStorage<T> {
    tree: Tree<T>,
}

#[derive(Debug)]
enum Tree<T> {
    Unique(BTreeMap<IndexKey, T>),
    Multi(BTreeMap<IndexKey, Vec<T>>),
}

impl<T> IndexStorage<T> {
    #[must_use]
    pub const fn unique() -> Self {
        Self {
            tree: Tree::Unique(BTreeMap::new()),
        }
    }

    #[must_use]
    pub const fn multi() -> Self {
        Self {
            tree: Tree::Multi(BTreeMap::new()),
        }
    }

    /// Variant selection from the index's static declaration.
    #[must_use]
    pub const fn for_descriptor(descriptor: &IndexDescriptor) -> Self {
        if descriptor.unique {
            Self::unique()
        } else {
            Self::multi()
        }
    }

    pub fn add(&mut self, key: IndexKey, record: T) {
        match &mut self.tree {
            Tree::Unique(tree) => {
                tree.insert(key, record);
            }
            Tree::Multi(tree) => {
                tree.entry(key).or_default().push(record);
            }
        }
    }

    /// Number of stored records (group members counted individually).
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.tree {
            Tree::Unique(tree) => tree.len(),
            Tree::Multi(tree) => tree.values().map(Vec::len).sum(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match &self.tree {
            Tree::Unique(tree) => tree.is_empty(),
            Tree::Multi(tree) => tree.is_empty(),
        }
    }

    /// Ascending traversal of `lower ≤ key < upper`.
    #[must_use]
    pub fn iter_range<'a>(&'a self, lower: &IndexKey, upper: &IndexKey) -> StorageScan<'a, T> {
        if lower >= upper {
            return StorageScan::empty();
        }

        self.scan((Bound::Included(lower), Bound::Excluded(upper)))
    }

    /// Ascending traversal of `key ≥ lower`, up to the maximum stored key.
    #[must_use]
    pub fn iter_from<'a>(&'a self, lower: &IndexKey) -> StorageScan<'a, T> {
        self.scan((Bound::Included(lower), Bound::Unbounded))
    }

    /// Ascending traversal of `key < upper`, from the minimum stored key.
    #[must_use]
    pub fn iter_up_to<'a>(&'a self, upper: &IndexKey) -> StorageScan<'a, T> {
        self.scan((Bound::Unbounded, Bound::Excluded(upper)))
    }

    fn scan<'a>(&'a self, bounds: (Bound<&IndexKey>, Bound<&IndexKey>)) -> StorageScan<'a, T> {
        let inner = match &self.tree {
            Tree::Unique(tree) => ScanInner::Unique(tree.range(bounds)),
            Tree::Multi(tree) => ScanInner::Multi {
                groups: tree.range(bounds),
                group: slice::Iter::default(),
            },
        };

        StorageScan { inner }
    }
}

///
/// StorageScan
///
/// Lazy ascending cursor over one bounded traversal. For multi stores,
/// records within an equal-key group come out in insertion order,
/// interleaved with other keys by ascending key. Nothing is materialized
/// ahead of the consumer; each `next` advances the underlying tree cursor.
///

pub struct StorageScan<'a, T> {
    inner: ScanInner<'a, T>,
}

enum ScanInner<'a, T> {
    Empty,
    Unique(btree_map::Range<'a, IndexKey, T>),
    Multi {
        groups: btree_map::Range<'a, IndexKey, Vec<T>>,
        group: slice::Iter<'a, T>,
    },
}

impl<T> StorageScan<'_, T> {
    #[must_use]
    const fn empty() -> Self {
        Self {
            inner: ScanInner::Empty,
        }
    }
}

impl<'a, T> Iterator for StorageScan<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        match &mut self.inner {
            ScanInner::Empty => None,
            ScanInner::Unique(range) => range.next().map(|(_, record)| record),
            ScanInner::Multi { groups, group } => loop {
                if let Some(record) = group.next() {
                    return Some(record);
                }
                let (_, next_group) = groups.next()?;
                *group = next_group.iter();
            },
        }
    }
}

///
/// TESTS
///
