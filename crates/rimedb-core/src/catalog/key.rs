//! Module: catalog::key
//! Responsibility: composite ordered keys and the range shapes built over
//! them. Does not own: storage traversal or range sequencing.

use crate::MAX_KEY_PARTS;
use std::cmp::Ordering;

///
/// KeyPart
///
/// One orderable component of an index key: a native numeric identifier or
/// a name string. Catalog index columns are schema-guaranteed non-null, so
/// there is no null part and no sentinel ordering.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum KeyPart {
    Oid(u32),
    Int(i64),
    Text(String),
}

impl KeyPart {
    /// Smallest value of the same variant; the explicit floor for callers
    /// that need a "from the beginning" lower bound.
    #[must_use]
    pub const fn min_of(&self) -> Self {
        match self {
            Self::Oid(_) => Self::Oid(0),
            Self::Int(_) => Self::Int(i64::MIN),
            Self::Text(_) => Self::Text(String::new()),
        }
    }

    /// Immediate successor in this part's value space, used to lower a
    /// closed planner bound to the exclusive upper bound storage expects.
    /// Returns `None` at a numeric maximum; callers then drop the upper
    /// bound instead (an unbounded-above traversal is a superset).
    #[must_use]
    pub fn successor(&self) -> Option<Self> {
        match self {
            Self::Oid(v) => v.checked_add(1).map(Self::Oid),
            Self::Int(v) => v.checked_add(1).map(Self::Int),
            Self::Text(v) => {
                let mut next = v.clone();
                next.push('\0');
                Some(Self::Text(next))
            }
        }
    }

    const fn tag(&self) -> u8 {
        match self {
            Self::Oid(_) => 0,
            Self::Int(_) => 1,
            Self::Text(_) => 2,
        }
    }
}

impl Ord for KeyPart {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Oid(a), Self::Oid(b)) => a.cmp(b),
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            _ => {
                // Parts at one key position must share a variant; a mismatch
                // is a key-extraction bug in the table handler. Variant-tag
                // order keeps the comparator total in release builds.
                debug_assert!(
                    false,
                    "key parts of different variants compared: {self:?} vs {other:?}"
                );
                self.tag().cmp(&other.tag())
            }
        }
    }
}

impl PartialOrd for KeyPart {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<u32> for KeyPart {
    fn from(value: u32) -> Self {
        Self::Oid(value)
    }
}

impl From<i64> for KeyPart {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for KeyPart {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

///
/// IndexKey
///
/// Composite key compared part-by-part, lexicographically. Keys on one
/// index always carry the same arity and per-position variants.
///

#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct IndexKey(Vec<KeyPart>);

impl IndexKey {
    #[must_use]
    pub fn new(parts: Vec<KeyPart>) -> Self {
        debug_assert!(
            !parts.is_empty() && parts.len() <= MAX_KEY_PARTS,
            "index key arity out of bounds: {}",
            parts.len()
        );

        Self(parts)
    }

    #[must_use]
    pub fn single(part: impl Into<KeyPart>) -> Self {
        Self::new(vec![part.into()])
    }

    #[must_use]
    pub fn pair(first: impl Into<KeyPart>, second: impl Into<KeyPart>) -> Self {
        Self::new(vec![first.into(), second.into()])
    }

    #[must_use]
    pub fn parts(&self) -> &[KeyPart] {
        &self.0
    }

    /// Immediate successor in the full key space: the successor of the last
    /// part, keeping the prefix. `None` when the last part has no successor;
    /// callers then use an unbounded upper bound.
    #[must_use]
    pub fn successor(&self) -> Option<Self> {
        let (last, prefix) = self.0.split_last()?;
        let mut parts = prefix.to_vec();
        parts.push(last.successor()?);

        Some(Self(parts))
    }
}

///
/// KeyRange
///
/// Optional inclusive lower bound plus optional exclusive upper bound, as
/// handed over by the planner. A range with neither bound cannot be
/// serviced by this index family and yields zero records.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KeyRange {
    lower: Option<IndexKey>,
    upper: Option<IndexKey>,
}

impl KeyRange {
    #[must_use]
    pub const fn new(lower: Option<IndexKey>, upper: Option<IndexKey>) -> Self {
        Self { lower, upper }
    }

    /// `lower ≤ key < upper`.
    #[must_use]
    pub const fn span(lower: IndexKey, upper: IndexKey) -> Self {
        Self::new(Some(lower), Some(upper))
    }

    /// `key ≥ lower`.
    #[must_use]
    pub const fn at_least(lower: IndexKey) -> Self {
        Self::new(Some(lower), None)
    }

    /// `key < upper`.
    #[must_use]
    pub const fn below(upper: IndexKey) -> Self {
        Self::new(None, Some(upper))
    }

    /// Exactly `key`: a half-open span ending at the key's successor, or
    /// unbounded above when no successor exists.
    #[must_use]
    pub fn point(key: IndexKey) -> Self {
        let upper = key.successor();

        Self::new(Some(key), upper)
    }

    /// No bounds on either side; yields zero records when scanned.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self::new(None, None)
    }

    #[must_use]
    pub const fn lower(&self) -> Option<&IndexKey> {
        self.lower.as_ref()
    }

    #[must_use]
    pub const fn upper(&self) -> Option<&IndexKey> {
        self.upper.as_ref()
    }

    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.lower.is_none() && self.upper.is_none()
    }

    /// Whether the bounds encode an empty traversal envelope. Unbounded
    /// sides are never empty by construction.
    #[must_use]
    pub fn is_empty_envelope(&self) -> bool {
        match (&self.lower, &self.upper) {
            (Some(lower), Some(upper)) => lower >= upper,
            _ => false,
        }
    }
}

///
/// TESTS
///
