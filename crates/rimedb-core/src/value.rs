use serde::{Deserialize, Serialize};
use std::fmt;

///
/// Value
///
/// One typed cell of an output catalog row. The variants cover the cell
/// kinds the catalog views actually emit; arrays of element kinds beyond
/// int2/oid are carried as text, matching the wire rendering.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Value {
    Null,
    Bool(bool),
    /// Single-byte category codes, e.g. constraint and FK action types.
    Char(char),
    Int2(i16),
    Int4(i32),
    Oid(u32),
    /// Identifier cells (`name` in the original schemas).
    Name(String),
    Text(String),
    Int2Array(Vec<i16>),
    OidArray(Vec<u32>),
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Array cells render as null when empty, mirroring catalog semantics
    /// for `conkey`/`confkey`-style columns.
    #[must_use]
    pub fn int2_array_or_null(items: Vec<i16>) -> Self {
        if items.is_empty() {
            Self::Null
        } else {
            Self::Int2Array(items)
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Char(_) => ValueKind::Char,
            Self::Int2(_) => ValueKind::Int2,
            Self::Int4(_) => ValueKind::Int4,
            Self::Oid(_) => ValueKind::Oid,
            Self::Name(_) => ValueKind::Name,
            Self::Text(_) => ValueKind::Text,
            Self::Int2Array(_) => ValueKind::Int2Array,
            Self::OidArray(_) => ValueKind::OidArray,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Char(v) => write!(f, "{v}"),
            Self::Int2(v) => write!(f, "{v}"),
            Self::Int4(v) => write!(f, "{v}"),
            Self::Oid(v) => write!(f, "{v}"),
            Self::Name(v) | Self::Text(v) => write!(f, "{v}"),
            Self::Int2Array(items) => {
                let rendered: Vec<String> = items.iter().map(ToString::to_string).collect();
                write!(f, "{{{}}}", rendered.join(","))
            }
            Self::OidArray(items) => {
                let rendered: Vec<String> = items.iter().map(ToString::to_string).collect();
                write!(f, "{{{}}}", rendered.join(","))
            }
        }
    }
}

///
/// ValueKind
/// Column type tag used by static table descriptors.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ValueKind {
    Null,
    Bool,
    Char,
    Int2,
    Int4,
    Oid,
    Name,
    Text,
    Int2Array,
    OidArray,
}

///
/// Row
///
/// One output row tuple: the shape produced by a table's row conversion
/// and consumed by the surrounding engine.
///

#[derive(
    Clone,
    Debug,
    Default,
    Deserialize,
    Eq,
    PartialEq,
    Serialize,
    derive_more::Deref,
    derive_more::IntoIterator,
)]
pub struct Row(Vec<Value>);

impl Row {
    #[must_use]
    pub const fn new(cells: Vec<Value>) -> Self {
        Self(cells)
    }

    #[must_use]
    pub fn cell(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }
}

impl From<Vec<Value>> for Row {
    fn from(cells: Vec<Value>) -> Self {
        Self(cells)
    }
}

///
/// TESTS
///
