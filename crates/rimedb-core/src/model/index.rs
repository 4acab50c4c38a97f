use std::fmt::{self, Display};

///
/// IndexDescriptor
/// Static planner-facing descriptor for one secondary index on a catalog
/// table. Declared at compile time; one descriptor per index per table.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct IndexDescriptor {
    pub name: &'static str,
    pub table: &'static str,
    pub database: &'static str,
    pub unique: bool,
    /// Indexed column expressions in key order, e.g. `pg_constraint.conname`.
    pub expressions: &'static [&'static str],
}

impl IndexDescriptor {
    #[must_use]
    pub const fn new(
        name: &'static str,
        table: &'static str,
        database: &'static str,
        unique: bool,
        expressions: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            table,
            database,
            unique,
            expressions,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> IndexKind {
        IndexKind::BTree
    }

    /// This index family claims support for every key range over its covered
    /// columns; correctness is deferred entirely to the key comparator.
    #[must_use]
    pub const fn can_support_range(&self) -> bool {
        true
    }

    /// Order-by satisfaction over covered columns is always claimed.
    #[must_use]
    pub const fn can_support_order_by(&self, _expression: &str) -> bool {
        true
    }

    #[must_use]
    pub const fn comment(&self) -> &'static str {
        ""
    }

    /// Per-column prefix lengths; catalog indexes never use them.
    #[must_use]
    pub fn prefix_lengths(&self) -> Vec<u16> {
        vec![0; self.expressions.len()]
    }
}

impl Display for IndexDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let expressions = self.expressions.join(", ");

        if self.unique {
            write!(f, "UNIQUE {}({})", self.name, expressions)
        } else {
            write!(f, "{}({})", self.name, expressions)
        }
    }
}

///
/// IndexKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IndexKind {
    BTree,
}

impl Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BTree => write!(f, "BTREE"),
        }
    }
}

///
/// TESTS
///
