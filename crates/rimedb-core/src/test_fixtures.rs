//! Shared fake catalog tables for cache and scan tests: small in-memory
//! object lists with deterministic OIDs, standing in for the excluded
//! per-table handlers.

use crate::{
    catalog::{CatalogTable, IndexKey},
    error::InternalError,
    model::{ColumnModel, IndexDescriptor, TableDescriptor},
    value::{Row, Value, ValueKind},
};
use std::cell::Cell;

///
/// Namespace fixtures
///

#[derive(Clone, Debug)]
pub(crate) struct Namespace {
    pub oid: u32,
    pub name: String,
    pub owner: u32,
}

const NAMESPACE_COLUMNS: &[ColumnModel] = &[
    ColumnModel::new("oid", ValueKind::Oid, false),
    ColumnModel::new("nspname", ValueKind::Name, false),
    ColumnModel::new("nspowner", ValueKind::Oid, false),
];

pub(crate) const NAMESPACE_TABLE: TableDescriptor =
    TableDescriptor::new("pg_namespace", "pg_catalog", NAMESPACE_COLUMNS);

pub(crate) const NAMESPACE_OID_INDEX: IndexDescriptor = IndexDescriptor::new(
    "pg_namespace_oid_index",
    "pg_namespace",
    "pg_catalog",
    true,
    &["pg_namespace.oid"],
);

pub(crate) const NAMESPACE_NAME_INDEX: IndexDescriptor = IndexDescriptor::new(
    "pg_namespace_nspname_index",
    "pg_namespace",
    "pg_catalog",
    true,
    &["pg_namespace.nspname"],
);

const NAMESPACE_INDEXES: &[IndexDescriptor] = &[NAMESPACE_OID_INDEX, NAMESPACE_NAME_INDEX];

pub(crate) struct NamespaceTable {
    namespaces: Vec<Namespace>,
    populate_calls: Cell<u32>,
    fail_next: Cell<bool>,
}

impl NamespaceTable {
    pub(crate) fn sample() -> Self {
        Self {
            namespaces: vec![
                Namespace {
                    oid: 11,
                    name: "pg_catalog".into(),
                    owner: 10,
                },
                Namespace {
                    oid: 2200,
                    name: "public".into(),
                    owner: 10,
                },
                Namespace {
                    oid: 13183,
                    name: "information_schema".into(),
                    owner: 10,
                },
            ],
            populate_calls: Cell::new(0),
            fail_next: Cell::new(false),
        }
    }

    pub(crate) fn fail_next_population(&self) {
        self.fail_next.set(true);
    }

    pub(crate) fn populate_calls(&self) -> u32 {
        self.populate_calls.get()
    }
}

impl CatalogTable for NamespaceTable {
    type Record = Namespace;

    fn descriptor(&self) -> &'static TableDescriptor {
        &NAMESPACE_TABLE
    }

    fn indexes(&self) -> &'static [IndexDescriptor] {
        NAMESPACE_INDEXES
    }

    fn populate(&self, emit: &mut dyn FnMut(Namespace)) -> Result<(), InternalError> {
        self.populate_calls.set(self.populate_calls.get() + 1);
        if self.fail_next.replace(false) {
            return Err(InternalError::source_internal(
                "schema enumeration aborted mid-walk",
            ));
        }

        for namespace in &self.namespaces {
            emit(namespace.clone());
        }

        Ok(())
    }

    fn index_key(&self, index: &IndexDescriptor, record: &Namespace) -> IndexKey {
        match index.name {
            "pg_namespace_oid_index" => IndexKey::single(record.oid),
            "pg_namespace_nspname_index" => IndexKey::single(record.name.as_str()),
            name => panic!("unknown index name: {name}"),
        }
    }

    fn to_row(&self, record: &Namespace) -> Row {
        Row::new(vec![
            Value::Oid(record.oid),
            Value::Name(record.name.clone()),
            Value::Oid(record.owner),
        ])
    }
}

///
/// Constraint fixtures
///

#[derive(Clone, Debug)]
pub(crate) struct Constraint {
    pub oid: u32,
    pub name: String,
    pub table_oid: u32,
    pub type_id: i16,
}

const CONSTRAINT_COLUMNS: &[ColumnModel] = &[
    ColumnModel::new("oid", ValueKind::Oid, false),
    ColumnModel::new("conname", ValueKind::Name, false),
    ColumnModel::new("conrelid", ValueKind::Oid, false),
    ColumnModel::new("contypid", ValueKind::Int2, false),
];

pub(crate) const CONSTRAINT_TABLE: TableDescriptor =
    TableDescriptor::new("pg_constraint", "pg_catalog", CONSTRAINT_COLUMNS);

pub(crate) const CONSTRAINT_OID_INDEX: IndexDescriptor = IndexDescriptor::new(
    "pg_constraint_oid_index",
    "pg_constraint",
    "pg_catalog",
    true,
    &["pg_constraint.oid"],
);

pub(crate) const CONSTRAINT_RELID_TYPE_INDEX: IndexDescriptor = IndexDescriptor::new(
    "pg_constraint_conrelid_contypid_index",
    "pg_constraint",
    "pg_catalog",
    false,
    &["pg_constraint.conrelid", "pg_constraint.contypid"],
);

const CONSTRAINT_INDEXES: &[IndexDescriptor] = &[CONSTRAINT_OID_INDEX, CONSTRAINT_RELID_TYPE_INDEX];

pub(crate) struct ConstraintTable {
    constraints: Vec<Constraint>,
}

impl ConstraintTable {
    /// Two constraints sharing the (300, 0) key, one at (301, 5).
    pub(crate) fn sample() -> Self {
        Self {
            constraints: vec![
                Constraint {
                    oid: 5001,
                    name: "orders_pkey".into(),
                    table_oid: 300,
                    type_id: 0,
                },
                Constraint {
                    oid: 5002,
                    name: "orders_customer_fkey".into(),
                    table_oid: 300,
                    type_id: 0,
                },
                Constraint {
                    oid: 5003,
                    name: "customers_pkey".into(),
                    table_oid: 301,
                    type_id: 5,
                },
            ],
        }
    }
}

impl CatalogTable for ConstraintTable {
    type Record = Constraint;

    fn descriptor(&self) -> &'static TableDescriptor {
        &CONSTRAINT_TABLE
    }

    fn indexes(&self) -> &'static [IndexDescriptor] {
        CONSTRAINT_INDEXES
    }

    fn populate(&self, emit: &mut dyn FnMut(Constraint)) -> Result<(), InternalError> {
        for constraint in &self.constraints {
            emit(constraint.clone());
        }

        Ok(())
    }

    fn index_key(&self, index: &IndexDescriptor, record: &Constraint) -> IndexKey {
        match index.name {
            "pg_constraint_oid_index" => IndexKey::single(record.oid),
            "pg_constraint_conrelid_contypid_index" => {
                IndexKey::pair(record.table_oid, i64::from(record.type_id))
            }
            name => panic!("unknown index name: {name}"),
        }
    }

    fn to_row(&self, record: &Constraint) -> Row {
        Row::new(vec![
            Value::Oid(record.oid),
            Value::Name(record.name.clone()),
            Value::Oid(record.table_oid),
            Value::Int2(record.type_id),
        ])
    }
}
