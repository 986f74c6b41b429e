// src/manifest.rs

use serde::Serialize;

use crate::schema::{Dialect, Field, Row};
use crate::store::{Criteria, Lookup, RowStore};

/// A parsed image database: typed schema plus its rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Manifest {
    dialect: Dialect,
    fields: Vec<Field>,
    layers: Vec<String>,
    channels: Vec<String>,
    rows: RowStore,
}

impl Manifest {
    pub(crate) fn new(
        dialect: Dialect,
        fields: Vec<Field>,
        rows: Vec<Row>,
        layers: Vec<String>,
        channels: Vec<String>,
    ) -> Self {
        Self {
            dialect,
            fields,
            layers,
            channels,
            rows: RowStore::new(rows),
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Distinct layer identifiers, first-seen order. Empty unless the
    /// dialect is `Cis`.
    pub fn layers(&self) -> &[String] {
        &self.layers
    }

    /// Distinct channel identifiers, first-seen order. Empty unless the
    /// dialect is `Cis`.
    pub fn channels(&self) -> &[String] {
        &self.channels
    }

    pub fn rows(&self) -> &RowStore {
        &self.rows
    }

    pub fn row_at(&self, position: usize) -> Option<&Row> {
        self.rows.row_at(position)
    }

    pub fn rows_at(&self, positions: &[usize]) -> Vec<&Row> {
        self.rows.rows_at(positions)
    }

    pub fn row_matching(&self, criteria: &Criteria) -> Option<&Row> {
        self.rows.row_matching(criteria)
    }

    pub fn rows_matching(&self, criteria: &Criteria) -> Vec<&Row> {
        self.rows.rows_matching(criteria)
    }

    pub fn row(&self, lookup: impl Into<Lookup>) -> Option<&Row> {
        self.rows.row(&lookup.into())
    }

    pub fn rows_for(&self, lookup: impl Into<Lookup>) -> Option<Vec<&Row>> {
        self.rows.rows(&lookup.into())
    }
}
