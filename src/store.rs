// src/store.rs

use serde::Serialize;
use std::collections::BTreeMap;

use crate::schema::{Row, Value};

/// Field name → required value. Matching is exact and type-sensitive.
pub type Criteria = BTreeMap<String, Value>;

/// Argument shapes accepted by the convenience entry points.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Position(usize),
    Positions(Vec<usize>),
    Criteria(Criteria),
}

impl From<usize> for Lookup {
    fn from(i: usize) -> Self {
        Lookup::Position(i)
    }
}

impl From<Vec<usize>> for Lookup {
    fn from(v: Vec<usize>) -> Self {
        Lookup::Positions(v)
    }
}

impl From<Criteria> for Lookup {
    fn from(c: Criteria) -> Self {
        Lookup::Criteria(c)
    }
}

/// Coerced rows in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RowStore {
    rows: Vec<Row>,
}

impl RowStore {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    pub fn row_at(&self, position: usize) -> Option<&Row> {
        self.rows.get(position)
    }

    /// Rows at the in-bounds `positions`, in the order given.
    pub fn rows_at(&self, positions: &[usize]) -> Vec<&Row> {
        positions.iter().filter_map(|&i| self.rows.get(i)).collect()
    }

    pub fn row_matching(&self, criteria: &Criteria) -> Option<&Row> {
        self.rows.iter().find(|r| matches(r, criteria))
    }

    pub fn rows_matching(&self, criteria: &Criteria) -> Vec<&Row> {
        self.rows.iter().filter(|r| matches(r, criteria)).collect()
    }

    /// Single-row lookup by position or criteria. A list of positions is
    /// not a single-row shape and yields `None`.
    pub fn row(&self, lookup: &Lookup) -> Option<&Row> {
        match lookup {
            Lookup::Position(i) => self.row_at(*i),
            Lookup::Criteria(c) => self.row_matching(c),
            Lookup::Positions(_) => None,
        }
    }

    /// Multi-row lookup by positions or criteria. A single position is not
    /// a multi-row shape and yields `None`.
    pub fn rows(&self, lookup: &Lookup) -> Option<Vec<&Row>> {
        match lookup {
            Lookup::Positions(p) => Some(self.rows_at(p)),
            Lookup::Criteria(c) => Some(self.rows_matching(c)),
            Lookup::Position(_) => None,
        }
    }
}

impl<'a> IntoIterator for &'a RowStore {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

fn matches(row: &Row, criteria: &Criteria) -> bool {
    criteria
        .iter()
        .all(|(field, want)| row.get(field) == Some(want))
}
