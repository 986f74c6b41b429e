//! Manifests whose headers carry their own type: `theta[RANGE|0:360]`,
//! `shading[RADIO|flat:smooth]`, `outline[CHECK]`, `FILEimage`.

use tracing::debug;

use super::derive::{int_cell, is_file_column, parse_int, str_cell, to_boolean};
use super::{Dialect, Domain, Field, FieldType, Row, Value};
use crate::error::{ReadError, Result};
use crate::manifest::Manifest;
use crate::table::RawTable;

/// What a single header cell declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    Range { lo: Option<i64>, hi: Option<i64> },
    Radio { options: Vec<String> },
    Check,
    File,
    Other(String),
}

impl Annotation {
    fn field_type(&self) -> FieldType {
        match self {
            Annotation::Range { .. } => FieldType::Range,
            Annotation::Radio { .. } => FieldType::Radio,
            Annotation::Check => FieldType::Check,
            Annotation::File => FieldType::File,
            Annotation::Other(ty) => FieldType::Other(ty.clone()),
        }
    }

    fn domain(&self) -> Domain {
        match self {
            Annotation::Range { lo, hi } => Domain::Span {
                start: *lo,
                end: *hi,
            },
            Annotation::Radio { options } => Domain::Options {
                options: options.clone(),
            },
            _ => Domain::None,
        }
    }
}

/// Parse `NAME`, `NAME[TYPE]` or `NAME[TYPE|v1:v2:...]`.
///
/// An unbracketed name must start with `FILE`. An opening bracket without a
/// closing one is malformed. Text after `]` is ignored.
pub fn parse_header_cell(cell: &str) -> Result<(String, Annotation)> {
    let Some((name, rest)) = cell.split_once('[') else {
        return if is_file_column(cell) {
            Ok((cell.to_string(), Annotation::File))
        } else {
            Err(ReadError::MalformedHeader)
        };
    };
    let (inner, _) = rest.split_once(']').ok_or(ReadError::MalformedHeader)?;

    let (ty, values) = match inner.split_once('|') {
        Some((ty, values)) => (ty, Some(values.split(':').collect::<Vec<_>>())),
        None => (inner, None),
    };

    let annotation = match ty {
        "CHECK" => Annotation::Check,
        "FILE" => Annotation::File,
        "RADIO" => Annotation::Radio {
            options: values
                .unwrap_or_default()
                .into_iter()
                .map(str::to_string)
                .collect(),
        },
        "RANGE" => {
            let values = values.unwrap_or_default();
            let bound = |i: usize| values.get(i).copied().and_then(parse_int);
            Annotation::Range {
                lo: bound(0),
                hi: bound(1),
            }
        }
        other => Annotation::Other(other.to_string()),
    };

    Ok((name.to_string(), annotation))
}

/// Parse an annotated table. Any malformed header cell aborts the whole read.
pub fn parse(table: &RawTable) -> Result<Manifest> {
    let header = table
        .headers
        .iter()
        .map(|cell| parse_header_cell(cell))
        .collect::<Result<Vec<_>>>()?;
    debug!(columns = header.len(), "parsed annotated header");

    let rows: Vec<Row> = (0..table.rows.len())
        .map(|r| {
            header
                .iter()
                .enumerate()
                .map(|(col, (name, annotation))| {
                    let raw = table.cell(r, col);
                    let value = match annotation {
                        Annotation::Check => Value::Bool(to_boolean(raw)),
                        Annotation::Range { .. } => int_cell(raw),
                        _ => str_cell(raw),
                    };
                    (name.clone(), value)
                })
                .collect()
        })
        .collect();

    let fields = header
        .into_iter()
        .map(|(name, annotation)| {
            Field::new(name, annotation.field_type()).with_domain(annotation.domain())
        })
        .collect();

    Ok(Manifest::new(
        Dialect::Annotated,
        fields,
        rows,
        Vec::new(),
        Vec::new(),
    ))
}
