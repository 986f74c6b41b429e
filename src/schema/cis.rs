//! Reserved-vocabulary manifests (`CISVersion`, `CISImage`, ...).
//!
//! Pass 1 assigns every column a tag, picks the dialect and splices in the
//! defaulted geometry columns. Pass 2 walks the rows once, coercing cells and
//! folding range/option statistics, then freezes the fields.

use tracing::debug;

use super::derive::{infer_column, int_cell, is_file_column, str_cell, to_boolean};
use super::domain::{Distinct, RangeStats};
use super::{Dialect, Domain, Field, FieldType, Row, Value};
use crate::manifest::Manifest;
use crate::table::RawTable;

pub const VERSION: &str = "CISVersion";
pub const IMAGE: &str = "CISImage";
pub const LAYER: &str = "CISLayer";
pub const CHANNEL: &str = "CISChannel";
pub const IMAGE_WIDTH: &str = "CISImageWidth";
pub const IMAGE_HEIGHT: &str = "CISImageHeight";
pub const LAYER_WIDTH: &str = "CISLayerWidth";
pub const LAYER_HEIGHT: &str = "CISLayerHeight";
pub const LAYER_OFFSET_X: &str = "CISLayerOffsetX";
pub const LAYER_OFFSET_Y: &str = "CISLayerOffsetY";
pub const CHANNEL_VAR: &str = "CISChannelVar";
pub const CHANNEL_VAR_TYPE: &str = "CISChannelVarType";
pub const CHANNEL_VAR_MIN: &str = "CISChannelVarMin";
pub const CHANNEL_VAR_MAX: &str = "CISChannelVarMax";
pub const CHANNEL_COLORMAP: &str = "CISChannelColormap";

/// All six must be present for the structured dialect.
const REQUIRED: [&str; 6] = [VERSION, IMAGE, LAYER, CHANNEL, IMAGE_WIDTH, IMAGE_HEIGHT];

/// Synthesized when absent, in this order.
const DEFAULTED: [(&str, FieldType); 5] = [
    (LAYER_WIDTH, FieldType::LayerWidth),
    (LAYER_HEIGHT, FieldType::LayerHeight),
    (LAYER_OFFSET_X, FieldType::LayerOffsetX),
    (LAYER_OFFSET_Y, FieldType::LayerOffsetY),
    (CHANNEL_VAR_TYPE, FieldType::ChannelDatatype),
];

const DEFAULT_DATATYPE: &str = "float";

fn reserved(name: &str) -> Option<FieldType> {
    Some(match name {
        VERSION => FieldType::Version,
        IMAGE => FieldType::ImageId,
        LAYER => FieldType::LayerId,
        CHANNEL => FieldType::ChannelId,
        IMAGE_WIDTH => FieldType::ImageWidth,
        IMAGE_HEIGHT => FieldType::ImageHeight,
        LAYER_WIDTH => FieldType::LayerWidth,
        LAYER_HEIGHT => FieldType::LayerHeight,
        LAYER_OFFSET_X => FieldType::LayerOffsetX,
        LAYER_OFFSET_Y => FieldType::LayerOffsetY,
        CHANNEL_VAR => FieldType::ChannelName,
        CHANNEL_VAR_TYPE => FieldType::ChannelDatatype,
        CHANNEL_VAR_MIN => FieldType::ChannelMin,
        CHANNEL_VAR_MAX => FieldType::ChannelMax,
        CHANNEL_COLORMAP => FieldType::ChannelColormap,
        _ => return None,
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Source {
    Column(usize),
    Synthesized,
}

#[derive(Debug)]
struct Provisional {
    name: String,
    ty: FieldType,
    source: Source,
}

/// Pass 1: tag every column and splice in the defaulted ones.
fn classify(table: &RawTable) -> (Vec<Provisional>, Dialect) {
    let mut fields: Vec<Provisional> = table
        .headers
        .iter()
        .enumerate()
        .map(|(col, name)| Provisional {
            name: name.clone(),
            ty: reserved(name).unwrap_or_else(|| infer_column(table, col, name)),
            source: Source::Column(col),
        })
        .collect();

    let present = |name: &str| table.headers.iter().any(|h| h == name);
    let dialect = if REQUIRED.iter().all(|&n| present(n)) {
        Dialect::Cis
    } else {
        Dialect::SpecD
    };
    debug!(?dialect, columns = fields.len(), "classified header");

    if dialect == Dialect::Cis {
        let mut at = fields
            .iter()
            .position(|f| is_file_column(&f.name))
            .unwrap_or(fields.len());
        for (name, ty) in DEFAULTED {
            if !present(name) {
                debug!(column = name, position = at, "synthesizing default column");
                fields.insert(
                    at,
                    Provisional {
                        name: name.to_string(),
                        ty,
                        source: Source::Synthesized,
                    },
                );
                at += 1;
            }
        }
    }

    (fields, dialect)
}

enum Accumulator {
    Range(RangeStats),
    Options(Distinct),
    Nothing,
}

impl Accumulator {
    fn for_type(ty: &FieldType) -> Self {
        match ty {
            FieldType::Range => Accumulator::Range(RangeStats::default()),
            FieldType::Select => Accumulator::Options(Distinct::default()),
            _ => Accumulator::Nothing,
        }
    }

    fn fold(&mut self, value: &Value) {
        match (self, value) {
            (Accumulator::Range(stats), Value::Int(v)) => stats.observe(*v),
            (Accumulator::Options(opts), Value::Str(s)) => opts.insert(s),
            _ => {}
        }
    }

    fn finish(self) -> Domain {
        match self {
            Accumulator::Range(stats) => stats.finish(),
            Accumulator::Options(opts) => Domain::Options {
                options: opts.into_vec(),
            },
            Accumulator::Nothing => Domain::None,
        }
    }
}

/// Parse a reserved-vocabulary table into a manifest.
pub fn parse(table: &RawTable) -> Manifest {
    let (provisional, dialect) = classify(table);

    let column_of = |name: &str| table.headers.iter().position(|h| h == name);
    let image_width = column_of(IMAGE_WIDTH);
    let image_height = column_of(IMAGE_HEIGHT);

    let mut accumulators: Vec<Accumulator> = provisional
        .iter()
        .map(|p| Accumulator::for_type(&p.ty))
        .collect();
    let mut layers = Distinct::default();
    let mut channels = Distinct::default();

    // Pass 2: coerce and fold.
    let mut rows = Vec::with_capacity(table.rows.len());
    for r in 0..table.rows.len() {
        let cell = |col: Option<usize>| col.and_then(|c| table.cell(r, c));

        let row: Row = provisional
            .iter()
            .zip(accumulators.iter_mut())
            .map(|(field, acc)| {
                let raw = match field.source {
                    Source::Column(c) => table.cell(r, c),
                    Source::Synthesized => None,
                };

                let value = match (&field.ty, field.source) {
                    (FieldType::Boolean, _) => Value::Bool(to_boolean(raw)),
                    (FieldType::LayerWidth, Source::Synthesized) => int_cell(cell(image_width)),
                    (FieldType::LayerHeight, Source::Synthesized) => int_cell(cell(image_height)),
                    (FieldType::LayerOffsetX | FieldType::LayerOffsetY, Source::Synthesized) => {
                        Value::Int(0)
                    }
                    (FieldType::ChannelDatatype, Source::Synthesized) => {
                        Value::from(DEFAULT_DATATYPE)
                    }
                    (ty, _) if ty.is_integer() => int_cell(raw),
                    (FieldType::LayerId, _) => {
                        if let (Dialect::Cis, Some(id)) = (dialect, raw) {
                            layers.insert(id);
                        }
                        str_cell(raw)
                    }
                    (FieldType::ChannelId, _) => {
                        if let (Dialect::Cis, Some(id)) = (dialect, raw) {
                            channels.insert(id);
                        }
                        str_cell(raw)
                    }
                    _ => str_cell(raw),
                };

                acc.fold(&value);
                (field.name.clone(), value)
            })
            .collect();
        rows.push(row);
    }

    let fields: Vec<Field> = provisional
        .into_iter()
        .zip(accumulators)
        .map(|(p, acc)| Field::new(p.name, p.ty).with_domain(acc.finish()))
        .collect();

    Manifest::new(dialect, fields, rows, layers.into_vec(), channels.into_vec())
}
