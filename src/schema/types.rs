// src/schema/types.rs

use serde::{Serialize, Serializer};
use std::{collections::HashMap, fmt};

/// Which header vocabulary governs a table. Computed once per table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Dialect {
    /// Reserved `CIS*` vocabulary with all six mandatory columns.
    #[serde(rename = "CIS")]
    Cis,
    /// Reserved vocabulary incomplete; plain parameter database.
    #[serde(rename = "SpecD")]
    SpecD,
    /// `name[TYPE|a:b]` inline annotations.
    #[serde(rename = "Annotated")]
    Annotated,
}

/// Column type tag. Assigned once while reading the header, never changed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    Version,
    ImageId,
    LayerId,
    ChannelId,
    ImageWidth,
    ImageHeight,
    LayerWidth,
    LayerHeight,
    LayerOffsetX,
    LayerOffsetY,
    ChannelName,
    ChannelDatatype,
    ChannelMin,
    ChannelMax,
    ChannelColormap,
    Boolean,
    Range,
    Select,
    File,
    Check,
    Radio,
    /// Any annotation type the reader has no special handling for.
    Other(String),
}

impl FieldType {
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Version => "VERSION",
            FieldType::ImageId => "IMAGE_ID",
            FieldType::LayerId => "LAYER_ID",
            FieldType::ChannelId => "CHANNEL_ID",
            FieldType::ImageWidth => "IMAGE_WIDTH",
            FieldType::ImageHeight => "IMAGE_HEIGHT",
            FieldType::LayerWidth => "LAYER_WIDTH",
            FieldType::LayerHeight => "LAYER_HEIGHT",
            FieldType::LayerOffsetX => "LAYER_OFFSETX",
            FieldType::LayerOffsetY => "LAYER_OFFSETY",
            FieldType::ChannelName => "CHANNEL_NAME",
            FieldType::ChannelDatatype => "CHANNEL_DATATYPE",
            FieldType::ChannelMin => "CHANNEL_MIN",
            FieldType::ChannelMax => "CHANNEL_MAX",
            FieldType::ChannelColormap => "CHANNEL_COLORMAP",
            FieldType::Boolean => "BOOLEAN",
            FieldType::Range => "RANGE",
            FieldType::Select => "SELECT",
            FieldType::File => "FILE",
            FieldType::Check => "CHECK",
            FieldType::Radio => "RADIO",
            FieldType::Other(s) => s,
        }
    }

    /// Tags whose cells are coerced to integers.
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            FieldType::Range
                | FieldType::ImageWidth
                | FieldType::ImageHeight
                | FieldType::LayerWidth
                | FieldType::LayerHeight
                | FieldType::LayerOffsetX
                | FieldType::LayerOffsetY
        )
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FieldType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Type-dependent metadata attached to a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Domain {
    None,
    /// Bounds and granularity observed in the data.
    Range { min: i64, max: i64, step: i64 },
    /// Bounds declared in an annotated header, unparseable ends are `None`.
    Span { start: Option<i64>, end: Option<i64> },
    /// Distinct values, first-seen order.
    Options { options: Vec<String> },
}

/// One column descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: FieldType,
    pub domain: Domain,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
            domain: Domain::None,
        }
    }

    pub fn with_domain(mut self, domain: Domain) -> Self {
        self.domain = domain;
        self
    }

    pub fn options(&self) -> Option<&[String]> {
        match &self.domain {
            Domain::Options { options } => Some(options),
            _ => None,
        }
    }

    /// `(min, max, step)` for a data-derived range.
    pub fn range(&self) -> Option<(i64, i64, i64)> {
        match self.domain {
            Domain::Range { min, max, step } => Some((min, max, step)),
            _ => None,
        }
    }
}

/// A coerced cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Str(String),
    /// Missing from a short line, or not a parseable integer.
    Null,
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

/// One data record keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Row(HashMap<String, Value>);

impl Row {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Row(iter.into_iter().collect())
    }
}
