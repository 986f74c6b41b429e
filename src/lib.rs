//! Reader for image-database manifests (`data.csv`): fetches the table,
//! infers a typed schema and serves positional and exact-match row lookups.

pub mod config;
pub mod error;
pub mod fetch;
pub mod manifest;
pub mod reader;
pub mod schema;
pub mod store;
pub mod table;

pub use config::{ManifestFormat, ReaderConfig};
pub use error::{ReadError, Result};
pub use manifest::Manifest;
pub use reader::{parse_manifest, Reader};
pub use schema::{Dialect, Domain, Field, FieldType, Row, Value};
pub use store::{Criteria, Lookup, RowStore};
