pub mod annotated;
pub mod cis;
pub mod derive;
pub mod domain;
pub mod types;

pub use types::{Dialect, Domain, Field, FieldType, Row, Value};
