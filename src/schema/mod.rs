//! Content schemas: typed field declarations and per-type validation
//!
//! A schema is plain data, not code: a [`DocType`] couples a source glob and
//! url prefix with an ordered field table of [`FieldSpec`] entries. The
//! loader validates each document's front-matter against the type it matched
//! and only then builds a record, so a loaded collection never contains a
//! half-valid document.

mod category;
mod doc_type;
mod field;

pub use category::Category;
pub use doc_type::{DocType, COMPUTED_FIELDS, CORE_FIELDS};
pub use field::{parse_date, FieldSpec, FieldType, FieldValue};
