//! Unified data model for the imported library
//!
//! These structures are independent of both the plist input format
//! and the SQLite storage schema.

mod field;
mod library;
mod track;

pub use field::TrackField;
pub use library::Library;
pub use track::{FieldValue, TrackRecord};
