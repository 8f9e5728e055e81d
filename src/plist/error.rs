use thiserror::Error;

/// Error raised when a library document cannot be parsed.
///
/// Every variant is structural: retrying the same input cannot
/// succeed, so callers report once and stop. Unknown value *tags* are
/// deliberately not an error (the field is dropped instead); unknown
/// key/value *pairing* always is.
#[derive(Debug, Error)]
pub enum MalformedDocument {
    /// The input could not be read at all.
    #[error("failed to read library document: {0}")]
    Unreadable(#[from] std::io::Error),

    /// The input is not well-formed XML.
    #[error("library document is not well-formed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The document root has no dict whose entries include a nested
    /// dict of per-track dicts.
    #[error("no track table found under the document root")]
    MissingTrackTable,

    /// A track-table entry maps to a scalar instead of a field dict.
    #[error("track {track_id} is not a field dict")]
    TrackNotADict { track_id: String },

    /// A `<key>` with no following value element.
    #[error("key {key:?} has no value")]
    DanglingKey { key: String },

    /// A value element with no preceding `<key>`.
    #[error("value element <{tag}> has no preceding key")]
    ValueWithoutKey { tag: String },

    /// A `<date>` whose text is not `YYYY-MM-DDTHH:MM:SSZ`.
    #[error("field {field:?} has unparseable date {value:?}")]
    BadDate { field: String, value: String },

    /// An `<integer>` whose text is not a base-10 integer.
    #[error("field {field:?} has unparseable integer {value:?}")]
    BadInteger { field: String, value: String },

    /// Element structure outside what a property list can contain.
    #[error("unexpected document structure: {0}")]
    UnexpectedStructure(String),
}
