use super::TrackField;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// A single decoded value from a per-track field map.
///
/// Only these four types appear in exports for fields we decode;
/// anything else is dropped during parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Integer(i64),
    Text(String),
    Timestamp(DateTime<Utc>),
    Flag(bool),
}

/// One track's decoded field map, the parser's unit of output.
///
/// Fields are optional throughout: an absent field is simply missing
/// from the map, never defaulted here. Defaulting (e.g. treating a
/// missing `Favorited` as false) is the storage layer's call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackRecord {
    fields: HashMap<TrackField, FieldValue>,
}

impl TrackRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any previous value.
    pub fn insert(&mut self, field: TrackField, value: FieldValue) {
        self.fields.insert(field, value);
    }

    /// Raw access to a field's value.
    pub fn get(&self, field: &TrackField) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Whether the field is present at all.
    pub fn contains(&self, field: &TrackField) -> bool {
        self.fields.contains_key(field)
    }

    /// Number of decoded fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The field's integer value, if present and integer-typed.
    pub fn integer(&self, field: TrackField) -> Option<i64> {
        match self.fields.get(&field) {
            Some(FieldValue::Integer(n)) => Some(*n),
            _ => None,
        }
    }

    /// The field's text value, if present and string-typed.
    pub fn text(&self, field: TrackField) -> Option<&str> {
        match self.fields.get(&field) {
            Some(FieldValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The field's timestamp value, if present and date-typed.
    pub fn timestamp(&self, field: TrackField) -> Option<DateTime<Utc>> {
        match self.fields.get(&field) {
            Some(FieldValue::Timestamp(t)) => Some(*t),
            _ => None,
        }
    }

    /// The field's boolean value, if present and boolean-typed.
    pub fn flag(&self, field: TrackField) -> Option<bool> {
        match self.fields.get(&field) {
            Some(FieldValue::Flag(b)) => Some(*b),
            _ => None,
        }
    }

    /// Track title, when the export carried one.
    pub fn name(&self) -> Option<&str> {
        self.text(TrackField::Name)
    }

    /// Artist name, when the export carried one.
    pub fn artist(&self) -> Option<&str> {
        self.text(TrackField::Artist)
    }

    /// Convert the Location file:// URI to a filesystem path.
    ///
    /// Exports write locations as percent-encoded file URIs, older
    /// versions with a `localhost` authority.
    pub fn location_path(&self) -> Option<PathBuf> {
        let location = self.text(TrackField::Location)?;
        let path = location.strip_prefix("file://")?;
        let path = path.strip_prefix("localhost").unwrap_or(path);
        let decoded = urlencoding::decode(path).ok()?;
        Some(PathBuf::from(decoded.into_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_accessors_match_value_type() {
        let mut record = TrackRecord::new();
        record.insert(TrackField::PlayCount, FieldValue::Integer(5));
        record.insert(TrackField::Name, FieldValue::Text("Song A".to_string()));
        record.insert(TrackField::Favorited, FieldValue::Flag(true));

        assert_eq!(record.integer(TrackField::PlayCount), Some(5));
        assert_eq!(record.name(), Some("Song A"));
        assert_eq!(record.flag(TrackField::Favorited), Some(true));

        // Wrong-typed access returns None rather than coercing
        assert_eq!(record.text(TrackField::PlayCount), None);
        assert_eq!(record.integer(TrackField::Name), None);
    }

    #[test]
    fn absent_fields_are_none() {
        let record = TrackRecord::new();
        assert_eq!(record.flag(TrackField::Favorited), None);
        assert!(!record.contains(&TrackField::Favorited));
    }

    #[test]
    fn location_decodes_file_uri() {
        let mut record = TrackRecord::new();
        record.insert(
            TrackField::Location,
            FieldValue::Text("file:///Users/me/Music/My%20Song.m4a".to_string()),
        );
        assert_eq!(
            record.location_path(),
            Some(PathBuf::from("/Users/me/Music/My Song.m4a"))
        );
    }

    #[test]
    fn location_handles_localhost_authority() {
        let mut record = TrackRecord::new();
        record.insert(
            TrackField::Location,
            FieldValue::Text("file://localhost/Users/me/track.mp3".to_string()),
        );
        assert_eq!(
            record.location_path(),
            Some(PathBuf::from("/Users/me/track.mp3"))
        );
    }
}
