use super::TrackRecord;

/// Ordered sequence of track records parsed from one export document.
///
/// Records keep the order in which their tracks appear in the source
/// document; consumers may rely on that for "first N" semantics.
#[derive(Debug, Clone, Default)]
pub struct Library {
    tracks: Vec<TrackRecord>,
}

impl Library {
    /// Create a new empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a track record, keeping document order.
    pub fn add_track(&mut self, track: TrackRecord) {
        self.tracks.push(track);
    }

    /// All records, in document order.
    pub fn tracks(&self) -> &[TrackRecord] {
        &self.tracks
    }

    /// Total number of tracks.
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

impl IntoIterator for Library {
    type Item = TrackRecord;
    type IntoIter = std::vec::IntoIter<TrackRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.tracks.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldValue, TrackField};

    fn named(name: &str) -> TrackRecord {
        let mut record = TrackRecord::new();
        record.insert(TrackField::Name, FieldValue::Text(name.to_string()));
        record
    }

    #[test]
    fn test_library_creation() {
        let lib = Library::new();
        assert_eq!(lib.track_count(), 0);
        assert!(lib.is_empty());
    }

    #[test]
    fn add_track_preserves_order() {
        let mut lib = Library::new();
        lib.add_track(named("First"));
        lib.add_track(named("Second"));
        lib.add_track(named("Third"));

        let names: Vec<_> = lib.tracks().iter().filter_map(|t| t.name()).collect();
        assert_eq!(names, ["First", "Second", "Third"]);
    }
}
