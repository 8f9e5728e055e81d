//! Track-table extraction
//!
//! Walks the parsed property-list tree to the track table and
//! assembles one [`TrackRecord`] per entry, in document order.

use super::error::MalformedDocument;
use super::reader::{read_document, PlistValue};
use crate::model::{FieldValue, Library, TrackField, TrackRecord};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Parse a library export file into an ordered sequence of track records.
pub fn parse_library(path: &Path) -> Result<Library, MalformedDocument> {
    let file = File::open(path)?;
    parse_reader(BufReader::new(file))
}

/// Parse a library export from any buffered source.
///
/// The track table is located by shape, not position: the document
/// root must hold a dict, and the first of its entries that is itself
/// a dict maps track IDs to per-track field dicts. Any other shape
/// fails instead of silently misparsing.
pub fn parse_reader<R: BufRead>(input: R) -> Result<Library, MalformedDocument> {
    let root = read_document(input)?;
    let mut library = Library::new();

    for (track_id, node) in track_table(&root)? {
        match node {
            PlistValue::Dict(fields) => library.add_track(build_record(fields)),
            _ => {
                return Err(MalformedDocument::TrackNotADict {
                    track_id: track_id.clone(),
                })
            }
        }
    }

    log::debug!("parsed {} track records", library.track_count());
    Ok(library)
}

fn track_table(root: &PlistValue) -> Result<&[(String, PlistValue)], MalformedDocument> {
    let PlistValue::Dict(entries) = root else {
        return Err(MalformedDocument::MissingTrackTable);
    };

    for (_, value) in entries {
        if let PlistValue::Dict(table) = value {
            return Ok(table);
        }
    }

    Err(MalformedDocument::MissingTrackTable)
}

/// Assemble one record from a per-track dict.
///
/// Fields whose value tag is outside the supported set carry no
/// decodable value and are simply absent from the record.
fn build_record(fields: &[(String, PlistValue)]) -> TrackRecord {
    let mut record = TrackRecord::new();

    for (key, value) in fields {
        let field = TrackField::from_name(key);
        match value {
            PlistValue::Integer(n) => record.insert(field, FieldValue::Integer(*n)),
            PlistValue::Text(s) => record.insert(field, FieldValue::Text(s.clone())),
            PlistValue::Date(t) => record.insert(field, FieldValue::Timestamp(*t)),
            PlistValue::Flag(b) => record.insert(field, FieldValue::Flag(*b)),
            PlistValue::Dict(_) | PlistValue::Ignored => {}
        }
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::io::Cursor;

    /// Wrap per-track XML in the envelope real exports use: version
    /// scalars ahead of the Tracks dict, a Playlists array after it.
    fn library_xml(tracks: &str) -> String {
        format!(
            concat!(
                "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
                "<!DOCTYPE plist PUBLIC \"-//Apple//DTD PLIST 1.0//EN\" ",
                "\"http://www.apple.com/DTDs/PropertyList-1.0.dtd\">\n",
                "<plist version=\"1.0\">\n",
                "<dict>\n",
                "  <key>Major Version</key><integer>1</integer>\n",
                "  <key>Application Version</key><string>1.4.3.0</string>\n",
                "  <key>Show Content Ratings</key><true/>\n",
                "  <key>Tracks</key>\n",
                "  <dict>\n{}</dict>\n",
                "  <key>Playlists</key>\n",
                "  <array><dict><key>Name</key><string>Library</string></dict></array>\n",
                "</dict>\n",
                "</plist>\n"
            ),
            tracks
        )
    }

    fn parse(xml: &str) -> Result<Library, MalformedDocument> {
        parse_reader(Cursor::new(xml.as_bytes()))
    }

    #[test]
    fn two_track_scenario() {
        let xml = library_xml(
            "<key>1001</key><dict>\
             <key>Name</key><string>Song A</string>\
             <key>Play Count</key><integer>5</integer>\
             </dict>\
             <key>1002</key><dict>\
             <key>Name</key><string>Song B</string>\
             </dict>",
        );
        let library = parse(&xml).unwrap();

        assert_eq!(library.track_count(), 2);
        let first = &library.tracks()[0];
        let second = &library.tracks()[1];

        assert_eq!(first.name(), Some("Song A"));
        assert_eq!(first.integer(TrackField::PlayCount), Some(5));
        assert_eq!(second.name(), Some("Song B"));
        assert!(!second.contains(&TrackField::PlayCount));
    }

    #[test]
    fn records_keep_document_order() {
        let xml = library_xml(
            "<key>3</key><dict><key>Name</key><string>C</string></dict>\
             <key>1</key><dict><key>Name</key><string>A</string></dict>\
             <key>2</key><dict><key>Name</key><string>B</string></dict>",
        );
        let library = parse(&xml).unwrap();

        let names: Vec<_> = library.tracks().iter().filter_map(|t| t.name()).collect();
        assert_eq!(names, ["C", "A", "B"]);
    }

    #[test]
    fn decodes_all_supported_value_tags() {
        let xml = library_xml(
            "<key>1001</key><dict>\
             <key>Track ID</key><integer>1001</integer>\
             <key>Name</key><string>Song A</string>\
             <key>Play Date UTC</key><date>2023-06-01T10:00:00Z</date>\
             <key>Loved</key><true/>\
             <key>Apple Music</key><false/>\
             </dict>",
        );
        let library = parse(&xml).unwrap();
        let track = &library.tracks()[0];

        assert_eq!(track.integer(TrackField::TrackId), Some(1001));
        assert_eq!(track.name(), Some("Song A"));
        assert_eq!(
            track.timestamp(TrackField::PlayDateUtc),
            Some(Utc.with_ymd_and_hms(2023, 6, 1, 10, 0, 0).unwrap())
        );
        assert_eq!(track.flag(TrackField::Loved), Some(true));
        assert_eq!(track.flag(TrackField::AppleMusic), Some(false));
    }

    #[test]
    fn integer_tag_decodes_to_integer_not_text() {
        let xml =
            library_xml("<key>1</key><dict><key>Play Count</key><integer>42</integer></dict>");
        let library = parse(&xml).unwrap();
        let track = &library.tracks()[0];

        assert_eq!(
            track.get(&TrackField::PlayCount),
            Some(&FieldValue::Integer(42))
        );
        assert_eq!(track.text(TrackField::PlayCount), None);
    }

    #[test]
    fn absent_boolean_stays_absent() {
        let xml = library_xml("<key>1</key><dict><key>Loved</key><false/></dict>");
        let library = parse(&xml).unwrap();
        let track = &library.tracks()[0];

        assert_eq!(track.flag(TrackField::Loved), Some(false));
        // No defaulting in the parser: Favorited was never in the document.
        assert_eq!(track.flag(TrackField::Favorited), None);
        assert!(!track.contains(&TrackField::Favorited));
    }

    #[test]
    fn unrecognized_value_tags_drop_the_field() {
        let xml = library_xml(
            "<key>1</key><dict>\
             <key>Name</key><string>Song A</string>\
             <key>Artwork</key><data>AAECAw==</data>\
             <key>Sample Rate</key><real>44100</real>\
             </dict>",
        );
        let library = parse(&xml).unwrap();
        let track = &library.tracks()[0];

        assert_eq!(track.name(), Some("Song A"));
        assert!(!track.contains(&TrackField::Other("Artwork".to_string())));
        assert!(!track.contains(&TrackField::Other("Sample Rate".to_string())));
    }

    #[test]
    fn unknown_keys_are_kept_under_other() {
        let xml = library_xml(
            "<key>1</key><dict><key>Volume Adjustment</key><integer>-3</integer></dict>",
        );
        let library = parse(&xml).unwrap();
        let track = &library.tracks()[0];

        assert_eq!(
            track.integer(TrackField::Other("Volume Adjustment".to_string())),
            Some(-3)
        );
    }

    #[test]
    fn dangling_key_fails() {
        let xml = library_xml(
            "<key>1</key><dict>\
             <key>Name</key><string>Song A</string>\
             <key>Play Count</key>\
             </dict>",
        );
        assert!(matches!(
            parse(&xml),
            Err(MalformedDocument::DanglingKey { key }) if key == "Play Count"
        ));
    }

    #[test]
    fn value_without_key_fails() {
        let xml = library_xml("<key>1</key><dict><string>stray</string></dict>");
        assert!(matches!(
            parse(&xml),
            Err(MalformedDocument::ValueWithoutKey { tag }) if tag == "string"
        ));
    }

    #[test]
    fn empty_track_table_parses_to_empty_sequence() {
        let library = parse(&library_xml("")).unwrap();
        assert!(library.is_empty());
        assert_eq!(library.track_count(), 0);
    }

    #[test]
    fn track_table_found_by_shape_not_position() {
        // The track table is the first dict-valued entry even with any
        // number of scalar entries ahead of it.
        let xml = library_xml("<key>1</key><dict><key>Name</key><string>Only</string></dict>");
        let library = parse(&xml).unwrap();
        assert_eq!(library.tracks()[0].name(), Some("Only"));
    }

    #[test]
    fn document_without_nested_dict_fails() {
        let xml = "<plist><dict>\
                   <key>Major Version</key><integer>1</integer>\
                   </dict></plist>";
        assert!(matches!(
            parse(xml),
            Err(MalformedDocument::MissingTrackTable)
        ));
    }

    #[test]
    fn non_dict_root_fails() {
        let xml = "<plist><array><dict/></array></plist>";
        assert!(matches!(
            parse(xml),
            Err(MalformedDocument::MissingTrackTable)
        ));
    }

    #[test]
    fn non_dict_track_entry_fails() {
        let xml = library_xml("<key>1001</key><string>not a track</string>");
        assert!(matches!(
            parse(&xml),
            Err(MalformedDocument::TrackNotADict { track_id }) if track_id == "1001"
        ));
    }

    #[test]
    fn bad_date_names_the_offending_field() {
        let xml = library_xml(
            "<key>1</key><dict><key>Date Added</key><date>June 1st 2023</date></dict>",
        );
        assert!(matches!(
            parse(&xml),
            Err(MalformedDocument::BadDate { field, .. }) if field == "Date Added"
        ));
    }

    #[test]
    fn ill_formed_markup_fails() {
        let xml = "<plist><dict><key>Tracks</key><dict></plist>";
        assert!(parse(xml).is_err());
    }

    #[test]
    fn escaped_text_is_unescaped() {
        let xml = library_xml(
            "<key>1</key><dict><key>Artist</key><string>Simon &amp; Garfunkel</string></dict>",
        );
        let library = parse(&xml).unwrap();
        assert_eq!(library.tracks()[0].artist(), Some("Simon & Garfunkel"));
    }
}
