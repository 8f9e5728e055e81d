use serde::{Deserialize, Serialize};

/// Field names that can appear in a library export's per-track map.
///
/// The export's field set is open: Apple adds and removes keys between
/// tool versions. The variants below cover every field the storage and
/// stats layers read; anything else lands in [`TrackField::Other`] so
/// the record still carries it without the consumers having to string-match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackField {
    TrackId,
    Name,
    Artist,
    AlbumArtist,
    Composer,
    Album,
    Genre,
    Kind,
    Size,
    TotalTime,
    DiscNumber,
    DiscCount,
    TrackNumber,
    TrackCount,
    Year,
    DateModified,
    DateAdded,
    PlayCount,
    PlayDate,
    PlayDateUtc,
    SkipCount,
    SkipDate,
    ReleaseDate,
    Favorited,
    Loved,
    ArtworkCount,
    SortAlbum,
    SortArtist,
    SortName,
    PersistentId,
    TrackType,
    Protected,
    AppleMusic,
    Location,
    FileFolderCount,
    LibraryFolderCount,
    /// Any key outside the known set (kept, not dropped)
    Other(String),
}

impl TrackField {
    /// Map an export key to its field variant.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Track ID" => TrackField::TrackId,
            "Name" => TrackField::Name,
            "Artist" => TrackField::Artist,
            "Album Artist" => TrackField::AlbumArtist,
            "Composer" => TrackField::Composer,
            "Album" => TrackField::Album,
            "Genre" => TrackField::Genre,
            "Kind" => TrackField::Kind,
            "Size" => TrackField::Size,
            "Total Time" => TrackField::TotalTime,
            "Disc Number" => TrackField::DiscNumber,
            "Disc Count" => TrackField::DiscCount,
            "Track Number" => TrackField::TrackNumber,
            "Track Count" => TrackField::TrackCount,
            "Year" => TrackField::Year,
            "Date Modified" => TrackField::DateModified,
            "Date Added" => TrackField::DateAdded,
            "Play Count" => TrackField::PlayCount,
            "Play Date" => TrackField::PlayDate,
            "Play Date UTC" => TrackField::PlayDateUtc,
            "Skip Count" => TrackField::SkipCount,
            "Skip Date" => TrackField::SkipDate,
            "Release Date" => TrackField::ReleaseDate,
            "Favorited" => TrackField::Favorited,
            "Loved" => TrackField::Loved,
            "Artwork Count" => TrackField::ArtworkCount,
            "Sort Album" => TrackField::SortAlbum,
            "Sort Artist" => TrackField::SortArtist,
            "Sort Name" => TrackField::SortName,
            "Persistent ID" => TrackField::PersistentId,
            "Track Type" => TrackField::TrackType,
            "Protected" => TrackField::Protected,
            "Apple Music" => TrackField::AppleMusic,
            "Location" => TrackField::Location,
            "File Folder Count" => TrackField::FileFolderCount,
            "Library Folder Count" => TrackField::LibraryFolderCount,
            other => TrackField::Other(other.to_string()),
        }
    }

    /// The key as it appears in the export document.
    pub fn name(&self) -> &str {
        match self {
            TrackField::TrackId => "Track ID",
            TrackField::Name => "Name",
            TrackField::Artist => "Artist",
            TrackField::AlbumArtist => "Album Artist",
            TrackField::Composer => "Composer",
            TrackField::Album => "Album",
            TrackField::Genre => "Genre",
            TrackField::Kind => "Kind",
            TrackField::Size => "Size",
            TrackField::TotalTime => "Total Time",
            TrackField::DiscNumber => "Disc Number",
            TrackField::DiscCount => "Disc Count",
            TrackField::TrackNumber => "Track Number",
            TrackField::TrackCount => "Track Count",
            TrackField::Year => "Year",
            TrackField::DateModified => "Date Modified",
            TrackField::DateAdded => "Date Added",
            TrackField::PlayCount => "Play Count",
            TrackField::PlayDate => "Play Date",
            TrackField::PlayDateUtc => "Play Date UTC",
            TrackField::SkipCount => "Skip Count",
            TrackField::SkipDate => "Skip Date",
            TrackField::ReleaseDate => "Release Date",
            TrackField::Favorited => "Favorited",
            TrackField::Loved => "Loved",
            TrackField::ArtworkCount => "Artwork Count",
            TrackField::SortAlbum => "Sort Album",
            TrackField::SortArtist => "Sort Artist",
            TrackField::SortName => "Sort Name",
            TrackField::PersistentId => "Persistent ID",
            TrackField::TrackType => "Track Type",
            TrackField::Protected => "Protected",
            TrackField::AppleMusic => "Apple Music",
            TrackField::Location => "Location",
            TrackField::FileFolderCount => "File Folder Count",
            TrackField::LibraryFolderCount => "Library Folder Count",
            TrackField::Other(name) => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names_round_trip() {
        let known = [
            TrackField::TrackId,
            TrackField::Name,
            TrackField::Artist,
            TrackField::AlbumArtist,
            TrackField::Composer,
            TrackField::Album,
            TrackField::Genre,
            TrackField::Kind,
            TrackField::Size,
            TrackField::TotalTime,
            TrackField::DiscNumber,
            TrackField::DiscCount,
            TrackField::TrackNumber,
            TrackField::TrackCount,
            TrackField::Year,
            TrackField::DateModified,
            TrackField::DateAdded,
            TrackField::PlayCount,
            TrackField::PlayDate,
            TrackField::PlayDateUtc,
            TrackField::SkipCount,
            TrackField::SkipDate,
            TrackField::ReleaseDate,
            TrackField::Favorited,
            TrackField::Loved,
            TrackField::ArtworkCount,
            TrackField::SortAlbum,
            TrackField::SortArtist,
            TrackField::SortName,
            TrackField::PersistentId,
            TrackField::TrackType,
            TrackField::Protected,
            TrackField::AppleMusic,
            TrackField::Location,
            TrackField::FileFolderCount,
            TrackField::LibraryFolderCount,
        ];

        for field in known {
            assert_eq!(TrackField::from_name(field.name()), field);
        }
    }

    #[test]
    fn unknown_name_lands_in_other() {
        let field = TrackField::from_name("Volume Adjustment");
        assert_eq!(field, TrackField::Other("Volume Adjustment".to_string()));
        assert_eq!(field.name(), "Volume Adjustment");
    }
}
