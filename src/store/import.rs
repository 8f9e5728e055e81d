//! Track batch import
//!
//! Inserts one `songs` row per parsed record, scoped to the owning
//! account. Rows insert independently: a failing row is logged and
//! skipped and the batch continues, so one bad record never aborts an
//! import. Returns the number of rows actually stored.

use super::Result;
use crate::model::{Library, TrackField, TrackRecord};
use sqlx::SqlitePool;

const INSERT_SONG: &str = "\
    INSERT INTO songs (
        user_id, track_id, name, artist, album_artist, composer, album, genre,
        kind, size, total_time, disc_number, disc_count, track_number,
        track_count, year, date_modified, date_added, play_count, play_date,
        play_date_utc, skip_count, skip_date, release_date, favorited, loved,
        artwork_count, sort_album, sort_artist, sort_name, persistent_id,
        track_type, protected, apple_music, location, file_folder_count,
        library_folder_count
    ) VALUES (
        ?, ?, ?, ?, ?, ?, ?, ?,
        ?, ?, ?, ?, ?, ?,
        ?, ?, ?, ?, ?, ?,
        ?, ?, ?, ?, ?, ?,
        ?, ?, ?, ?, ?,
        ?, ?, ?, ?, ?,
        ?
    )";

/// Store every record of a parsed library for one account.
pub async fn import_tracks(pool: &SqlitePool, user_id: i64, library: &Library) -> Result<u64> {
    let mut imported = 0u64;

    for record in library.tracks() {
        match insert_song(pool, user_id, record).await {
            Ok(()) => imported += 1,
            Err(e) => {
                log::warn!(
                    "skipping track {:?}: {}",
                    record.name().unwrap_or("<untitled>"),
                    e
                );
            }
        }
    }

    log::info!(
        "stored {} of {} tracks for user {}",
        imported,
        library.track_count(),
        user_id
    );
    Ok(imported)
}

async fn insert_song(pool: &SqlitePool, user_id: i64, record: &TrackRecord) -> sqlx::Result<()> {
    // Timestamps are stored as RFC 3339 text so SQLite's date functions
    // can work on them directly.
    let timestamp = |field| record.timestamp(field).map(|t| t.to_rfc3339());

    sqlx::query(INSERT_SONG)
        .bind(user_id)
        .bind(record.integer(TrackField::TrackId))
        .bind(record.text(TrackField::Name))
        .bind(record.text(TrackField::Artist))
        .bind(record.text(TrackField::AlbumArtist))
        .bind(record.text(TrackField::Composer))
        .bind(record.text(TrackField::Album))
        .bind(record.text(TrackField::Genre))
        .bind(record.text(TrackField::Kind))
        .bind(record.integer(TrackField::Size))
        .bind(record.integer(TrackField::TotalTime))
        .bind(record.integer(TrackField::DiscNumber))
        .bind(record.integer(TrackField::DiscCount))
        .bind(record.integer(TrackField::TrackNumber))
        .bind(record.integer(TrackField::TrackCount))
        .bind(record.integer(TrackField::Year))
        .bind(timestamp(TrackField::DateModified))
        .bind(timestamp(TrackField::DateAdded))
        .bind(record.integer(TrackField::PlayCount))
        .bind(record.integer(TrackField::PlayDate))
        .bind(timestamp(TrackField::PlayDateUtc))
        .bind(record.integer(TrackField::SkipCount))
        .bind(timestamp(TrackField::SkipDate))
        .bind(timestamp(TrackField::ReleaseDate))
        // Absent booleans default to false at insert time, not in the parser
        .bind(record.flag(TrackField::Favorited).unwrap_or(false))
        .bind(record.flag(TrackField::Loved).unwrap_or(false))
        .bind(record.integer(TrackField::ArtworkCount))
        .bind(record.text(TrackField::SortAlbum))
        .bind(record.text(TrackField::SortArtist))
        .bind(record.text(TrackField::SortName))
        .bind(record.text(TrackField::PersistentId))
        .bind(record.text(TrackField::TrackType))
        .bind(record.flag(TrackField::Protected).unwrap_or(false))
        .bind(record.flag(TrackField::AppleMusic).unwrap_or(false))
        .bind(record.text(TrackField::Location))
        .bind(record.integer(TrackField::FileFolderCount))
        .bind(record.integer(TrackField::LibraryFolderCount))
        .execute(pool)
        .await?;

    Ok(())
}
