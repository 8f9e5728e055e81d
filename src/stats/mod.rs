//! Listening-behavior analytics
//!
//! Read-only aggregate queries over stored songs, always scoped to one
//! account, and the plain-text report built from them.

mod queries;
mod report;

pub use queries::{
    active_months, artist_analysis, genre_time, listening_days, listening_times, longest_songs,
    most_played_albums, most_replayed, most_skipped, overview, recent_additions, shortest_songs,
    songs_by_decade, ActiveMonth, AlbumPlays, ArtistAnalysis, DecadeCount, GenreTime, Overview,
    ReplayedSong, SkippedSong, SongDuration, TimeOfDayCount, WeekdayCount,
};
pub use report::render_report;
