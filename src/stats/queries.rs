//! Aggregate queries over the songs table
//!
//! Every query is read-only and scoped to one account. Numeric fields
//! are nullable throughout: a song with no play count contributes NULL
//! to sums and averages, never zero.

use sqlx::SqlitePool;

/// Whole-library summary numbers.
#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct Overview {
    pub total_songs: i64,
    pub unique_artists: i64,
    pub unique_albums: i64,
    pub unique_genres: i64,
    pub total_plays: Option<i64>,
    pub total_time_ms: Option<i64>,
    pub avg_plays_per_song: Option<f64>,
    pub avg_song_length_minutes: Option<f64>,
    pub unplayed_songs: i64,
    pub favorite_count: i64,
}

impl Overview {
    /// Total listening time in hours.
    pub fn total_hours(&self) -> f64 {
        self.total_time_ms
            .map(|ms| (ms as f64 / (1000.0 * 60.0 * 60.0) * 10.0).round() / 10.0)
            .unwrap_or(0.0)
    }

    pub fn favorite_percentage(&self) -> f64 {
        percentage(self.favorite_count, self.total_songs)
    }

    pub fn unplayed_percentage(&self) -> f64 {
        percentage(self.unplayed_songs, self.total_songs)
    }
}

fn percentage(part: i64, whole: i64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (part as f64 / whole as f64 * 10_000.0).round() / 100.0
}

pub async fn overview(pool: &SqlitePool, user_id: i64) -> sqlx::Result<Overview> {
    sqlx::query_as::<_, Overview>(
        r#"
        SELECT
            COUNT(*) as total_songs,
            COUNT(DISTINCT artist) as unique_artists,
            COUNT(DISTINCT album) as unique_albums,
            COUNT(DISTINCT genre) as unique_genres,
            SUM(play_count) as total_plays,
            SUM(total_time) as total_time_ms,
            ROUND(AVG(play_count), 2) as avg_plays_per_song,
            ROUND(AVG(total_time) / 1000.0 / 60.0, 2) as avg_song_length_minutes,
            COUNT(CASE WHEN play_count = 0 THEN 1 END) as unplayed_songs,
            COUNT(CASE WHEN favorited = 1 THEN 1 END) as favorite_count
        FROM songs
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
}

/// A month bucket of last-played dates, busiest first.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ActiveMonth {
    pub year: i64,
    pub month: i64,
    pub play_count: i64,
}

pub async fn active_months(pool: &SqlitePool, user_id: i64) -> sqlx::Result<Vec<ActiveMonth>> {
    sqlx::query_as::<_, ActiveMonth>(
        r#"
        SELECT
            CAST(strftime('%Y', play_date_utc) AS INTEGER) as year,
            CAST(strftime('%m', play_date_utc) AS INTEGER) as month,
            COUNT(*) as play_count
        FROM songs
        WHERE play_date_utc IS NOT NULL AND user_id = ?
        GROUP BY year, month
        ORDER BY play_count DESC
        LIMIT 5
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Songs added within the last 30 days.
pub async fn recent_additions(pool: &SqlitePool, user_id: i64) -> sqlx::Result<i64> {
    let (count,): (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(*)
        FROM songs
        WHERE user_id = ?
          AND date_added IS NOT NULL
          AND julianday(date_added) > julianday('now', '-30 days')
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SongDuration {
    pub name: Option<String>,
    pub artist: Option<String>,
    pub duration_minutes: f64,
}

pub async fn longest_songs(pool: &SqlitePool, user_id: i64) -> sqlx::Result<Vec<SongDuration>> {
    songs_by_duration(pool, user_id, "DESC").await
}

pub async fn shortest_songs(pool: &SqlitePool, user_id: i64) -> sqlx::Result<Vec<SongDuration>> {
    songs_by_duration(pool, user_id, "ASC").await
}

async fn songs_by_duration(
    pool: &SqlitePool,
    user_id: i64,
    order: &str,
) -> sqlx::Result<Vec<SongDuration>> {
    let sql = format!(
        r#"
        SELECT name, artist, ROUND(total_time / 1000.0 / 60.0, 2) as duration_minutes
        FROM songs
        WHERE total_time > 0 AND user_id = ?
        ORDER BY total_time {}
        LIMIT 5
        "#,
        order
    );
    sqlx::query_as::<_, SongDuration>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DecadeCount {
    pub decade: i64,
    pub song_count: i64,
}

pub async fn songs_by_decade(pool: &SqlitePool, user_id: i64) -> sqlx::Result<Vec<DecadeCount>> {
    sqlx::query_as::<_, DecadeCount>(
        r#"
        SELECT (year / 10) * 10 as decade, COUNT(*) as song_count
        FROM songs
        WHERE year IS NOT NULL AND user_id = ?
        GROUP BY decade
        ORDER BY decade
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// A song ranked by how often plays turn into skips.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SkippedSong {
    pub name: Option<String>,
    pub artist: Option<String>,
    pub skip_count: i64,
    pub play_count: i64,
    pub skip_ratio: f64,
}

pub async fn most_skipped(pool: &SqlitePool, user_id: i64) -> sqlx::Result<Vec<SkippedSong>> {
    sqlx::query_as::<_, SkippedSong>(
        r#"
        SELECT name, artist, skip_count, play_count,
               ROUND(skip_count * 100.0 / play_count, 2) as skip_ratio
        FROM songs
        WHERE play_count > 0 AND skip_count > 0 AND user_id = ?
        ORDER BY skip_ratio DESC
        LIMIT 10
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ArtistAnalysis {
    pub artist: Option<String>,
    pub song_count: i64,
    pub album_count: i64,
    pub earliest_song: Option<i64>,
    pub latest_song: Option<i64>,
    pub avg_song_length_minutes: Option<f64>,
    pub total_plays: i64,
}

/// Artists with more than five songs and at least one play, by plays.
pub async fn artist_analysis(pool: &SqlitePool, user_id: i64) -> sqlx::Result<Vec<ArtistAnalysis>> {
    sqlx::query_as::<_, ArtistAnalysis>(
        r#"
        SELECT artist,
               COUNT(*) as song_count,
               COUNT(DISTINCT album) as album_count,
               MIN(year) as earliest_song,
               MAX(year) as latest_song,
               ROUND(AVG(total_time) / 1000.0 / 60.0, 2) as avg_song_length_minutes,
               SUM(play_count) as total_plays
        FROM songs
        WHERE user_id = ?
        GROUP BY artist
        HAVING COUNT(*) > 5 AND SUM(play_count) > 0
        ORDER BY SUM(play_count) DESC
        LIMIT 10
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// A song ranked by plays per day since it entered the library.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReplayedSong {
    pub name: Option<String>,
    pub artist: Option<String>,
    pub play_count: i64,
    pub days_in_library: i64,
    pub plays_per_day: f64,
}

/// Most replayed songs, counting only tracks in the library over 30 days.
pub async fn most_replayed(pool: &SqlitePool, user_id: i64) -> sqlx::Result<Vec<ReplayedSong>> {
    sqlx::query_as::<_, ReplayedSong>(
        r#"
        SELECT name, artist, play_count,
               CAST(julianday('now') - julianday(date_added) AS INTEGER) as days_in_library,
               ROUND(play_count / (julianday('now') - julianday(date_added)), 2) as plays_per_day
        FROM songs
        WHERE user_id = ?
          AND date_added IS NOT NULL
          AND play_count > 0
          AND julianday('now') - julianday(date_added) > 30
        ORDER BY plays_per_day DESC
        LIMIT 10
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TimeOfDayCount {
    pub time_of_day: String,
    pub play_count: i64,
}

/// Last-played times bucketed into morning / afternoon / evening / night.
pub async fn listening_times(pool: &SqlitePool, user_id: i64) -> sqlx::Result<Vec<TimeOfDayCount>> {
    sqlx::query_as::<_, TimeOfDayCount>(
        r#"
        SELECT CASE
                 WHEN CAST(strftime('%H', play_date_utc) AS INTEGER) BETWEEN 5 AND 11 THEN 'Morning'
                 WHEN CAST(strftime('%H', play_date_utc) AS INTEGER) BETWEEN 12 AND 16 THEN 'Afternoon'
                 WHEN CAST(strftime('%H', play_date_utc) AS INTEGER) BETWEEN 17 AND 20 THEN 'Evening'
                 ELSE 'Night'
               END as time_of_day,
               COUNT(*) as play_count
        FROM songs
        WHERE play_date_utc IS NOT NULL AND user_id = ?
        GROUP BY time_of_day
        ORDER BY play_count DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WeekdayCount {
    /// 0 = Sunday through 6 = Saturday, as strftime('%w') numbers them.
    pub weekday: i64,
    pub play_count: i64,
}

impl WeekdayCount {
    pub fn day_name(&self) -> &'static str {
        match self.weekday {
            0 => "Sunday",
            1 => "Monday",
            2 => "Tuesday",
            3 => "Wednesday",
            4 => "Thursday",
            5 => "Friday",
            6 => "Saturday",
            _ => "Unknown",
        }
    }
}

pub async fn listening_days(pool: &SqlitePool, user_id: i64) -> sqlx::Result<Vec<WeekdayCount>> {
    sqlx::query_as::<_, WeekdayCount>(
        r#"
        SELECT CAST(strftime('%w', play_date_utc) AS INTEGER) as weekday,
               COUNT(*) as play_count
        FROM songs
        WHERE play_date_utc IS NOT NULL AND user_id = ?
        GROUP BY weekday
        ORDER BY weekday
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AlbumPlays {
    pub album: Option<String>,
    pub artist: Option<String>,
    pub track_count: i64,
    pub total_plays: Option<i64>,
    pub avg_plays_per_track: Option<f64>,
}

/// Albums with more than three tracks in the library, by total plays.
pub async fn most_played_albums(pool: &SqlitePool, user_id: i64) -> sqlx::Result<Vec<AlbumPlays>> {
    sqlx::query_as::<_, AlbumPlays>(
        r#"
        SELECT album, artist,
               COUNT(*) as track_count,
               SUM(play_count) as total_plays,
               ROUND(AVG(play_count), 2) as avg_plays_per_track
        FROM songs
        WHERE user_id = ?
        GROUP BY album, artist
        HAVING COUNT(*) > 3
        ORDER BY total_plays DESC
        LIMIT 10
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct GenreTime {
    pub genre: String,
    pub song_count: i64,
    pub total_hours: Option<f64>,
    pub avg_minutes_per_song: Option<f64>,
}

pub async fn genre_time(pool: &SqlitePool, user_id: i64) -> sqlx::Result<Vec<GenreTime>> {
    sqlx::query_as::<_, GenreTime>(
        r#"
        SELECT genre,
               COUNT(*) as song_count,
               ROUND(SUM(total_time) / 1000.0 / 60.0 / 60.0, 2) as total_hours,
               ROUND(AVG(total_time) / 1000.0 / 60.0, 2) as avg_minutes_per_song
        FROM songs
        WHERE genre IS NOT NULL AND user_id = ?
        GROUP BY genre
        ORDER BY total_hours DESC
        LIMIT 10
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}
