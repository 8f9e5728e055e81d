//! Plain-text rendering of the listening report
//!
//! The CLI is the presentation surface: each section below mirrors one
//! panel of the library overview, formatted for a terminal.

use super::queries;
use sqlx::SqlitePool;
use std::fmt::Write;

/// Run every report query for one account and render the result.
pub async fn render_report(pool: &SqlitePool, user_id: i64) -> sqlx::Result<String> {
    let overview = queries::overview(pool, user_id).await?;
    let recent = queries::recent_additions(pool, user_id).await?;
    let months = queries::active_months(pool, user_id).await?;
    let longest = queries::longest_songs(pool, user_id).await?;
    let shortest = queries::shortest_songs(pool, user_id).await?;
    let decades = queries::songs_by_decade(pool, user_id).await?;
    let skipped = queries::most_skipped(pool, user_id).await?;
    let artists = queries::artist_analysis(pool, user_id).await?;
    let replayed = queries::most_replayed(pool, user_id).await?;
    let times = queries::listening_times(pool, user_id).await?;
    let days = queries::listening_days(pool, user_id).await?;
    let albums = queries::most_played_albums(pool, user_id).await?;
    let genres = queries::genre_time(pool, user_id).await?;

    let mut out = String::new();

    section(&mut out, "Library overview");
    let _ = writeln!(out, "  Total songs:          {}", overview.total_songs);
    let _ = writeln!(out, "  Unique artists:       {}", overview.unique_artists);
    let _ = writeln!(out, "  Unique albums:        {}", overview.unique_albums);
    let _ = writeln!(out, "  Unique genres:        {}", overview.unique_genres);
    let _ = writeln!(
        out,
        "  Total plays:          {}",
        overview.total_plays.unwrap_or(0)
    );
    let _ = writeln!(out, "  Total listening time: {} h", overview.total_hours());
    let _ = writeln!(
        out,
        "  Avg plays per song:   {}",
        overview.avg_plays_per_song.unwrap_or(0.0)
    );
    let _ = writeln!(
        out,
        "  Avg song length:      {} min",
        overview.avg_song_length_minutes.unwrap_or(0.0)
    );
    let _ = writeln!(
        out,
        "  Unplayed:             {} ({}%)",
        overview.unplayed_songs,
        overview.unplayed_percentage()
    );
    let _ = writeln!(
        out,
        "  Favorites:            {} ({}%)",
        overview.favorite_count,
        overview.favorite_percentage()
    );
    let _ = writeln!(out, "  Added last 30 days:   {}", recent);

    section(&mut out, "Most active months");
    for m in &months {
        let _ = writeln!(out, "  {}-{:02}  {} plays", m.year, m.month, m.play_count);
    }

    section(&mut out, "Longest songs");
    for s in &longest {
        let _ = writeln!(
            out,
            "  {} - {} ({} min)",
            unknown(&s.name),
            unknown(&s.artist),
            s.duration_minutes
        );
    }

    section(&mut out, "Shortest songs");
    for s in &shortest {
        let _ = writeln!(
            out,
            "  {} - {} ({} min)",
            unknown(&s.name),
            unknown(&s.artist),
            s.duration_minutes
        );
    }

    section(&mut out, "Songs by decade");
    for d in &decades {
        let _ = writeln!(out, "  {}s  {} songs", d.decade, d.song_count);
    }

    section(&mut out, "Most skipped");
    for s in &skipped {
        let _ = writeln!(
            out,
            "  {} - {} ({} skips / {} plays, {}%)",
            unknown(&s.name),
            unknown(&s.artist),
            s.skip_count,
            s.play_count,
            s.skip_ratio
        );
    }

    section(&mut out, "Top artists");
    for a in &artists {
        let _ = writeln!(
            out,
            "  {}: {} songs on {} albums, {} plays",
            unknown(&a.artist),
            a.song_count,
            a.album_count,
            a.total_plays
        );
    }

    section(&mut out, "Most replayed");
    for r in &replayed {
        let _ = writeln!(
            out,
            "  {} - {} ({} plays over {} days, {}/day)",
            unknown(&r.name),
            unknown(&r.artist),
            r.play_count,
            r.days_in_library,
            r.plays_per_day
        );
    }

    section(&mut out, "Listening time of day");
    for t in &times {
        let _ = writeln!(out, "  {}: {} plays", t.time_of_day, t.play_count);
    }

    section(&mut out, "Listening day of week");
    for d in &days {
        let _ = writeln!(out, "  {}: {} plays", d.day_name(), d.play_count);
    }

    section(&mut out, "Most played albums");
    for a in &albums {
        let _ = writeln!(
            out,
            "  {} - {} ({} tracks, {} plays)",
            unknown(&a.album),
            unknown(&a.artist),
            a.track_count,
            a.total_plays.unwrap_or(0)
        );
    }

    section(&mut out, "Time by genre");
    for g in &genres {
        let _ = writeln!(
            out,
            "  {}: {} songs, {} h",
            g.genre,
            g.song_count,
            g.total_hours.unwrap_or(0.0)
        );
    }

    Ok(out)
}

fn section(out: &mut String, title: &str) {
    if !out.is_empty() {
        out.push('\n');
    }
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", "-".repeat(title.len()));
}

fn unknown(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("Unknown")
}
