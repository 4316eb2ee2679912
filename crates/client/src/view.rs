//! Plain-text rendering of session state.
use std::fmt::Write;

use rapsim_core::{ActiveEvent, ChartStanding, GameState, WeeklySummary, top_songs};

pub fn status(state: &GameState) -> String {
    let stats = &state.stats;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} | ${} | career level {}",
        state.week, stats.wealth, stats.career_level
    );
    let _ = writeln!(
        out,
        "reputation {} | creativity {} | marketing {} | networking {} | fan loyalty {}",
        stats.reputation, stats.creativity, stats.marketing, stats.networking, stats.fan_loyalty
    );
    let _ = write!(
        out,
        "{} streams | {} followers | {} songs | {} albums",
        state.total_streams(),
        state.total_followers(),
        state.songs.len(),
        state.albums.len()
    );
    out
}

pub fn songs(state: &GameState) -> String {
    if state.songs.is_empty() {
        return "no songs recorded yet".to_string();
    }
    let mut out = String::new();
    for song in &state.songs {
        let release = match song.release_date {
            Some(week) if song.active => format!("released {week}"),
            Some(week) => format!("released {week}, inactive"),
            None => "unreleased".to_string(),
        };
        let _ = writeln!(
            out,
            "{:>4}  {:<28} {:<8} {:<9} {:>12} streams ({:+} last week)  {}",
            song.id.0,
            song.title,
            song.tier,
            song.performance,
            song.streams,
            song.last_week_streams,
            release
        );
    }
    let top: Vec<&str> = top_songs(state, 3)
        .iter()
        .map(|song| song.title.as_str())
        .collect();
    if !top.is_empty() {
        let _ = write!(out, "this week's top: {}", top.join(", "));
    }
    out.trim_end().to_string()
}

pub fn albums(state: &GameState) -> String {
    if state.albums.is_empty() {
        return "no albums released yet".to_string();
    }
    state
        .albums
        .iter()
        .map(|album| {
            format!(
                "{:>4}  {:<28} {:<12} {} tracks {:>12} streams {:?}",
                album.id.0,
                album.title,
                album.kind,
                album.song_ids.len(),
                album.streams,
                album.certifications
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn chart(standing: &ChartStanding) -> String {
    let mut out = format!(
        "rank {} of {} (top {}%)\n",
        standing.rank,
        standing.total_artists,
        100u32.saturating_sub(standing.percentile)
    );
    for entry in &standing.nearby {
        let marker = if entry.artist.is_player() { ">" } else { " " };
        let _ = writeln!(out, "{marker} {:<20} {:>14}", entry.name, entry.total_streams);
    }
    out.trim_end().to_string()
}

pub fn summary(summary: &WeeklySummary) -> String {
    let mut out = format!(
        "{}: +{} streams, +{} followers, +${}",
        summary.week, summary.new_streams, summary.new_followers, summary.revenue
    );
    for (label, songs) in [
        ("viral", &summary.viral_songs),
        ("flopped", &summary.flopped_songs),
        ("comeback", &summary.comeback_songs),
    ] {
        if !songs.is_empty() {
            let ids: Vec<String> = songs.iter().map(ToString::to_string).collect();
            let _ = write!(out, "\n  {label}: {}", ids.join(", "));
        }
    }
    out
}

/// An event with its numbered options.
pub fn event(state: &GameState, event: &ActiveEvent) -> String {
    let mut out = format!(
        "[{}] {} ({})\n  {}",
        event.kind, event.title, event.id, event.description
    );
    if let Some(template) = state.event_template(&event.template_id) {
        for (index, option) in template.options.iter().enumerate() {
            let _ = write!(out, "\n  {}. {}", index + 1, option.text);
        }
    }
    out
}

pub fn events(state: &GameState) -> String {
    let pending: Vec<String> = state
        .active_events
        .iter()
        .filter(|active| !active.resolved)
        .map(|active| event(state, active))
        .collect();
    if pending.is_empty() {
        "no pending events".to_string()
    } else {
        pending.join("\n")
    }
}
