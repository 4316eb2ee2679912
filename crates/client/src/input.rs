//! Parses command-loop lines into typed inputs.
use std::collections::BTreeSet;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow, bail};

use rapsim_core::{
    AlbumKind, ArtistId, MediaKind, PostOnSocialMedia, RecordSong, ReleaseAlbum, ReleaseSong,
    SocialPlatformKind, SongId, StreamingPlatformKind,
};

/// One line of player input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Empty,
    Help,
    Status,
    Songs,
    Albums,
    Chart,
    Events,
    Begin,
    Commit,
    Advance,
    Record(RecordSong),
    Release(ReleaseSong),
    Album(ReleaseAlbum),
    Deactivate(SongId),
    Post(PostOnSocialMedia),
    /// `option` is zero-based; players type it one-based.
    Resolve { event_id: String, option: usize },
    Save,
    Load,
    Quit,
}

pub const HELP: &str = "\
commands:
  status | songs | albums | chart | events
  begin                      stage next week and show the summary
  commit                     apply the staged week
  advance                    begin + commit
  record <title> [with 1,2]  record a song, optionally featuring rappers
  release <song> [spotify,tidal,...]
  album <kind> <song,song,...> <title>
  deactivate <song>
  post <platform> [image|video|audio] <text>
  resolve <event-id> <option>
  save | load | quit";

/// Parses one line. Keywords are case-insensitive.
pub fn parse_line(line: &str) -> Result<Input> {
    let line = line.trim();
    let (keyword, rest) = match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (line, ""),
    };

    let input = match keyword.to_ascii_lowercase().as_str() {
        "" => Input::Empty,
        "help" | "?" => Input::Help,
        "status" | "stats" => Input::Status,
        "songs" => Input::Songs,
        "albums" => Input::Albums,
        "chart" => Input::Chart,
        "events" => Input::Events,
        "begin" => Input::Begin,
        "commit" => Input::Commit,
        "advance" | "next" => Input::Advance,
        "record" => parse_record(rest)?,
        "release" => parse_release(rest)?,
        "album" => parse_album(rest)?,
        "deactivate" => Input::Deactivate(parse_song(rest)?),
        "post" => parse_post(rest)?,
        "resolve" => parse_resolve(rest)?,
        "save" => Input::Save,
        "load" => Input::Load,
        "quit" | "exit" => Input::Quit,
        other => bail!("unknown command `{other}`, try `help`"),
    };
    Ok(input)
}

fn parse_record(rest: &str) -> Result<Input> {
    let (title, featuring) = match rest.rsplit_once(" with ") {
        Some((title, ids)) => (title.trim(), parse_list(ids, |id| id.parse().map(ArtistId))?),
        None => (rest, Vec::new()),
    };
    if title.is_empty() {
        bail!("usage: record <title> [with 1,2]");
    }
    Ok(Input::Record(RecordSong::new(title, featuring)))
}

fn parse_release(rest: &str) -> Result<Input> {
    let mut parts = rest.split_whitespace();
    let song = parse_song(parts.next().unwrap_or_default())?;
    let platforms = match parts.next() {
        Some(list) => parse_list(list, StreamingPlatformKind::from_str)?
            .into_iter()
            .collect::<BTreeSet<_>>(),
        None => BTreeSet::new(),
    };
    Ok(Input::Release(ReleaseSong { song, platforms }))
}

fn parse_album(rest: &str) -> Result<Input> {
    let mut parts = rest.splitn(3, char::is_whitespace);
    let usage = "usage: album <kind> <song,song,...> <title>";
    let kind = AlbumKind::from_str(parts.next().unwrap_or_default())
        .map_err(|_| anyhow!("unknown album kind; {usage}"))?;
    let songs = parse_list(parts.next().unwrap_or_default(), |id| {
        id.trim_start_matches('#').parse().map(SongId)
    })
    .context(usage)?;
    let title = parts.next().unwrap_or_default().trim();
    if title.is_empty() {
        bail!(usage);
    }
    Ok(Input::Album(ReleaseAlbum {
        title: title.to_string(),
        kind,
        songs,
    }))
}

fn parse_post(rest: &str) -> Result<Input> {
    let usage = "usage: post <platform> [image|video|audio] <text>";
    let (platform, rest) = rest
        .split_once(char::is_whitespace)
        .ok_or_else(|| anyhow!(usage))?;
    let platform = SocialPlatformKind::from_str(platform)
        .map_err(|_| anyhow!("unknown platform `{platform}`; {usage}"))?;

    let rest = rest.trim();
    let (media, content) = match rest.split_once(char::is_whitespace) {
        Some((first, text)) => match MediaKind::from_str(first) {
            Ok(media) => (Some(media), text.trim()),
            Err(_) => (None, rest),
        },
        None => (None, rest),
    };
    Ok(Input::Post(PostOnSocialMedia::new(platform, content, media)))
}

fn parse_resolve(rest: &str) -> Result<Input> {
    let usage = "usage: resolve <event-id> <option>";
    let mut parts = rest.split_whitespace();
    let event_id = parts.next().ok_or_else(|| anyhow!(usage))?.to_string();
    let option: usize = parts
        .next()
        .ok_or_else(|| anyhow!(usage))?
        .parse()
        .context(usage)?;
    let option = option
        .checked_sub(1)
        .ok_or_else(|| anyhow!("options are numbered from 1"))?;
    Ok(Input::Resolve { event_id, option })
}

fn parse_song(token: &str) -> Result<SongId> {
    token
        .trim_start_matches('#')
        .parse()
        .map(SongId)
        .with_context(|| format!("`{token}` is not a song number"))
}

fn parse_list<T, E>(list: &str, parse: impl Fn(&str) -> Result<T, E>) -> Result<Vec<T>>
where
    E: std::fmt::Display,
{
    list.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| parse(item).map_err(|e| anyhow!("`{item}`: {e}")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_case_insensitive() {
        assert_eq!(parse_line("  ADVANCE ").unwrap(), Input::Advance);
        assert_eq!(parse_line("").unwrap(), Input::Empty);
        assert!(parse_line("dance").is_err());
    }

    #[test]
    fn record_with_features() {
        let input = parse_line("record Late Night Drive with 2, 5").unwrap();
        assert_eq!(
            input,
            Input::Record(RecordSong::new(
                "Late Night Drive",
                vec![ArtistId(2), ArtistId(5)]
            ))
        );
        assert!(parse_line("record").is_err());
    }

    #[test]
    fn release_on_selected_platforms() {
        let Input::Release(release) = parse_line("release 3 spotify,Tidal").unwrap() else {
            panic!("expected a release");
        };
        assert_eq!(release.song, SongId(3));
        assert_eq!(
            release.platforms,
            [StreamingPlatformKind::Spotify, StreamingPlatformKind::Tidal]
                .into_iter()
                .collect()
        );

        let Input::Release(everywhere) = parse_line("release #4").unwrap() else {
            panic!("expected a release");
        };
        assert!(everywhere.platforms.is_empty());
    }

    #[test]
    fn album_and_post() {
        assert_eq!(
            parse_line("album ep 1,2,3 Summer Tapes").unwrap(),
            Input::Album(ReleaseAlbum {
                title: "Summer Tapes".into(),
                kind: AlbumKind::Ep,
                songs: vec![SongId(1), SongId(2), SongId(3)],
            })
        );
        assert_eq!(
            parse_line("post tiktok video new dance").unwrap(),
            Input::Post(PostOnSocialMedia::new(
                SocialPlatformKind::Tiktok,
                "new dance",
                Some(MediaKind::Video)
            ))
        );
        assert_eq!(
            parse_line("post twitter studio tonight").unwrap(),
            Input::Post(PostOnSocialMedia::new(
                SocialPlatformKind::Twitter,
                "studio tonight",
                None
            ))
        );
    }

    #[test]
    fn resolve_is_one_based() {
        assert_eq!(
            parse_line("resolve label_deal 2").unwrap(),
            Input::Resolve {
                event_id: "label_deal".into(),
                option: 1
            }
        );
        assert!(parse_line("resolve label_deal 0").is_err());
    }
}
