use crate::state::{
    ActiveEvent, AiRapper, ArtistId, CharacterStats, GameState, RelationshipStatus, STAT_MAX,
    SocialMediaPlatform, SocialPlatformKind, Song, SongId, StatKind, Week,
};
use crate::streaming::add_weekly_streams;

/// Wraps mutable access to [`GameState`] with structured sub-reducers.
///
/// Every clamp the state relies on (percentage stats in `[0, 100]`, wealth
/// and follower counts never negative) is enforced here.
pub struct StateReducer<'a> {
    state: &'a mut GameState,
}

impl<'a> StateReducer<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    pub fn allocate_song_id(&mut self) -> SongId {
        self.state.allocate_song_id()
    }

    pub fn stats(&mut self) -> StatsReducer<'_> {
        StatsReducer {
            stats: &mut self.state.stats,
        }
    }

    pub fn songs(&mut self) -> SongsReducer<'_> {
        SongsReducer {
            songs: &mut self.state.songs,
            week: self.state.week,
        }
    }

    pub fn social(&mut self) -> SocialReducer<'_> {
        SocialReducer {
            social: &mut self.state.social,
        }
    }

    pub fn rappers(&mut self) -> RappersReducer<'_> {
        RappersReducer {
            rappers: &mut self.state.rappers,
        }
    }

    pub fn week(&mut self) -> WeekReducer<'_> {
        WeekReducer {
            week: &mut self.state.week,
        }
    }

    pub fn events(&mut self) -> EventsReducer<'_> {
        EventsReducer {
            active: &mut self.state.active_events,
            resolved: &mut self.state.resolved_event_ids,
        }
    }
}

pub struct StatsReducer<'a> {
    stats: &'a mut CharacterStats,
}

impl StatsReducer<'_> {
    /// Applies a signed delta to one stat. Career level is derived from
    /// streams and ignores adjustments.
    pub fn adjust(&mut self, kind: StatKind, delta: i32) {
        let slot = match kind {
            StatKind::Wealth => return self.adjust_wealth(i64::from(delta)),
            StatKind::CareerLevel => return,
            StatKind::Reputation => &mut self.stats.reputation,
            StatKind::Creativity => &mut self.stats.creativity,
            StatKind::Marketing => &mut self.stats.marketing,
            StatKind::Networking => &mut self.stats.networking,
            StatKind::FanLoyalty => &mut self.stats.fan_loyalty,
        };
        *slot = clamp_percentage(*slot, delta);
    }

    /// Adds or removes wealth, flooring at zero.
    pub fn adjust_wealth(&mut self, delta: i64) {
        self.stats.wealth = if delta >= 0 {
            self.stats.wealth.saturating_add(delta.unsigned_abs())
        } else {
            self.stats.wealth.saturating_sub(delta.unsigned_abs())
        };
    }

    pub fn set_wealth(&mut self, wealth: u64) {
        self.stats.wealth = wealth;
    }

    pub fn set_career_level(&mut self, level: u32) {
        self.stats.career_level = level;
    }
}

fn clamp_percentage(current: u8, delta: i32) -> u8 {
    i32::from(current)
        .saturating_add(delta)
        .clamp(0, i32::from(STAT_MAX)) as u8
}

pub struct SongsReducer<'a> {
    songs: &'a mut Vec<Song>,
    week: Week,
}

impl SongsReducer<'_> {
    pub fn add(&mut self, song: Song) {
        self.songs.push(song);
    }

    pub fn song_mut(&mut self, id: SongId) -> Option<&mut Song> {
        self.songs.iter_mut().find(|song| song.id == id)
    }

    /// Adds `percent`% of the song's streams to it, distribution included.
    pub fn boost(&mut self, id: SongId, percent: u32) -> Option<u64> {
        let week = self.week;
        let song = self.song_mut(id)?;
        let extra = song.streams.saturating_mul(u64::from(percent)) / 100;
        add_weekly_streams(song, week, extra);
        Some(extra)
    }

    /// Returns `true` if the song was active before the call.
    pub fn deactivate(&mut self, id: SongId) -> Option<bool> {
        let song = self.song_mut(id)?;
        let was_active = song.active;
        song.active = false;
        Some(was_active)
    }

    pub fn replace_all(&mut self, songs: Vec<Song>) {
        *self.songs = songs;
    }
}

pub struct SocialReducer<'a> {
    social: &'a mut Vec<SocialMediaPlatform>,
}

impl SocialReducer<'_> {
    /// Signed follower change; `None` targets every platform.
    pub fn adjust_followers(&mut self, platform: Option<SocialPlatformKind>, delta: i64) {
        for entry in self
            .social
            .iter_mut()
            .filter(|entry| platform.is_none_or(|kind| kind == entry.kind))
        {
            entry.followers = if delta >= 0 {
                entry.followers.saturating_add(delta.unsigned_abs())
            } else {
                entry.followers.saturating_sub(delta.unsigned_abs())
            };
        }
    }

    /// Records a post and returns the platform's new post count.
    pub fn record_post(
        &mut self,
        platform: SocialPlatformKind,
        new_followers: u64,
        engagement_rate_bp: u32,
    ) -> u32 {
        match self.social.iter_mut().find(|entry| entry.kind == platform) {
            Some(entry) => {
                entry.followers = entry.followers.saturating_add(new_followers);
                entry.posts = entry.posts.saturating_add(1);
                entry.engagement_rate_bp = engagement_rate_bp;
                entry.posts
            }
            None => 0,
        }
    }

    pub fn replace_all(&mut self, social: Vec<SocialMediaPlatform>) {
        *self.social = social;
    }
}

pub struct RappersReducer<'a> {
    rappers: &'a mut Vec<AiRapper>,
}

impl RappersReducer<'_> {
    pub fn set_relationship(&mut self, id: ArtistId, status: RelationshipStatus) -> bool {
        match self.rappers.iter_mut().find(|rapper| rapper.id == id) {
            Some(rapper) => {
                rapper.relationship = status;
                true
            }
            None => false,
        }
    }

    pub fn adjust_popularity(&mut self, id: ArtistId, delta: i32) -> bool {
        match self.rappers.iter_mut().find(|rapper| rapper.id == id) {
            Some(rapper) => {
                rapper.popularity = clamp_percentage(rapper.popularity, delta);
                true
            }
            None => false,
        }
    }

    pub fn replace_all(&mut self, rappers: Vec<AiRapper>) {
        *self.rappers = rappers;
    }
}

pub struct WeekReducer<'a> {
    week: &'a mut Week,
}

impl WeekReducer<'_> {
    pub fn advance(&mut self, next: Week) {
        debug_assert!(next > *self.week);
        *self.week = next;
    }
}

pub struct EventsReducer<'a> {
    active: &'a mut Vec<ActiveEvent>,
    resolved: &'a mut Vec<String>,
}

impl EventsReducer<'_> {
    pub fn activate(&mut self, event: ActiveEvent) {
        self.active.push(event);
    }

    /// Removes the instance from the active list and records its id once.
    pub fn resolve(&mut self, id: &str) -> Option<ActiveEvent> {
        let index = self.active.iter().position(|event| event.id == id)?;
        let mut event = self.active.remove(index);
        event.resolved = true;
        if !self.resolved.iter().any(|seen| seen == id) {
            self.resolved.push(event.id.clone());
        }
        Some(event)
    }
}
