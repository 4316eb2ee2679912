//! Streaming and social-media platforms.

/// Streaming services a song can be released on.
///
/// Declaration order is the canonical order used by the distribution
/// generator and every per-platform map.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StreamingPlatformKind {
    Spotify,
    YoutubeMusic,
    Itunes,
    Soundcloud,
    Tidal,
    Deezer,
}

impl StreamingPlatformKind {
    pub const ALL: [Self; 6] = [
        Self::Spotify,
        Self::YoutubeMusic,
        Self::Itunes,
        Self::Soundcloud,
        Self::Tidal,
        Self::Deezer,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Spotify => "Spotify",
            Self::YoutubeMusic => "YouTube Music",
            Self::Itunes => "iTunes",
            Self::Soundcloud => "SoundCloud",
            Self::Tidal => "Tidal",
            Self::Deezer => "Deezer",
        }
    }

    /// Target market share across the whole catalog.
    pub const fn market_share(self) -> f64 {
        match self {
            Self::Spotify => 0.55,
            Self::YoutubeMusic => 0.28,
            Self::Itunes => 0.12,
            Self::Soundcloud => 0.05,
            Self::Tidal => 0.03,
            Self::Deezer => 0.02,
        }
    }

    /// Payout per stream in micro-dollars.
    pub const fn payout_micros(self) -> u64 {
        match self {
            Self::Spotify => 3_000,
            Self::YoutubeMusic => 2_000,
            Self::Itunes => 10_000,
            Self::Soundcloud => 2_500,
            Self::Tidal => 12_000,
            Self::Deezer => 4_000,
        }
    }
}

impl core::fmt::Display for StreamingPlatformKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Aggregate numbers for one streaming platform, recomputed every week.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StreamingPlatform {
    pub kind: StreamingPlatformKind,
    pub listeners: u64,
    pub total_streams: u64,
    /// Lifetime payout in whole dollars.
    pub revenue: u64,
}

impl StreamingPlatform {
    pub fn new(kind: StreamingPlatformKind) -> Self {
        Self {
            kind,
            listeners: 0,
            total_streams: 0,
            revenue: 0,
        }
    }

    /// One zeroed entry per platform in canonical order.
    pub fn all() -> Vec<Self> {
        StreamingPlatformKind::ALL
            .iter()
            .copied()
            .map(Self::new)
            .collect()
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SocialPlatformKind {
    Twitter,
    Tiktok,
    Instagram,
    Youtube,
}

impl SocialPlatformKind {
    pub const ALL: [Self; 4] = [Self::Twitter, Self::Tiktok, Self::Instagram, Self::Youtube];

    /// Share of weekly follower growth that lands on this platform.
    pub const fn follower_weight(self) -> f64 {
        match self {
            Self::Tiktok => 0.35,
            Self::Instagram => 0.30,
            Self::Twitter => 0.20,
            Self::Youtube => 0.15,
        }
    }

    /// Maximum post length in characters, if the platform enforces one.
    pub const fn max_post_chars(self) -> Option<usize> {
        match self {
            Self::Twitter => Some(280),
            _ => None,
        }
    }

    /// Baseline likes per follower, in basis points.
    pub const fn base_engagement_bp(self) -> u32 {
        match self {
            Self::Twitter => 300,
            Self::Tiktok => 900,
            Self::Instagram => 600,
            Self::Youtube => 450,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SocialMediaPlatform {
    pub kind: SocialPlatformKind,
    pub followers: u64,
    pub posts: u32,
    /// Engagement of the latest post, in basis points of followers.
    pub engagement_rate_bp: u32,
}

impl SocialMediaPlatform {
    pub fn new(kind: SocialPlatformKind) -> Self {
        Self {
            kind,
            followers: 0,
            posts: 0,
            engagement_rate_bp: kind.base_engagement_bp(),
        }
    }

    pub fn all() -> Vec<Self> {
        SocialPlatformKind::ALL
            .iter()
            .copied()
            .map(Self::new)
            .collect()
    }
}

/// Attachment on a social post.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MediaKind {
    Image,
    Video,
    Audio,
}

impl MediaKind {
    pub const fn engagement_multiplier(self) -> f64 {
        match self {
            Self::Video => 1.8,
            Self::Image => 1.3,
            Self::Audio => 1.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::str::FromStr;

    use super::*;

    #[test]
    fn platform_lists_are_unique_and_named() {
        let streaming: BTreeSet<_> = StreamingPlatformKind::ALL.into_iter().collect();
        assert_eq!(streaming.len(), StreamingPlatformKind::ALL.len());
        for kind in StreamingPlatformKind::ALL {
            assert_eq!(StreamingPlatformKind::from_str(kind.as_ref()), Ok(kind));
        }

        let social: BTreeSet<_> = SocialPlatformKind::ALL.into_iter().collect();
        assert_eq!(social.len(), SocialPlatformKind::ALL.len());
        for kind in SocialPlatformKind::ALL {
            assert_eq!(SocialPlatformKind::from_str(kind.as_ref()), Ok(kind));
        }
    }

    #[test]
    fn follower_weights_split_all_growth() {
        let total: f64 = SocialPlatformKind::ALL
            .into_iter()
            .map(SocialPlatformKind::follower_weight)
            .sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert_eq!(
            StreamingPlatform::all()
                .iter()
                .map(|platform| platform.kind)
                .collect::<Vec<_>>(),
            StreamingPlatformKind::ALL.to_vec()
        );
    }
}
