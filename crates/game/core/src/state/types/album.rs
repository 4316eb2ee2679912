use super::{AlbumId, SongId, Week};

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AlbumKind {
    Standard,
    Deluxe,
    Remix,
    Ep,
    Compilation,
}

impl AlbumKind {
    /// Inclusive track-count bounds; `None` means no upper limit.
    pub const fn track_bounds(self) -> (usize, Option<usize>) {
        match self {
            Self::Ep => (3, Some(6)),
            Self::Remix | Self::Compilation => (3, None),
            Self::Standard | Self::Deluxe => (7, None),
        }
    }
}

/// Stream certification awarded to an album.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Certification {
    Gold,
    Platinum,
    /// N-times platinum, N >= 2.
    MultiPlatinum(u16),
    Diamond,
}

impl Certification {
    pub const GOLD_STREAMS: u64 = 10_000_000;
    pub const PLATINUM_STREAMS: u64 = 25_000_000;
    pub const DIAMOND_STREAMS: u64 = 250_000_000;

    /// Every certification earned at `streams`, lowest first.
    pub fn earned(streams: u64) -> Vec<Certification> {
        let mut earned = Vec::new();
        if streams >= Self::GOLD_STREAMS {
            earned.push(Certification::Gold);
        }
        if streams >= Self::PLATINUM_STREAMS {
            earned.push(Certification::Platinum);
        }
        let multiple = streams / Self::PLATINUM_STREAMS;
        for times in 2..=multiple {
            earned.push(Certification::MultiPlatinum(
                u16::try_from(times).unwrap_or(u16::MAX),
            ));
        }
        if streams >= Self::DIAMOND_STREAMS {
            earned.push(Certification::Diamond);
        }
        earned
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Album {
    pub id: AlbumId,
    pub title: String,
    pub kind: AlbumKind,
    /// Ordered back-references; albums do not own their songs.
    pub song_ids: Vec<SongId>,
    /// Sum of the referenced songs' streams.
    pub streams: u64,
    pub release_date: Week,
    pub certifications: Vec<Certification>,
}

impl Album {
    pub fn new(
        id: AlbumId,
        title: impl Into<String>,
        kind: AlbumKind,
        song_ids: Vec<SongId>,
        release_date: Week,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            kind,
            song_ids,
            streams: 0,
            release_date,
            certifications: Vec::new(),
        }
    }

    /// Adds certifications earned at the current stream count. Never removes.
    pub fn certify(&mut self) {
        for certification in Certification::earned(self.streams) {
            if !self.certifications.contains(&certification) {
                self.certifications.push(certification);
            }
        }
    }
}
