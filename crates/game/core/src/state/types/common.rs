use std::fmt;

/// Discrete simulation turn. Week 1 is the first playable week.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Week(pub u32);

impl Week {
    pub const FIRST: Self = Self(1);

    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Whole weeks elapsed since `earlier`, zero if `earlier` is in the future.
    pub const fn since(self, earlier: Week) -> u32 {
        self.0.saturating_sub(earlier.0)
    }
}

impl Default for Week {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "week {}", self.0)
    }
}

/// Identifier for an artist on the charts: the player or an AI rapper.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ArtistId(pub u32);

impl ArtistId {
    /// Reserved identifier for the player. Sorts before every AI rapper.
    pub const PLAYER: Self = Self(0);

    #[inline]
    pub const fn is_player(self) -> bool {
        self.0 == Self::PLAYER.0
    }
}

impl fmt::Display for ArtistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

macro_rules! sequential_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

sequential_id!(
    /// Song identifier, allocated sequentially and never reused.
    SongId,
    "song#"
);
sequential_id!(
    /// Album identifier, allocated sequentially and never reused.
    AlbumId,
    "album#"
);
sequential_id!(
    /// Social post identifier.
    PostId,
    "post#"
);
