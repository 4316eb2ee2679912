use super::{MediaKind, PostId, SocialPlatformKind, Week};

/// A published social-media post and the engagement it drew.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SocialPost {
    pub id: PostId,
    pub platform: SocialPlatformKind,
    pub content: String,
    pub media: Option<MediaKind>,
    pub week: Week,
    pub likes: u64,
    pub reposts: u64,
    pub new_followers: u64,
}
