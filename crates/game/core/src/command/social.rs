use tracing::debug;

use crate::engine::{EngineError, StateReducer};
use crate::env::{GameEnv, RngOracle, compute_seed, roll};
use crate::state::{GameState, MediaKind, SocialPlatformKind, SocialPost, StatKind, WeekPhase};
use crate::streaming::saturating_u64;

use super::CommandTransition;

/// Likes needed per gained follower.
const LIKES_PER_FOLLOWER: u64 = 20;
/// Marketing rises by one every this many posts on a platform.
const POSTS_PER_MARKETING_POINT: u32 = 5;
/// Extra multiplier for video content on TikTok.
const TIKTOK_VIDEO_BONUS: f64 = 1.5;

/// Publishes a post on one social platform.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PostOnSocialMedia {
    pub platform: SocialPlatformKind,
    pub content: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub media: Option<MediaKind>,
}

impl PostOnSocialMedia {
    pub fn new(
        platform: SocialPlatformKind,
        content: impl Into<String>,
        media: Option<MediaKind>,
    ) -> Self {
        Self {
            platform,
            content: content.into(),
            media,
        }
    }
}

/// Likes a post draws, before it is published.
///
/// `followers * base rate * (1 + marketing/100) * roll[0.5, 1.5]`, scaled by
/// the media multiplier (and again for TikTok video).
pub fn engagement_likes(
    followers: u64,
    marketing: u8,
    platform: SocialPlatformKind,
    media: Option<MediaKind>,
    rng: &dyn RngOracle,
    seed: u64,
) -> u64 {
    let rate = f64::from(platform.base_engagement_bp()) / 10_000.0;
    let mut likes = followers as f64
        * rate
        * (1.0 + f64::from(marketing) / 100.0)
        * rng.range_f64(seed, 0.5, 1.5);

    if let Some(media) = media {
        likes *= media.engagement_multiplier();
        if media == MediaKind::Video && platform == SocialPlatformKind::Tiktok {
            likes *= TIKTOK_VIDEO_BONUS;
        }
    }
    saturating_u64(likes)
}

impl CommandTransition for PostOnSocialMedia {
    type Output = SocialPost;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), EngineError> {
        if let WeekPhase::SummaryReady(_) = state.phase {
            return Err(EngineError::phase(WeekPhase::Idle.name(), state.phase.name()));
        }
        if self.content.trim().is_empty() {
            return Err(EngineError::InvalidInput("post content must not be empty"));
        }
        if self
            .platform
            .max_post_chars()
            .is_some_and(|max| self.content.chars().count() > max)
        {
            return Err(EngineError::InvalidInput("post exceeds the platform's length limit"));
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<SocialPost, EngineError> {
        let followers = state
            .social_platform(self.platform)
            .map(|platform| platform.followers)
            .unwrap_or(0);
        let post_id = state.allocate_post_id();
        let seed = |context| compute_seed(state.game_seed, state.nonce, post_id.0, context);

        let likes = engagement_likes(
            followers,
            state.stats.marketing,
            self.platform,
            self.media,
            env.rng(),
            seed(roll::POST_ENGAGEMENT),
        );
        let repost_rate = env.rng().range_f64(seed(roll::POST_REPOSTS), 0.05, 0.15);
        let reposts = saturating_u64(likes as f64 * repost_rate);
        let new_followers = likes / LIKES_PER_FOLLOWER;
        let engagement_rate_bp =
            u32::try_from(likes.saturating_mul(10_000) / followers.max(1)).unwrap_or(u32::MAX);

        let post = SocialPost {
            id: post_id,
            platform: self.platform,
            content: self.content.clone(),
            media: self.media,
            week: state.week,
            likes,
            reposts,
            new_followers,
        };

        let mut reducer = StateReducer::new(state);
        let posts = reducer
            .social()
            .record_post(self.platform, new_followers, engagement_rate_bp);
        if posts > 0 && posts % POSTS_PER_MARKETING_POINT == 0 {
            reducer.stats().adjust(StatKind::Marketing, 1);
        }
        state.posts.push(post.clone());

        debug!(id = %post.id, platform = %self.platform, likes, new_followers, "posted");
        Ok(post)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::PcgRng;

    struct Midpoint;

    impl RngOracle for Midpoint {
        fn next_u32(&self, _seed: u64) -> u32 {
            1 << 31
        }
    }

    #[test]
    fn tiktok_video_gets_the_extra_bonus() {
        let plain = engagement_likes(10_000, 0, SocialPlatformKind::Tiktok, None, &Midpoint, 1);
        let video = engagement_likes(
            10_000,
            0,
            SocialPlatformKind::Tiktok,
            Some(MediaKind::Video),
            &Midpoint,
            1,
        );
        assert!((899..=900).contains(&plain), "got {plain}");
        assert!((2_429..=2_430).contains(&video), "got {video}");
    }

    #[test]
    fn twitter_enforces_the_length_limit() {
        let config = GameConfig::default();
        let env = GameEnv::with_config(&config);
        let state = GameState::new(1);

        let long = PostOnSocialMedia::new(SocialPlatformKind::Twitter, "x".repeat(281), None);
        assert!(matches!(
            long.pre_validate(&state, &env),
            Err(EngineError::InvalidInput(_))
        ));
        let fits = PostOnSocialMedia::new(SocialPlatformKind::Twitter, "x".repeat(280), None);
        assert_eq!(fits.pre_validate(&state, &env), Ok(()));
        let long_elsewhere =
            PostOnSocialMedia::new(SocialPlatformKind::Instagram, "x".repeat(281), None);
        assert_eq!(long_elsewhere.pre_validate(&state, &env), Ok(()));
    }

    #[test]
    fn empty_posts_are_rejected() {
        let config = GameConfig::default();
        let env = GameEnv::with_config(&config);
        let post = PostOnSocialMedia::new(SocialPlatformKind::Youtube, "  ", None);
        assert!(post.pre_validate(&GameState::new(1), &env).is_err());
    }

    #[test]
    fn every_fifth_post_raises_marketing() {
        let config = GameConfig::default();
        let env = GameEnv::new(&config, &PcgRng);
        let mut state = GameState::new(5);
        state.social[1].followers = 2_000;
        let marketing = state.stats.marketing;

        let command = PostOnSocialMedia::new(SocialPlatformKind::Tiktok, "new single out", None);
        for _ in 0..5 {
            command.apply(&mut state, &env).unwrap();
        }

        assert_eq!(state.stats.marketing, marketing + 1);
        assert_eq!(state.posts.len(), 5);
        assert_eq!(
            state.social_platform(SocialPlatformKind::Tiktok).map(|p| p.posts),
            Some(5)
        );
        let gained: u64 = state.posts.iter().map(|post| post.new_followers).sum();
        assert_eq!(
            state.social_platform(SocialPlatformKind::Tiktok).map(|p| p.followers),
            Some(2_000 + gained)
        );
    }
}
