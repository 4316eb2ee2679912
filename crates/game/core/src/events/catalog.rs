//! Built-in event pool.
//!
//! The content crate ships a richer RON catalog; this pool keeps the engine
//! playable (and testable) without any content files.
use std::collections::BTreeMap;

use crate::state::{
    Effect, EventOption, EventTemplate, RelationshipStatus, SocialPlatformKind, SongTier, StatKind,
};

/// An AI rapper asks the player for a verse. Instanced per week.
pub const FEATURE_REQUEST_ID: &str = "feature_request";
/// An AI rapper's track with a feature slot. Instanced per week.
pub const AI_TRACK_FEATURE_ID: &str = "ai_track_feature";

/// Placeholder replaced by the subject rapper's name.
pub const RAPPER_PLACEHOLDER: &str = "{rapper}";

/// Templates instanced once per week instead of once per session.
pub fn is_dynamic(template_id: &str) -> bool {
    template_id == FEATURE_REQUEST_ID || template_id == AI_TRACK_FEATURE_ID
}

fn option(text: &str, effects: Vec<Effect>) -> EventOption {
    EventOption {
        text: text.to_string(),
        effects,
    }
}

fn template(
    id: &str,
    title: &str,
    description: &str,
    requires: &[(StatKind, u32)],
    options: Vec<EventOption>,
) -> EventTemplate {
    EventTemplate {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        requires_stats: requires.iter().copied().collect::<BTreeMap<_, _>>(),
        options,
    }
}

pub fn default_pool() -> Vec<EventTemplate> {
    use Effect::*;

    vec![
        template(
            FEATURE_REQUEST_ID,
            "{rapper} wants you on a track",
            "{rapper} heard your catalog and is asking for a verse.",
            &[(StatKind::CareerLevel, 1)],
            vec![
                option(
                    "Hop on the verse",
                    vec![
                        ReleaseFeatureSong {
                            title: "Link Up (feat. {rapper})".into(),
                            tier: SongTier::Solid,
                            streams: 5_000,
                        },
                        SetRelationship {
                            status: RelationshipStatus::Collaborator,
                        },
                        AdjustStat {
                            stat: StatKind::Networking,
                            delta: 3,
                        },
                    ],
                ),
                option(
                    "Ask for a fee",
                    vec![
                        AdjustWealth { delta: 2_000 },
                        AdjustStat {
                            stat: StatKind::Reputation,
                            delta: 1,
                        },
                    ],
                ),
                option(
                    "Turn it down",
                    vec![AdjustStat {
                        stat: StatKind::Networking,
                        delta: -1,
                    }],
                ),
            ],
        ),
        template(
            AI_TRACK_FEATURE_ID,
            "{rapper} has a slot on a new single",
            "{rapper} is dropping a single and the second verse is open.",
            &[(StatKind::Reputation, 20)],
            vec![
                option(
                    "Record a verse",
                    vec![
                        ReleaseFeatureSong {
                            title: "Open Verse ({rapper} feat. You)".into(),
                            tier: SongTier::Hit,
                            streams: 12_000,
                        },
                        SetRelationship {
                            status: RelationshipStatus::Friendly,
                        },
                        AdjustStat {
                            stat: StatKind::Reputation,
                            delta: 2,
                        },
                    ],
                ),
                option("Pass this time", vec![]),
            ],
        ),
        template(
            "label_deal_offer",
            "A label wants to sign you",
            "A mid-size label offers an advance in exchange for creative control.",
            &[(StatKind::Reputation, 40)],
            vec![
                option(
                    "Sign the deal",
                    vec![
                        AdjustWealth { delta: 25_000 },
                        AdjustStat {
                            stat: StatKind::Marketing,
                            delta: 10,
                        },
                        AdjustStat {
                            stat: StatKind::Creativity,
                            delta: -5,
                        },
                    ],
                ),
                option(
                    "Stay independent",
                    vec![AdjustStat {
                        stat: StatKind::Reputation,
                        delta: 3,
                    }],
                ),
            ],
        ),
        template(
            "beef_with_rival",
            "{rapper} took a shot at you",
            "A diss line aimed at you is all over the timeline.",
            &[],
            vec![
                option(
                    "Drop a response track",
                    vec![
                        SetRelationship {
                            status: RelationshipStatus::Enemy,
                        },
                        AdjustStat {
                            stat: StatKind::Reputation,
                            delta: 5,
                        },
                        AdjustRapperPopularity { delta: 3 },
                    ],
                ),
                option(
                    "Stay quiet",
                    vec![AdjustStat {
                        stat: StatKind::Reputation,
                        delta: -2,
                    }],
                ),
            ],
        ),
        template(
            "leaked_demo",
            "Your demo leaked",
            "An unfinished track is circulating online.",
            &[],
            vec![
                option(
                    "Release it officially",
                    vec![
                        BoostSongStreams { percent: 20 },
                        AdjustStat {
                            stat: StatKind::Creativity,
                            delta: -2,
                        },
                    ],
                ),
                option("Send takedowns", vec![AdjustWealth { delta: -1_000 }]),
            ],
        ),
        template(
            "brand_sponsor",
            "A sneaker brand wants a post",
            "They pay well, but fans might call it a sellout.",
            &[(StatKind::Marketing, 15)],
            vec![
                option(
                    "Take the money",
                    vec![
                        AdjustWealth { delta: 5_000 },
                        AdjustStat {
                            stat: StatKind::FanLoyalty,
                            delta: -3,
                        },
                    ],
                ),
                option("Pass", vec![]),
            ],
        ),
        template(
            "studio_session",
            "Late-night studio session",
            "A producer friend has the booth free tonight.",
            &[],
            vec![
                option(
                    "Book it",
                    vec![
                        AdjustWealth { delta: -300 },
                        AdjustStat {
                            stat: StatKind::Creativity,
                            delta: 3,
                        },
                    ],
                ),
                option("Get some sleep", vec![]),
            ],
        ),
        template(
            "radio_interview",
            "Local radio interview",
            "A morning show wants you on air.",
            &[],
            vec![option(
                "Go on air",
                vec![
                    AdjustStat {
                        stat: StatKind::Marketing,
                        delta: 4,
                    },
                    AdjustFollowers {
                        platform: None,
                        delta: 200,
                    },
                ],
            )],
        ),
        template(
            "dance_trend",
            "Your hook is a dance trend",
            "Creators are using your latest single in short videos.",
            &[],
            vec![
                option(
                    "Join the trend",
                    vec![
                        BoostSongStreams { percent: 50 },
                        AdjustFollowers {
                            platform: Some(SocialPlatformKind::Tiktok),
                            delta: 500,
                        },
                    ],
                ),
                option("Let it run", vec![BoostSongStreams { percent: 20 }]),
            ],
        ),
        template(
            "scandal_rumor",
            "A rumor is spreading",
            "A blog posted an unverified story about you.",
            &[],
            vec![
                option(
                    "Address it",
                    vec![
                        AdjustStat {
                            stat: StatKind::Reputation,
                            delta: -1,
                        },
                        AdjustStat {
                            stat: StatKind::Marketing,
                            delta: 2,
                        },
                    ],
                ),
                option(
                    "Ignore it",
                    vec![AdjustStat {
                        stat: StatKind::Reputation,
                        delta: -4,
                    }],
                ),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{EventKind, GameState};

    #[test]
    fn default_pool_installs_cleanly() {
        let pool = default_pool();
        assert!(GameState::new(1).with_event_pool(pool.clone()).is_ok());
        assert!(pool.iter().any(|t| t.id == FEATURE_REQUEST_ID));
        assert!(pool.iter().any(|t| t.id == AI_TRACK_FEATURE_ID));
    }

    #[test]
    fn kinds_follow_ids() {
        let pool = default_pool();
        let kind_of = |id: &str| pool.iter().find(|t| t.id == id).map(|t| t.kind());
        assert_eq!(kind_of("beef_with_rival"), Some(EventKind::Challenge));
        assert_eq!(kind_of("label_deal_offer"), Some(EventKind::Opportunity));
        assert_eq!(kind_of("studio_session"), Some(EventKind::Neutral));
    }
}
