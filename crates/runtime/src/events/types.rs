//! Event payloads for each topic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rapsim_core::{ActiveEvent, SocialPost, Week, WeeklySummary};

use crate::repository::SaveKey;

/// Weekly advancement progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum WeekEvent {
    /// The coming week was simulated and awaits commit.
    Staged { summary: WeeklySummary },

    /// The staged week was applied; `week` is the new current week.
    Committed {
        week: Week,
        summary: WeeklySummary,
        career_level: u32,
    },
}

/// Random-event lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RandomEventUpdate {
    Triggered(ActiveEvent),
    Resolved { event: ActiveEvent, option: usize },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SocialEvent {
    Posted(SocialPost),
}

/// Persistence results reported by the auto-saver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SaveEvent {
    Saved {
        key: SaveKey,
        at: DateTime<Utc>,
    },

    /// The primary backend failed and the local fallback took the save.
    FellBack {
        key: SaveKey,
        at: DateTime<Utc>,
        reason: String,
    },

    Failed { reason: String },
}
