//! Session event broadcasting.
//!
//! Workers publish [`SessionEvent`]s on the [`EventBus`]; clients subscribe
//! to the topics they render.

mod bus;
mod types;

pub use bus::{EventBus, SessionEvent, Topic};
pub use types::{RandomEventUpdate, SaveEvent, SocialEvent, WeekEvent};
