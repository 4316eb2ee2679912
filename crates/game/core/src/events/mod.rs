//! Random event engine.
//!
//! Decides once per committed week whether to surface a narrative event and
//! applies the chosen option as a pure state transform.
mod apply;
pub mod catalog;
mod eligibility;
mod selector;

pub use catalog::{AI_TRACK_FEATURE_ID, FEATURE_REQUEST_ID, default_pool, is_dynamic};
pub use eligibility::is_eligible;
pub use selector::{DrawBranch, EventSelector};
