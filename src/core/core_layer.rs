// The core module contains all business logic.
// Each feature gets its own submodule.

#[path = "membership/membership_tracker.rs"]
pub mod membership;

#[path = "moderation/mod.rs"]
pub mod moderation;
