// The infra module contains implementations of core traits.
// Each feature implementation goes in its own submodule.

#[path = "groupme/groupme_client.rs"]
pub mod groupme;
