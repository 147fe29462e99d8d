// Core moderation module - keyword policy, action executor and the
// dispatcher service that ties them to the membership tracker.

pub mod action_executor;
pub mod keyword_filter;
pub mod moderation_models;
pub mod moderation_service;

pub use action_executor::*;
pub use keyword_filter::*;
pub use moderation_models::*;
pub use moderation_service::*;
