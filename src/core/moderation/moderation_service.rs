// Moderation service - routes inbound events through the moderation
// pipeline.
//
// This is the decision logic behind the webhook endpoint:
// - join system-events feed the membership tracker,
// - regular messages are checked against the keyword filter, and only
//   messages from recent joiners trigger the action executor.
//
// NO HTTP dependencies here - the web layer hands over already-parsed
// events and only cares that this never fails.

use crate::core::membership::{Clock, MembershipTracker};

use super::action_executor::{ActionExecutor, GroupApi};
use super::keyword_filter::KeywordFilter;
use super::moderation_models::{EventDisposition, EventKind, ModerationEvent};

/// Ties the tracker, the keyword policy and the executor together.
pub struct ModerationService<A: GroupApi, C: Clock> {
    tracker: MembershipTracker<C>,
    filter: KeywordFilter,
    executor: ActionExecutor<A>,
}

impl<A: GroupApi, C: Clock> ModerationService<A, C> {
    pub fn new(tracker: MembershipTracker<C>, filter: KeywordFilter, api: A) -> Self {
        Self {
            tracker,
            filter,
            executor: ActionExecutor::new(api),
        }
    }

    /// Number of configured banned keywords.
    pub fn keyword_count(&self) -> usize {
        self.filter.keyword_count()
    }

    /// Would this event trigger moderation right now?
    ///
    /// Note that the recency check evicts expired join records as a side
    /// effect, so asking is not entirely free of consequence.
    pub fn should_moderate(&self, event: &ModerationEvent) -> bool {
        if event.kind != EventKind::Message {
            return false;
        }
        if !self.filter.contains_banned(&event.text) {
            return false;
        }
        match &event.sender_id {
            Some(sender_id) => self.tracker.is_recent_joiner(sender_id),
            None => false,
        }
    }

    /// Process one inbound event to completion.
    ///
    /// Never fails: anything that goes wrong downstream has already been
    /// logged and absorbed, and the caller acks the webhook either way.
    pub async fn handle_event(&self, event: ModerationEvent) -> EventDisposition {
        match event.kind {
            EventKind::SystemJoin => {
                let Some(sender_id) = &event.sender_id else {
                    tracing::debug!("Join system-event without a user id, ignoring");
                    return EventDisposition::Ignored;
                };
                self.tracker.record_join(sender_id);
                EventDisposition::JoinRecorded
            }
            EventKind::Message => {
                if !self.should_moderate(&event) {
                    return EventDisposition::Ignored;
                }
                // should_moderate only passes with a sender id present.
                let sender_id = event.sender_id.clone().unwrap_or_default();

                tracing::info!(
                    user_id = %sender_id,
                    username = %event.sender_name,
                    "Banned keyword from a recent joiner, enforcing"
                );

                if self.executor.enforce(&event, &sender_id).await {
                    self.tracker.forget(&sender_id);
                    EventDisposition::Removed
                } else {
                    // Join record stays put so the next message from this
                    // user gets another removal attempt.
                    EventDisposition::RemovalFailed
                }
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
