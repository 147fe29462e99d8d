// Action executor - carries out a moderation decision against the group.
//
// Every outbound call is best-effort: failures are logged and reported as
// a boolean to the orchestration, never thrown past this boundary and
// never retried. The pipeline for one triggered event is
//   delete message (best-effort) -> remove user -> notify on success.

use async_trait::async_trait;
use thiserror::Error;

use super::moderation_models::{GroupMember, ModerationEvent};

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum GroupApiError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected status {0}")]
    Status(u16),
}

// ============================================================================
// CHAT API TRAIT (PORT)
// ============================================================================

/// The slice of the GroupMe REST API the executor needs.
///
/// Implemented by the reqwest client in infra and by mocks in tests.
#[async_trait]
pub trait GroupApi: Send + Sync {
    /// Post a message to the group under the bot's identity.
    async fn post_bot_message(&self, text: &str) -> Result<(), GroupApiError>;

    /// Fetch the current member list of the group.
    async fn group_members(&self) -> Result<Vec<GroupMember>, GroupApiError>;

    /// Remove a member by their internal membership id.
    async fn remove_member(&self, membership_id: &str) -> Result<(), GroupApiError>;

    /// Delete a message from the group's conversation.
    async fn delete_message(&self, message_id: &str) -> Result<(), GroupApiError>;
}

// ============================================================================
// EXECUTOR
// ============================================================================

/// Executes moderation actions through a `GroupApi`.
pub struct ActionExecutor<A: GroupApi> {
    pub(crate) api: A,
}

impl<A: GroupApi> ActionExecutor<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Run the full pipeline for a triggered event.
    ///
    /// Returns `true` iff the user was removed from the group. The
    /// message delete is attempted first but its outcome does not gate
    /// the removal; the notification is only sent after a successful
    /// removal. A notification failure is logged and otherwise ignored.
    pub async fn enforce(&self, event: &ModerationEvent, user_id: &str) -> bool {
        if let Some(message_id) = &event.message_id {
            self.delete_message(message_id).await;
        }

        if !self.remove_user(user_id, &event.sender_name).await {
            return false;
        }

        let announcement = format!(
            "⚠️ User {} was removed for violating group rules.",
            event.sender_name
        );
        self.notify(&announcement).await;

        true
    }

    /// Delete a message. Returns `true` on success.
    pub async fn delete_message(&self, message_id: &str) -> bool {
        match self.api.delete_message(message_id).await {
            Ok(()) => {
                tracing::info!(message_id, "Deleted offending message");
                true
            }
            Err(e) => {
                tracing::warn!(message_id, "Failed to delete message: {}", e);
                false
            }
        }
    }

    /// Remove a user from the group. Returns `true` on success.
    ///
    /// Webhook payloads only carry the external user id, so the member
    /// list is fetched first to resolve the internal membership id the
    /// removal endpoint wants. A lookup miss aborts the removal.
    pub async fn remove_user(&self, user_id: &str, username: &str) -> bool {
        let members = match self.api.group_members().await {
            Ok(members) => members,
            Err(e) => {
                tracing::error!("Failed to fetch group members: {}", e);
                return false;
            }
        };

        let Some(member) = members.iter().find(|m| m.user_id == user_id) else {
            tracing::warn!(user_id, username, "User not found among group members");
            return false;
        };

        match self.api.remove_member(&member.id).await {
            Ok(()) => {
                tracing::info!(
                    user_id,
                    username,
                    nickname = %member.nickname,
                    "Removed user from group"
                );
                true
            }
            Err(e) => {
                tracing::error!(user_id, username, "Failed to remove user: {}", e);
                false
            }
        }
    }

    /// Post an announcement under the bot's identity. Returns `true` on
    /// success.
    pub async fn notify(&self, text: &str) -> bool {
        match self.api.post_bot_message(text).await {
            Ok(()) => {
                tracing::info!("Posted notification: {}", text);
                true
            }
            Err(e) => {
                tracing::error!("Failed to post notification: {}", e);
                false
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
