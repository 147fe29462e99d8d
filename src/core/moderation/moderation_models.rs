// Moderation domain models - data structures for the keyword moderation
// pipeline.
//
// These are pure domain types with no HTTP or GroupMe dependencies.
// The web layer converts the raw callback JSON into a `ModerationEvent`.

use serde::Deserialize;

/// Wording GroupMe uses in system messages when someone enters the group.
const JOIN_MARKERS: [&str; 2] = ["added", "joined"];

/// Raw webhook callback body as GroupMe sends it.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    /// Message text. Missing or null is treated as empty.
    #[serde(default)]
    pub text: Option<String>,
    /// External user identifier of the sender.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Sender display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Message identifier, when the platform supplies one.
    #[serde(default)]
    pub id: Option<String>,
    /// Set by the platform on system events (joins, topic changes, ...).
    #[serde(default)]
    pub system: bool,
}

/// What kind of event a callback turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A system message announcing that someone entered the group.
    SystemJoin,
    /// An ordinary chat message.
    Message,
}

/// One inbound event, classified and ready for the moderation pipeline.
#[derive(Debug, Clone)]
pub struct ModerationEvent {
    pub kind: EventKind,
    pub text: String,
    pub sender_id: Option<String>,
    pub sender_name: String,
    pub message_id: Option<String>,
}

impl From<WebhookPayload> for ModerationEvent {
    fn from(payload: WebhookPayload) -> Self {
        let text = payload.text.unwrap_or_default();

        // Only system messages can announce a join, and only when the
        // wording actually mentions one. Everything else is a regular
        // message as far as moderation is concerned.
        let kind = if payload.system && mentions_join(&text) {
            EventKind::SystemJoin
        } else {
            EventKind::Message
        };

        Self {
            kind,
            text,
            sender_id: payload.user_id,
            sender_name: payload.name.unwrap_or_else(|| "Unknown".to_string()),
            message_id: payload.id,
        }
    }
}

fn mentions_join(text: &str) -> bool {
    let lower = text.to_lowercase();
    JOIN_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// How the dispatcher resolved an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDisposition {
    /// A join was recorded for the sender.
    JoinRecorded,
    /// Nothing to do - clean message, unknown sender, or stale joiner.
    Ignored,
    /// Triggered moderation; the user was removed from the group.
    Removed,
    /// Triggered moderation, but the removal attempt failed. The join
    /// record is kept so the next message can retry.
    RemovalFailed,
}

/// One entry from the group member list.
///
/// GroupMe addresses removal by the internal membership id, not the
/// external user id carried on messages, so both are needed.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupMember {
    /// Internal membership identifier (scoped to this group).
    pub id: String,
    /// External user identifier (the one webhook payloads carry).
    pub user_id: String,
    /// Display name inside the group.
    #[serde(default)]
    pub nickname: String,
}

// ============================================================================
// TESTS
// ============================================================================
