// GroupMe v3 REST API client.
//
// Deliberately exposes only the calls the core layer needs: bot posts,
// the member list, member removal and message deletion. Authentication
// is an access token passed as a query parameter; bot posts instead
// carry the bot id in the body.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;

use crate::core::moderation::{GroupApi, GroupApiError, GroupMember};

pub const GROUPME_API: &str = "https://api.groupme.com/v3";

pub struct GroupMeApiClient {
    client: Client,
    base_url: String,
    bot_id: String,
    access_token: String,
    group_id: String,
}

impl GroupMeApiClient {
    pub fn new(
        bot_id: String,
        access_token: String,
        group_id: String,
        base_url: Option<String>,
    ) -> Result<Self, GroupApiError> {
        let client = Client::builder()
            .user_agent("groupme-guard/0.2")
            .build()
            .map_err(|e| GroupApiError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.unwrap_or_else(|| GROUPME_API.to_string()),
            bot_id,
            access_token,
            group_id,
        })
    }

    fn check_status(status: StatusCode) -> Result<(), GroupApiError> {
        if status.is_success() {
            Ok(())
        } else {
            Err(GroupApiError::Status(status.as_u16()))
        }
    }
}

#[async_trait]
impl GroupApi for GroupMeApiClient {
    async fn post_bot_message(&self, text: &str) -> Result<(), GroupApiError> {
        let url = format!("{}/bots/post", self.base_url);
        let resp = self
            .client
            .post(url)
            .json(&json!({ "bot_id": self.bot_id, "text": text }))
            .send()
            .await
            .map_err(|e| GroupApiError::Transport(e.to_string()))?;

        // GroupMe acknowledges bot posts with 202 Accepted.
        Self::check_status(resp.status())
    }

    async fn group_members(&self) -> Result<Vec<GroupMember>, GroupApiError> {
        let url = format!("{}/groups/{}", self.base_url, self.group_id);
        let resp = self
            .client
            .get(url)
            .query(&[("token", self.access_token.as_str())])
            .send()
            .await
            .map_err(|e| GroupApiError::Transport(e.to_string()))?;

        Self::check_status(resp.status())?;

        let envelope: GroupEnvelope = resp
            .json()
            .await
            .map_err(|e| GroupApiError::Transport(e.to_string()))?;

        Ok(envelope.response.map(|g| g.members).unwrap_or_default())
    }

    async fn remove_member(&self, membership_id: &str) -> Result<(), GroupApiError> {
        let url = format!(
            "{}/groups/{}/members/{}/remove",
            self.base_url, self.group_id, membership_id
        );
        let resp = self
            .client
            .post(url)
            .query(&[("token", self.access_token.as_str())])
            .send()
            .await
            .map_err(|e| GroupApiError::Transport(e.to_string()))?;

        Self::check_status(resp.status())
    }

    async fn delete_message(&self, message_id: &str) -> Result<(), GroupApiError> {
        let url = format!(
            "{}/conversations/{}/messages/{}",
            self.base_url, self.group_id, message_id
        );
        let resp = self
            .client
            .delete(url)
            .query(&[("token", self.access_token.as_str())])
            .send()
            .await
            .map_err(|e| GroupApiError::Transport(e.to_string()))?;

        Self::check_status(resp.status())
    }
}

// GroupMe wraps every payload in a {"response": ..., "meta": ...} envelope.

#[derive(Debug, Deserialize)]
struct GroupEnvelope {
    response: Option<GroupInfo>,
}

#[derive(Debug, Deserialize)]
struct GroupInfo {
    #[serde(default)]
    members: Vec<GroupMember>,
}
