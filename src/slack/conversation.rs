//! Open direct message conversations with individual users.

use super::{api::*, auth::SlackAccessToken, error::SlackError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Slack user IDs, for example `U0123ABCD`. These are what mentions are built
/// from, and never contain a colon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Format without the surrounding newtype wrapper.
impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Conversations, including direct messages, are referred to by their
/// underlying ID. Direct message IDs typically begin with a `D`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelId(pub String);

/// <https://api.slack.com/methods/conversations.open#args>
#[derive(Serialize)]
struct OpenRequest<'a> {
    users: &'a UserId,
}

/// <https://api.slack.com/methods/conversations.open#examples>
#[derive(Deserialize)]
struct OpenResponse {
    #[allow(dead_code)]
    #[serde(deserialize_with = "crate::de::only_true")]
    ok: bool,
    channel: ChannelMeta,
}

/// The metadata we care about within [OpenResponse].
#[derive(Deserialize)]
struct ChannelMeta {
    id: ChannelId,
}

impl SlackClient {
    /// Get the ID of the direct message conversation between us and `user`,
    /// opening it if it doesn't already exist. Opening is idempotent on Slack's
    /// end so there's no need to keep track of what we've opened before.
    pub async fn open_dm(
        &self,
        user: &UserId,
        token: &SlackAccessToken,
    ) -> Result<ChannelId, SlackError> {
        let res: OpenResponse = self
            .call("/conversations.open", &OpenRequest { users: user }, token)
            .await?;

        Ok(res.channel.id)
    }
}
