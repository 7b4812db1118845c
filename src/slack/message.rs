//! Send messages to, and update messages within, a given Slack conversation.

use super::{api::*, block::Block, conversation::ChannelId, SlackAccessToken, SlackError};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// The timestamp Slack identifies a message by within its conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageTs(pub String);

/// A message body, either plain text alone or blocks with a text fallback.
pub struct Message {
    /// Used for notifications in the presence of `blocks`.
    pub text: String,
    pub blocks: Option<Vec<Block>>,
}

impl Message {
    pub fn plain<T: ToString>(text: T) -> Self {
        Message {
            text: text.to_string(),
            blocks: None,
        }
    }

    pub fn with_blocks<T: ToString>(text: T, blocks: Vec<Block>) -> Self {
        Message {
            text: text.to_string(),
            blocks: Some(blocks),
        }
    }
}

/// <https://api.slack.com/methods/chat.postMessage#args>
#[skip_serializing_none]
#[derive(Serialize)]
struct PostRequest<'a> {
    channel: &'a ChannelId,
    text: &'a str,
    blocks: Option<&'a Vec<Block>>,
}

/// <https://api.slack.com/methods/chat.update#args>
#[skip_serializing_none]
#[derive(Serialize)]
struct UpdateRequest<'a> {
    channel: &'a ChannelId,
    ts: &'a MessageTs,
    text: &'a str,
    blocks: Option<&'a Vec<Block>>,
    as_user: bool,
}

impl SlackClient {
    /// Post a message in a conversation we're already a member of, such as a
    /// direct message opened via [SlackClient::open_dm].
    pub async fn post_message(
        &self,
        channel: &ChannelId,
        msg: &Message,
        token: &SlackAccessToken,
    ) -> Result<(), SlackError> {
        let req = PostRequest {
            channel,
            text: &msg.text,
            blocks: msg.blocks.as_ref(),
        };

        self.call::<_, OkResponse>("/chat.postMessage", &req, token)
            .await
            .map(|_| ())
    }

    /// Replace the contents of a message we previously posted.
    pub async fn update_message(
        &self,
        channel: &ChannelId,
        ts: &MessageTs,
        msg: &Message,
        token: &SlackAccessToken,
    ) -> Result<(), SlackError> {
        let req = UpdateRequest {
            channel,
            ts,
            text: &msg.text,
            blocks: msg.blocks.as_ref(),
            as_user: true,
        };

        self.call::<_, OkResponse>("/chat.update", &req, token)
            .await
            .map(|_| ())
    }
}
