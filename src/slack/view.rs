//! Open modal views in response to a user interaction.

use super::{api::*, block::*, SlackAccessToken, SlackError};
use serde::{Deserialize, Serialize};

/// A short-lived token handed to us with an interaction, required to open a
/// view in response. It expires after three seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerId(pub String);

/// A modal surface.
///
/// <https://api.slack.com/reference/surfaces/views#modal>
#[derive(Serialize)]
pub struct Modal {
    #[serde(rename = "type")]
    typ: &'static str,
    title: Text,
    submit: Text,
    close: Text,
    blocks: Vec<Block>,
}

impl Modal {
    pub fn new<T: ToString>(title: T, submit: T, close: T, blocks: Vec<Block>) -> Self {
        Modal {
            typ: "modal",
            title: Text::Plaintext(title.to_string()),
            submit: Text::Plaintext(submit.to_string()),
            close: Text::Plaintext(close.to_string()),
            blocks,
        }
    }
}

/// <https://api.slack.com/methods/views.open#args>
#[derive(Serialize)]
struct OpenRequest<'a> {
    trigger_id: &'a TriggerId,
    view: &'a Modal,
}

impl SlackClient {
    pub async fn open_view(
        &self,
        trigger_id: &TriggerId,
        view: &Modal,
        token: &SlackAccessToken,
    ) -> Result<(), SlackError> {
        self.call::<_, OkResponse>(
            "/views.open",
            &OpenRequest {
                trigger_id,
                view,
            },
            token,
        )
        .await
        .map(|_| ())
    }
}
