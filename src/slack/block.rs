use serde::ser::SerializeStruct;
use serde::{ser, Serialize};

/// Slack's block API is its most modern, and allows us to mix rich formatting
/// with foreign plaintext. This is our limited subset thereof.
///
/// <https://api.slack.com/reference/block-kit/blocks>
#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Divider,
    Section {
        text: Text,
    },
    Context {
        #[serde(skip_serializing_if = "Option::is_none")]
        block_id: Option<String>,
        elements: Vec<Text>,
    },
    Actions {
        elements: Vec<Element>,
    },
    /// Only valid within modals.
    Input {
        block_id: String,
        label: Text,
        element: Element,
        optional: bool,
    },
}

/// Composition object for text.
///
/// <https://api.slack.com/reference/block-kit/composition-objects#text>
pub enum Text {
    Plaintext(String),
    /// "mrkdwn" is Slack's alternative to Markdown.
    ///
    /// <https://api.slack.com/reference/surfaces/formatting#basics>
    Mrkdwn(String),
}

impl ser::Serialize for Text {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        match self {
            Text::Plaintext(x) => {
                let mut state = serializer.serialize_struct("Text", 3)?;
                state.serialize_field("type", "plain_text")?;
                state.serialize_field("text", x)?;
                // Render `:emoji:` shortcodes rather than leaving them literal.
                state.serialize_field("emoji", &true)?;
                state.end()
            }

            Text::Mrkdwn(x) => {
                let mut state = serializer.serialize_struct("Text", 2)?;
                state.serialize_field("type", "mrkdwn")?;
                state.serialize_field("text", x)?;
                state.end()
            }
        }
    }
}

/// Interactive elements, placed in actions and input blocks.
///
/// <https://api.slack.com/reference/block-kit/block-elements>
#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    Button {
        action_id: String,
        text: Text,
        #[serde(skip_serializing_if = "Option::is_none")]
        style: Option<ButtonStyle>,
        value: String,
    },
    ConversationsSelect {
        action_id: String,
    },
    PlainTextInput {
        action_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        max_length: Option<u16>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonStyle {
    Primary,
}

/// Escape the three characters Slack treats as control characters in message
/// text, so that user input can't smuggle in mentions or links.
///
/// <https://api.slack.com/reference/surfaces/formatting#escaping>
pub fn escape(x: &str) -> String {
    x.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
