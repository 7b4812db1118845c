//! Everything we render for the task workflow: the request modal, the
//! interactive message the assignee receives, its completed form, and the
//! plain receipts sent back to the requester.

use crate::slack::{
    block::{escape, Block, ButtonStyle, Element, Text},
    conversation::UserId,
    message::Message,
    view::Modal,
};

/// Block and action IDs of the request modal's inputs. Submissions are keyed
/// by these; see [super::interaction::SubmissionValues].
pub const ASSIGNEE_BLOCK_ID: &str = "request_task_from";
pub const ASSIGNEE_ACTION_ID: &str = "conversation_id";
pub const DESCRIPTION_BLOCK_ID: &str = "task_description";
pub const DESCRIPTION_ACTION_ID: &str = "description";

/// Slack caps button values at 2000 characters, and the value holds the
/// requester's ID as well as the description.
pub const MAX_DESCRIPTION_LEN: u16 = 1900;

/// Action ID of the button marking a task as done.
pub const COMPLETE_ACTION_ID: &str = "complete_task";

/// A single task, requested by one user of another (or of themselves).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub requester: UserId,
    pub assignee: UserId,
    pub description: String,
}

/// Why a button value couldn't be decoded back into a [Task].
#[derive(Debug, PartialEq, Eq)]
pub enum DecodeError {
    MissingSeparator,
    EmptyRequester,
}

impl Task {
    fn is_self_assigned(&self) -> bool {
        self.requester == self.assignee
    }

    /// The line describing the task, as seen by the assignee.
    fn summary(&self) -> String {
        let desc = escape(&self.description);

        if self.is_self_assigned() {
            format!("*You have assigned yourself the following task:* {}", desc)
        } else {
            format!(
                "*<@{}> has requested the following task:* {}",
                self.requester, desc
            )
        }
    }

    /// The interactive message delivered to the assignee.
    pub fn requested_message(&self) -> Message {
        let footer = if self.is_self_assigned() {
            "Click the button once the task has been completed to mark as done"
        } else {
            "Click the button once the task has been completed, and we'll notify them that it's been done!"
        };

        let text = if self.is_self_assigned() {
            format!("You have assigned yourself a task: {}", escape(&self.description))
        } else {
            format!(
                "<@{}> has requested a task: {}",
                self.requester,
                escape(&self.description)
            )
        };

        let blocks = vec![
            Block::Context {
                block_id: Some(DESCRIPTION_BLOCK_ID.to_owned()),
                elements: vec![Text::Mrkdwn(self.summary())],
            },
            Block::Actions {
                elements: vec![Element::Button {
                    action_id: COMPLETE_ACTION_ID.to_owned(),
                    text: Text::Plaintext("Completed".to_owned()),
                    style: Some(ButtonStyle::Primary),
                    value: self.to_button_value(),
                }],
            },
            Block::Context {
                block_id: None,
                elements: vec![Text::Plaintext(footer.to_owned())],
            },
        ];

        Message::with_blocks(text, blocks)
    }

    /// What the requested message becomes once the assignee hits the button.
    pub fn completed_message(&self) -> Message {
        let blocks = vec![
            Block::Context {
                block_id: None,
                elements: vec![Text::Mrkdwn(format!("~{}~", self.summary()))],
            },
            Block::Section {
                text: Text::Mrkdwn(":white_check_mark: Task complete!".to_owned()),
            },
        ];

        Message::with_blocks(
            format!("Task complete: {}", escape(&self.description)),
            blocks,
        )
    }

    /// Confirmation for the requester that the assignee has been asked.
    pub fn request_receipt(&self) -> Message {
        Message::plain(format!(
            ":speech_balloon: You have requested <@{}> to do the following task: {}",
            self.assignee,
            escape(&self.description)
        ))
    }

    /// Notification for the requester that the assignee is done.
    pub fn completion_receipt(&self) -> Message {
        Message::plain(format!(
            ":white_check_mark: <@{}> has completed the following task: {}",
            self.assignee,
            escape(&self.description)
        ))
    }

    /// The button carries everything we need to act on a click, so that we
    /// needn't store tasks ourselves. The assignee is whoever clicks.
    pub fn to_button_value(&self) -> String {
        format!("{}:{}", self.requester, self.description)
    }

    /// Reverse [Task::to_button_value]. User IDs never contain a colon, so the
    /// first one always separates the requester from the description.
    pub fn from_button_value(value: &str, assignee: UserId) -> Result<Task, DecodeError> {
        let (requester, description) = value
            .split_once(':')
            .ok_or(DecodeError::MissingSeparator)?;

        if requester.is_empty() {
            return Err(DecodeError::EmptyRequester);
        }

        Ok(Task {
            requester: UserId(requester.to_owned()),
            assignee,
            description: description.to_owned(),
        })
    }
}

/// The modal a user fills in to request a task.
pub fn request_modal() -> Modal {
    Modal::new(
        "Request a task",
        "Request",
        "Cancel",
        vec![
            Block::Divider,
            Block::Input {
                block_id: ASSIGNEE_BLOCK_ID.to_owned(),
                label: Text::Plaintext("Request task from:".to_owned()),
                element: Element::ConversationsSelect {
                    action_id: ASSIGNEE_ACTION_ID.to_owned(),
                },
                optional: false,
            },
            Block::Input {
                block_id: DESCRIPTION_BLOCK_ID.to_owned(),
                label: Text::Plaintext("Description of task:".to_owned()),
                element: Element::PlainTextInput {
                    action_id: DESCRIPTION_ACTION_ID.to_owned(),
                    max_length: Some(MAX_DESCRIPTION_LEN),
                },
                optional: false,
            },
        ],
    )
}
