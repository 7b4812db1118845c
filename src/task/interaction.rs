//! The interaction payloads Slack sends us, limited to the fields the task
//! workflow reads.
//!
//! <https://api.slack.com/reference/interaction-payloads>

use super::payload::{DecodeError, Task};
use crate::slack::{conversation::UserId, message::MessageTs, view::TriggerId};
use serde::Deserialize;
use std::fmt;

/// Slack posts interactions as a form with a lone field holding JSON.
#[derive(Deserialize)]
pub struct InteractionForm {
    pub payload: String,
}

/// Just enough of any payload to say what it is, including types we don't
/// otherwise support.
#[derive(Deserialize)]
pub struct InteractionKind {
    #[serde(rename = "type")]
    pub kind: String,
}

/// Supported interactions.
#[derive(Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Interaction {
    /// A global shortcut, which we answer by opening the request modal.
    Shortcut(Shortcut),
    /// The request modal has been submitted.
    ViewSubmission(ViewSubmission),
    /// A button in one of our messages has been clicked.
    BlockActions(BlockActions),
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct User {
    pub id: UserId,
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct Shortcut {
    pub user: User,
    pub trigger_id: TriggerId,
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct ViewSubmission {
    pub user: User,
    view: SubmittedView,
}

#[derive(Debug, PartialEq, Deserialize)]
struct SubmittedView {
    state: ViewState,
}

#[derive(Debug, PartialEq, Deserialize)]
struct ViewState {
    values: SubmissionValues,
}

/// Input values keyed by block ID then action ID, as set in
/// [super::payload::request_modal].
#[derive(Debug, PartialEq, Deserialize)]
pub struct SubmissionValues {
    #[serde(rename = "request_task_from")]
    assignee: AssigneeBlock,
    #[serde(rename = "task_description")]
    description: DescriptionBlock,
}

#[derive(Debug, PartialEq, Deserialize)]
struct AssigneeBlock {
    #[serde(rename = "conversation_id")]
    input: ConversationSelection,
}

#[derive(Debug, PartialEq, Deserialize)]
struct ConversationSelection {
    selected_conversation: UserId,
}

#[derive(Debug, PartialEq, Deserialize)]
struct DescriptionBlock {
    #[serde(rename = "description")]
    input: PlainTextValue,
}

#[derive(Debug, PartialEq, Deserialize)]
struct PlainTextValue {
    value: String,
}

impl ViewSubmission {
    /// The task as requested by whoever submitted the modal.
    pub fn task(&self) -> Task {
        let values = &self.view.state.values;

        Task {
            requester: self.user.id.clone(),
            assignee: values.assignee.input.selected_conversation.clone(),
            description: values.description.input.value.clone(),
        }
    }
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct BlockActions {
    pub user: User,
    actions: Vec<Action>,
    pub message: MessageRef,
}

#[derive(Debug, PartialEq, Deserialize)]
struct Action {
    value: Option<String>,
}

/// The message containing the element that was interacted with.
#[derive(Debug, PartialEq, Deserialize)]
pub struct MessageRef {
    pub ts: MessageTs,
}

/// Why a block action doesn't refer to a task.
#[derive(Debug, PartialEq)]
pub enum MissingTask {
    NoAction,
    NoValue,
    Undecodable(DecodeError),
}

impl fmt::Display for MissingTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = match self {
            MissingTask::NoAction => "no action was supplied",
            MissingTask::NoValue => "the action has no value",
            MissingTask::Undecodable(DecodeError::MissingSeparator) => {
                "the action value has no requester"
            }
            MissingTask::Undecodable(DecodeError::EmptyRequester) => {
                "the action value has an empty requester"
            }
        };

        write!(f, "Interaction carries no task: {}", x)
    }
}

impl BlockActions {
    /// The task whose completion button was clicked. The clicker is the
    /// assignee.
    pub fn task(&self) -> Result<Task, MissingTask> {
        let value = self
            .actions
            .first()
            .ok_or(MissingTask::NoAction)?
            .value
            .as_ref()
            .ok_or(MissingTask::NoValue)?;

        Task::from_button_value(value, self.user.id.clone()).map_err(MissingTask::Undecodable)
    }
}
