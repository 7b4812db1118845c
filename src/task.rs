//! A "request a task / complete a task" workflow between two Slack users,
//! driven entirely by interactions.
//!
//! 1. A user invokes the app's global shortcut and we open a modal asking who
//!    the task is for and what it is.
//! 2. On submission, the assignee receives a direct message describing the
//!    task with a "Completed" button, and the requester a receipt.
//! 3. When the assignee clicks the button, the message is struck through and
//!    the requester is told the task is done.
//!
//! Nothing is stored; everything needed to complete a task travels in the
//! button's value. See [payload::Task::to_button_value].

mod interaction;
mod payload;
pub mod router;
mod workflow;
