//! Act upon a decoded [Interaction], calling out to Slack as needed.

use super::{
    interaction::{BlockActions, Interaction, MissingTask, Shortcut, ViewSubmission},
    payload::request_modal,
};
use crate::{router::Deps, slack::SlackError};
use tracing::info;

/// The result of attempting to act upon an interaction.
pub enum DispatchResult {
    IgnoredInteraction,
    Failure(DispatchFailure),
    Success,
}

/// What went wrong whilst acting upon an interaction.
pub enum DispatchFailure {
    ToSlack(SlackError),
    MissingTask(MissingTask),
}

impl From<SlackError> for DispatchFailure {
    fn from(e: SlackError) -> Self {
        DispatchFailure::ToSlack(e)
    }
}

/// Branch on the interaction type. Calls are made in sequence and the first
/// failure aborts those remaining.
pub async fn dispatch(deps: &Deps, interaction: &Interaction) -> DispatchResult {
    let res = match interaction {
        Interaction::Shortcut(x) => open_request_modal(deps, x).await,
        Interaction::ViewSubmission(x) => request_task(deps, x).await,
        Interaction::BlockActions(x) => complete_task(deps, x).await,
        Interaction::Unsupported => return DispatchResult::IgnoredInteraction,
    };

    match res {
        Ok(_) => DispatchResult::Success,
        Err(e) => DispatchResult::Failure(e),
    }
}

async fn open_request_modal(deps: &Deps, shortcut: &Shortcut) -> Result<(), DispatchFailure> {
    deps.slack_client
        .open_view(&shortcut.trigger_id, &request_modal(), &deps.slack_token)
        .await?;

    info!("Request modal opened for {}", shortcut.user.id);

    Ok(())
}

/// Deliver a freshly requested task to its assignee, letting the requester
/// know it's been sent if they're somebody else.
async fn request_task(deps: &Deps, submission: &ViewSubmission) -> Result<(), DispatchFailure> {
    let client = &deps.slack_client;
    let token = &deps.slack_token;
    let task = submission.task();

    let assignee_channel = client.open_dm(&task.assignee, token).await?;
    client
        .post_message(&assignee_channel, &task.requested_message(), token)
        .await?;

    if task.requester != task.assignee {
        let requester_channel = client.open_dm(&task.requester, token).await?;
        client
            .post_message(&requester_channel, &task.request_receipt(), token)
            .await?;
    }

    info!("Task requested of {} by {}", task.assignee, task.requester);

    Ok(())
}

/// Mark the clicked task as done in place, letting the requester know if
/// they're somebody else.
async fn complete_task(deps: &Deps, actions: &BlockActions) -> Result<(), DispatchFailure> {
    let client = &deps.slack_client;
    let token = &deps.slack_token;
    let task = actions.task().map_err(DispatchFailure::MissingTask)?;

    // The clicked message lives in the direct message between us and the
    // assignee, which is whoever clicked.
    let assignee_channel = client.open_dm(&task.assignee, token).await?;
    client
        .update_message(
            &assignee_channel,
            &actions.message.ts,
            &task.completed_message(),
            token,
        )
        .await?;

    if task.requester != task.assignee {
        let requester_channel = client.open_dm(&task.requester, token).await?;
        client
            .post_message(&requester_channel, &task.completion_receipt(), token)
            .await?;
    }

    info!("Task requested by {} completed by {}", task.requester, task.assignee);

    Ok(())
}
