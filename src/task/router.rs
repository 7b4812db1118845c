//! Task subrouter definition.
//!
//! The following subroute is supported:
//!
//! - POST: `/interactions`

use super::{interaction::*, workflow::*};
use crate::{router::Deps, slack::error::handle_slack_err};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::post,
    Router,
};
use axum_extra::{headers, TypedHeader};
use tracing::{debug, info, warn};

/// Instantiate a new task subrouter.
pub fn task_router() -> Router<Deps> {
    Router::new().route("/interactions", post(interaction_handler))
}

/// Handler for the POST subroute `/interactions`.
///
/// This is the "Request URL" configured under the Slack app's "Interactivity
/// & Shortcuts" settings. Accepts an `application/x-www-form-urlencoded` body
/// with a `payload` field holding an [Interaction] as JSON.
///
/// Slack expects an empty `200` within three seconds, which for view
/// submissions also closes the modal.
async fn interaction_handler(
    State(deps): State<Deps>,
    content_type: Option<TypedHeader<headers::ContentType>>,
    body_bytes: Bytes,
) -> Result<(), (StatusCode, String)> {
    if !content_type.is_some_and(|TypedHeader(x)| is_form(&x)) {
        return Err((
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            String::from(
                "Interaction requests must have `Content-Type: application/x-www-form-urlencoded`",
            ),
        ));
    }

    let form = serde_urlencoded::from_bytes::<InteractionForm>(&body_bytes).map_err(|e| {
        let msg = format!("Failed to deserialize form body: {}", e);
        warn!(msg);

        (StatusCode::UNPROCESSABLE_ENTITY, msg)
    })?;

    if let Ok(x) = serde_json::from_str::<InteractionKind>(&form.payload) {
        info!("Interaction type {} received", x.kind);
    }
    debug!("Payload: {}", form.payload);

    let interaction = serde_json::from_str::<Interaction>(&form.payload).map_err(|e| {
        let msg = format!("Failed to deserialize interaction payload: {}", e);
        warn!(msg);

        (StatusCode::UNPROCESSABLE_ENTITY, msg)
    })?;

    match dispatch(&deps, &interaction).await {
        DispatchResult::Failure(DispatchFailure::ToSlack(e)) => Err(handle_slack_err(&e)),
        DispatchResult::Failure(DispatchFailure::MissingTask(e)) => {
            let msg = e.to_string();
            warn!(msg);

            Err((StatusCode::BAD_REQUEST, msg))
        }
        DispatchResult::IgnoredInteraction => {
            info!("Ignoring unsupported interaction");

            Ok(())
        }
        DispatchResult::Success => Ok(()),
    }
}

/// Compare against the media type alone, as Slack may or may not include a
/// charset parameter.
fn is_form(content_type: &headers::ContentType) -> bool {
    content_type
        .to_string()
        .split(';')
        .next()
        .map(|x| x.trim().eq_ignore_ascii_case("application/x-www-form-urlencoded"))
        .unwrap_or(false)
}
