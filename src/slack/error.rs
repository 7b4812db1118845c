use axum::http::StatusCode;
use std::fmt;
use tracing::error;

/// Sum type representing every possible unexceptional fail state.
#[derive(Debug)]
pub enum SlackError {
    APIRequestFailed(reqwest::Error),
    APIResponseError(String),
}

impl From<reqwest::Error> for SlackError {
    fn from(e: reqwest::Error) -> Self {
        SlackError::APIRequestFailed(e)
    }
}

impl fmt::Display for SlackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = match self {
            SlackError::APIRequestFailed(e) => format!("Slack API request failed: {:?}", e),
            SlackError::APIResponseError(e) => format!("Slack API returned error: {}", e),
        };

        write!(f, "{}", x)
    }
}

/// Map a [SlackError] onto the response we'll give to whoever triggered the
/// failing call, logging it on the way.
pub fn handle_slack_err(e: &SlackError) -> (StatusCode, String) {
    let code = match &e {
        e if is_unauthenticated(e) => StatusCode::UNAUTHORIZED,
        SlackError::APIRequestFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        SlackError::APIResponseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let es = e.to_string();

    error!(es);
    (code, es)
}

/// Parse Slack's API response error to determine if the issue is that the
/// access token failed to provide authentication.
fn is_unauthenticated(res: &SlackError) -> bool {
    match res {
        SlackError::APIResponseError(e) => e == "invalid_auth" || e == "not_authed",
        _ => false,
    }
}
