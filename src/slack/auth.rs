//! Helpers around Slack's use of OAuth Bearer Authentication.

/// A newtype wrapper around Slack bot access tokens, as found in
/// `$SLACK_BOT_TOKEN`.
#[derive(Clone)]
pub struct SlackAccessToken(pub String);

/// Convert a Slack access token to a `Bearer` `Authorization` header value.
pub fn to_auth_header_val(t: &SlackAccessToken) -> String {
    format!("Bearer {}", t.0)
}
