//! Type definitions and helpers for the Slack Web API.

use super::{auth::*, error::SlackError};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// The base URL of the Slack API.
pub const API_BASE: &str = "https://slack.com/api";

/// A reusable client that holds a connection pool internally, as per
/// [reqwest::Client]. Cloning is cheap and shares the pool.
#[derive(Clone)]
pub struct SlackClient {
    base: String,
    http: reqwest::Client,
}

impl SlackClient {
    /// The base URL is everything before the method name, without a trailing
    /// slash, for example [API_BASE].
    pub fn new(base: String) -> Self {
        SlackClient {
            base: base.trim_end_matches('/').to_owned(),
            http: reqwest::Client::new(),
        }
    }

    /// Create a POST request to any Slack API endpoint, handling authentication.
    pub fn post<T: ToString>(&self, path: T, token: &SlackAccessToken) -> reqwest::RequestBuilder {
        self.http
            .post(self.base.to_owned() + &path.to_string())
            .header(reqwest::header::AUTHORIZATION, to_auth_header_val(token))
    }

    /// POST a JSON body to a Slack API method and decode the response,
    /// lifting Slack's own error codes into [SlackError::APIResponseError].
    pub async fn call<B, R>(
        &self,
        path: &str,
        body: &B,
        token: &SlackAccessToken,
    ) -> Result<R, SlackError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let res: APIResult<R> = self
            .post(path, token)
            .json(body)
            .send()
            .await?
            .json()
            .await?;

        match res {
            APIResult::Ok(x) => Ok(x),
            APIResult::Err(res) => Err(SlackError::APIResponseError(res.error)),
        }
    }
}

/// Slack's API returns a common "untagged" response, representing whether a
/// request was successful.
///
/// ```json
/// {
///     "ok": true,
///     "channel": { "id": "D0123" }
/// }
/// ```
///
/// ```json
/// {
///     "ok": false,
///     "error": "invalid_auth"
/// }
/// ```
#[derive(Deserialize)]
#[serde(untagged)]
pub enum APIResult<T> {
    Ok(T),
    Err(ErrorResponse),
}

/// The universal response in case of an unsuccessful request.
// The `ok` field is checked here, and should be checked on responses too,
// primarily to ensure appropriate deserialization behaviour in case of an
// otherwise empty successful response.
//
// Ideally we'd be able to use `ok` as a tag, rather than defining `APIResult`
// as untagged. See:
//   <https://github.com/serde-rs/serde/issues/745#issuecomment-294314786>
#[derive(Deserialize)]
pub struct ErrorResponse {
    #[allow(dead_code)]
    #[serde(deserialize_with = "crate::de::only_false")]
    ok: bool,
    pub error: String,
}

/// A successful response whose body we otherwise don't care about.
#[derive(Deserialize)]
pub struct OkResponse {
    #[allow(dead_code)]
    #[serde(deserialize_with = "crate::de::only_true")]
    ok: bool,
}
