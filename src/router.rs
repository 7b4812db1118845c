//! Server router definition.
//!
//! The following routes are supported:
//!
//! - GET: `/`
//! - POST: `/interactions`

use crate::{
    slack::{api::SlackClient, auth::SlackAccessToken},
    task::router::task_router,
};
use axum::{routing::get, Router};
use tower_http::trace::{self, TraceLayer};
use tracing::Level;

/// Dependencies shared by routes across requests.
#[derive(Clone)]
pub struct Deps {
    pub slack_client: SlackClient,
    pub slack_token: SlackAccessToken,
}

/// Instantiate a new router with tracing.
pub fn new(deps: Deps) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
        .on_response(trace::DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .merge(task_router())
        .layer(trace_layer)
        // Exclude the liveness check from tracing.
        .route("/", get(|| async { "Hello, tofu!" }))
        .with_state(deps)
}


#[cfg(test)]
mod tests_interactions {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use mockito::Matcher;
    use serde_json::json;
    use tower::ServiceExt;

    fn router(base_slack_url: String) -> Router {
        super::new(Deps {
            slack_client: SlackClient::new(base_slack_url),
            slack_token: SlackAccessToken("xoxb-foo".to_owned()),
        })
    }

    fn router_() -> Router {
        router("any".to_owned())
    }

    async fn server() -> mockito::ServerGuard {
        mockito::Server::new_async().await
    }

    async fn plaintext_body(body: Body) -> String {
        let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    /// Wrap an interaction the way Slack does.
    fn form_request(payload: serde_json::Value) -> Request<Body> {
        let fields = &[("payload".to_owned(), payload.to_string())];
        let msg = serde_urlencoded::to_string(fields).unwrap();

        Request::builder()
            .method("POST")
            .uri("/interactions")
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(Body::from(msg))
            .unwrap()
    }

    fn view_submission(requester: &str, assignee: &str, description: &str) -> serde_json::Value {
        json!({
            "type": "view_submission",
            "user": { "id": requester },
            "view": {
                "state": {
                    "values": {
                        "request_task_from": {
                            "conversation_id": {
                                "type": "conversations_select",
                                "selected_conversation": assignee
                            }
                        },
                        "task_description": {
                            "description": {
                                "type": "plain_text_input",
                                "value": description
                            }
                        }
                    }
                }
            }
        })
    }

    fn block_actions(actor: &str, value: Option<&str>) -> serde_json::Value {
        json!({
            "type": "block_actions",
            "user": { "id": actor },
            "message": { "ts": "1700000000.000100" },
            "actions": [{ "type": "button", "action_id": "complete_task", "value": value }]
        })
    }

    async fn mock_open_dm(
        srv: &mut mockito::ServerGuard,
        user: &str,
        channel: &str,
    ) -> mockito::Mock {
        srv.mock("POST", "/conversations.open")
            .match_header("authorization", "Bearer xoxb-foo")
            .match_body(Matcher::PartialJson(json!({ "users": user })))
            .with_body(json!({ "ok": true, "channel": { "id": channel } }).to_string())
            .create_async()
            .await
    }

    async fn mock_post_message(
        srv: &mut mockito::ServerGuard,
        body: serde_json::Value,
    ) -> mockito::Mock {
        srv.mock("POST", "/chat.postMessage")
            .match_body(Matcher::PartialJson(body))
            .with_body(r#"{"ok": true}"#)
            .create_async()
            .await
    }

    #[tokio::test]
    async fn test_bad_method() {
        let req = Request::builder()
            .method("GET")
            .uri("/interactions")
            .body(Body::empty())
            .unwrap();

        let res = router_().oneshot(req).await.unwrap();

        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_bad_content_type() {
        let req = Request::builder()
            .method("POST")
            .uri("/interactions")
            .header("Content-Type", "application/json")
            .body(Body::from("{}"))
            .unwrap();

        let res = router_().oneshot(req).await.unwrap();

        assert_eq!(res.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(
            plaintext_body(res.into_body()).await,
            "Interaction requests must have `Content-Type: application/x-www-form-urlencoded`"
        );
    }

    #[tokio::test]
    async fn test_missing_content_type() {
        let req = Request::builder()
            .method("POST")
            .uri("/interactions")
            .body(Body::from("payload=%7B%7D"))
            .unwrap();

        let res = router_().oneshot(req).await.unwrap();

        assert_eq!(res.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(
            plaintext_body(res.into_body()).await,
            "Interaction requests must have `Content-Type: application/x-www-form-urlencoded`"
        );
    }

    #[tokio::test]
    async fn test_missing_payload() {
        let req = Request::builder()
            .method("POST")
            .uri("/interactions")
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(Body::from("something=else"))
            .unwrap();

        let res = router_().oneshot(req).await.unwrap();

        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            plaintext_body(res.into_body()).await,
            "Failed to deserialize form body: missing field `payload`"
        );
    }

    #[tokio::test]
    async fn test_bad_payload() {
        let res = router_()
            .oneshot(form_request(json!({ "type": "shortcut" })))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(plaintext_body(res.into_body())
            .await
            .starts_with("Failed to deserialize interaction payload: "));
    }

    #[tokio::test]
    async fn test_unsupported_interaction() {
        // No Slack calls are expected, so the base URL is never used.
        let res = router_()
            .oneshot(form_request(json!({
                "type": "message_action",
                "user": { "id": "U1" }
            })))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        assert!(plaintext_body(res.into_body()).await.is_empty());
    }

    #[tokio::test]
    async fn test_shortcut() {
        let mut srv = server().await;

        let view_mock = srv
            .mock("POST", "/views.open")
            .match_header("authorization", "Bearer xoxb-foo")
            .match_body(Matcher::PartialJson(json!({
                "trigger_id": "trigger-1",
                "view": {
                    "type": "modal",
                    "title": { "type": "plain_text", "text": "Request a task" }
                }
            })))
            .with_body(r#"{"ok": true, "view": {"id": "V1"}}"#)
            .create_async()
            .await;

        let res = router(srv.url())
            .oneshot(form_request(json!({
                "type": "shortcut",
                "user": { "id": "U1" },
                "callback_id": "request_task",
                "trigger_id": "trigger-1"
            })))
            .await
            .unwrap();

        view_mock.assert_async().await;

        assert_eq!(res.status(), StatusCode::OK);
        assert!(plaintext_body(res.into_body()).await.is_empty());
    }

    #[tokio::test]
    async fn test_shortcut_bad_auth() {
        let mut srv = server().await;

        let view_mock = srv
            .mock("POST", "/views.open")
            .with_body(r#"{"ok": false, "error": "invalid_auth"}"#)
            .create_async()
            .await;

        let res = router(srv.url())
            .oneshot(form_request(json!({
                "type": "shortcut",
                "user": { "id": "U1" },
                "trigger_id": "trigger-1"
            })))
            .await
            .unwrap();

        view_mock.assert_async().await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            plaintext_body(res.into_body()).await,
            "Slack API returned error: invalid_auth"
        );
    }

    #[tokio::test]
    async fn test_view_submission() {
        let mut srv = server().await;

        let assignee_dm_mock = mock_open_dm(&mut srv, "U2", "D2").await;
        let requester_dm_mock = mock_open_dm(&mut srv, "U1", "D1").await;

        let task_mock = mock_post_message(
            &mut srv,
            json!({
                "channel": "D2",
                "text": "<@U1> has requested a task: water the plants"
            }),
        )
        .await;

        let receipt_mock = mock_post_message(
            &mut srv,
            json!({
                "channel": "D1",
                "text": ":speech_balloon: You have requested <@U2> to do the following task: water the plants"
            }),
        )
        .await;

        let res = router(srv.url())
            .oneshot(form_request(view_submission("U1", "U2", "water the plants")))
            .await
            .unwrap();

        assignee_dm_mock.assert_async().await;
        requester_dm_mock.assert_async().await;
        task_mock.assert_async().await;
        receipt_mock.assert_async().await;

        assert_eq!(res.status(), StatusCode::OK);
        assert!(plaintext_body(res.into_body()).await.is_empty());
    }

    #[tokio::test]
    async fn test_view_submission_to_self() {
        let mut srv = server().await;

        let dm_mock = mock_open_dm(&mut srv, "U1", "D1").await;

        let task_mock = mock_post_message(
            &mut srv,
            json!({
                "channel": "D1",
                "text": "You have assigned yourself a task: stretch"
            }),
        )
        .await;

        let res = router(srv.url())
            .oneshot(form_request(view_submission("U1", "U1", "stretch")))
            .await
            .unwrap();

        // Exactly one of each: no receipt is sent.
        dm_mock.assert_async().await;
        task_mock.assert_async().await;

        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_view_submission_slack_failure() {
        let mut srv = server().await;

        let dm_mock = srv
            .mock("POST", "/conversations.open")
            .with_body(r#"{"ok": false, "error": "user_not_found"}"#)
            .create_async()
            .await;

        let post_mock = srv
            .mock("POST", "/chat.postMessage")
            .expect(0)
            .create_async()
            .await;

        let res = router(srv.url())
            .oneshot(form_request(view_submission("U1", "U2", "anything")))
            .await
            .unwrap();

        dm_mock.assert_async().await;
        post_mock.assert_async().await;

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            plaintext_body(res.into_body()).await,
            "Slack API returned error: user_not_found"
        );
    }

    #[tokio::test]
    async fn test_block_actions() {
        let mut srv = server().await;

        let assignee_dm_mock = mock_open_dm(&mut srv, "U2", "D2").await;
        let requester_dm_mock = mock_open_dm(&mut srv, "U1", "D1").await;

        let update_mock = srv
            .mock("POST", "/chat.update")
            .match_body(Matcher::PartialJson(json!({
                "channel": "D2",
                "ts": "1700000000.000100",
                "as_user": true,
                "text": "Task complete: call mum: today"
            })))
            .with_body(r#"{"ok": true, "channel": "D2", "ts": "1700000000.000100"}"#)
            .create_async()
            .await;

        let receipt_mock = mock_post_message(
            &mut srv,
            json!({
                "channel": "D1",
                "text": ":white_check_mark: <@U2> has completed the following task: call mum: today"
            }),
        )
        .await;

        let res = router(srv.url())
            .oneshot(form_request(block_actions("U2", Some("U1:call mum: today"))))
            .await
            .unwrap();

        assignee_dm_mock.assert_async().await;
        requester_dm_mock.assert_async().await;
        update_mock.assert_async().await;
        receipt_mock.assert_async().await;

        assert_eq!(res.status(), StatusCode::OK);
        assert!(plaintext_body(res.into_body()).await.is_empty());
    }

    #[tokio::test]
    async fn test_block_actions_own_task() {
        let mut srv = server().await;

        let dm_mock = mock_open_dm(&mut srv, "U1", "D1").await;

        let update_mock = srv
            .mock("POST", "/chat.update")
            .match_body(Matcher::PartialJson(json!({ "channel": "D1" })))
            .with_body(r#"{"ok": true}"#)
            .create_async()
            .await;

        let post_mock = srv
            .mock("POST", "/chat.postMessage")
            .expect(0)
            .create_async()
            .await;

        let res = router(srv.url())
            .oneshot(form_request(block_actions("U1", Some("U1:stretch"))))
            .await
            .unwrap();

        dm_mock.assert_async().await;
        update_mock.assert_async().await;
        post_mock.assert_async().await;

        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_block_actions_update_failure() {
        let mut srv = server().await;

        let dm_mock = mock_open_dm(&mut srv, "U2", "D2").await;

        let update_mock = srv
            .mock("POST", "/chat.update")
            .with_body(r#"{"ok": false, "error": "message_not_found"}"#)
            .create_async()
            .await;

        let post_mock = srv
            .mock("POST", "/chat.postMessage")
            .expect(0)
            .create_async()
            .await;

        let res = router(srv.url())
            .oneshot(form_request(block_actions("U2", Some("U1:water the plants"))))
            .await
            .unwrap();

        dm_mock.assert_async().await;
        update_mock.assert_async().await;
        post_mock.assert_async().await;

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            plaintext_body(res.into_body()).await,
            "Slack API returned error: message_not_found"
        );
    }

    #[tokio::test]
    async fn test_block_actions_without_task() {
        let res = router_()
            .oneshot(form_request(block_actions("U2", None)))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            plaintext_body(res.into_body()).await,
            "Interaction carries no task: the action has no value"
        );
    }
}
