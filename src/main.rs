//! A small Slack app for asking somebody to do something, and hearing back
//! once they have.
//!
//! See [task] for the workflow. The only inbound surface is Slack's
//! interactivity webhook; see [router].
//!
//! Configuration is via environment variables, optionally from a `.env` file:
//!
//! - `SLACK_BOT_TOKEN` (required): the app's bot token, `xoxb-...`.
//! - `PORT` (default `80`).
//! - `SLACK_API_BASE` (default `https://slack.com/api`).

use dotenvy::dotenv;
use router::Deps;
use slack::{
    api::{SlackClient, API_BASE},
    auth::SlackAccessToken,
};
use std::{env, net::SocketAddr};
use tokio::{net::TcpListener, sync::oneshot};
use tracing::{info, warn};

mod de;
mod router;
mod slack;
mod task;

/// Application entrypoint. Initialises tracing, checks for environment
/// variables, binds to 0.0.0.0, and starts the server.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .init();

    let has_dotenv = dotenv().is_ok();
    if !has_dotenv {
        warn!("No .env found");
    }

    let port: u16 = env::var("PORT")
        .map(|x| x.parse().expect("Could not parse PORT to u16"))
        .unwrap_or(80);

    let slack_token = env::var("SLACK_BOT_TOKEN")
        .map(SlackAccessToken)
        .expect("No $SLACK_BOT_TOKEN environment variable found");

    let slack_base = env::var("SLACK_API_BASE").unwrap_or_else(|_| API_BASE.into());

    let deps = Deps {
        slack_client: SlackClient::new(slack_base),
        slack_token,
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    server_(listener, deps).await;
}

/// Initialise a server without graceful shutdown.
async fn server_(listener: TcpListener, deps: Deps) {
    // Giving a receiver that will never resolve.
    server(listener, deps, oneshot::channel::<()>().1).await;
}

/// Initialise a server with graceful shutdown via `rx`.
async fn server(listener: TcpListener, deps: Deps, rx: oneshot::Receiver<()>) {
    if let Ok(addr) = listener.local_addr() {
        info!("Listening on {}", addr);
    }

    axum::serve(listener, router::new(deps))
        .with_graceful_shutdown(async {
            rx.await.ok();
        })
        .await
        .expect("Failed to start server");
}
