//! A thin client over the parts of the Slack Web API we need: direct
//! messages, posting and updating block-based messages, and opening modals.

pub mod api;
pub mod auth;
pub mod block;
pub mod conversation;
pub mod error;
pub mod message;
pub mod view;

pub use auth::SlackAccessToken;
pub use error::SlackError;
