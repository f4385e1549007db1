//! A typed client for the Slack connections resource of PagerDuty's REST
//! API.
//!
//! ```no_run
//! use pagerduty_slack::{client::{auth::Credentials, Client, API_BASE}, slack::id::WorkspaceId};
//!
//! # async fn run() -> Result<(), pagerduty_slack::client::error::Error> {
//! let client = Client::new(API_BASE, Credentials::APIToken("u+token".into()))?;
//! let conns = client
//!     .list_all_slack_connections(&WorkspaceId("T01ABC2DE".into()))
//!     .await?;
//! # Ok(())
//! # }
//! ```

#[cfg(test)]
#[macro_use]
extern crate quickcheck;

pub mod client;
pub mod config;
mod de;
pub mod slack;
