//! PagerDuty's Slack integration: connections between a PagerDuty source,
//! such as a service or team, and a channel in a linked Slack workspace.
//!
//! See [connection::SlackConnection].

pub mod connection;
pub mod id;
