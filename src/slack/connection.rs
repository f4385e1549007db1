//! Create, read, update, delete and list Slack connections.
//!
//! <https://developer.pagerduty.com/api-reference/YXBpOjExMjA4NjUx-slack-integration>

use super::id::{ConnectionId, WorkspaceId};
use crate::client::{error::Error, list::ListObject, Client};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};
use tracing::debug;
use url::Url;

/// Routes notifications about a PagerDuty source, such as a service or
/// team, to a Slack channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlackConnection {
    /// Assigned by PagerDuty on creation, and omitted from requests until
    /// then.
    #[serde(skip_serializing_if = "ConnectionId::is_empty")]
    pub id: ConnectionId,
    pub source_id: String,
    pub source_name: String,
    /// For example `service_reference` or `team_reference`.
    pub source_type: String,
    pub channel_id: String,
    pub channel_name: String,
    /// For example `responder` or `stakeholder`.
    pub notification_type: String,
    pub config: Option<SlackConnectionConfig>,
}

/// Which incidents get notified about.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackConnectionConfig {
    /// Event names such as `incident.triggered`.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub events: Vec<String>,
    /// `high` or `low`. Absent means any urgency.
    #[serde(default)]
    pub urgency: Option<String>,
    /// Priority IDs. Empty means any priority.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub priorities: Vec<String>,
}

/// The envelope used for a single connection in both directions.
#[derive(Serialize)]
struct SlackConnectionRequest<'a> {
    slack_connection: &'a SlackConnection,
}

#[derive(Deserialize)]
struct SlackConnectionResponse {
    #[serde(deserialize_with = "crate::de::only_object")]
    slack_connection: SlackConnection,
}

/// Query params for [Client::list_slack_connections]. Unset and zero fields
/// are left out of the query string entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListSlackConnectionsOptions {
    #[serde(skip_serializing_if = "is_unset")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "is_unset")]
    pub offset: Option<u32>,
}

fn is_unset(x: &Option<u32>) -> bool {
    matches!(x, None | Some(0))
}

/// A page of connections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSlackConnectionsResponse {
    #[serde(flatten)]
    pub list: ListObject,
    #[serde(default, deserialize_with = "crate::de::only_objects")]
    pub slack_connections: Vec<SlackConnection>,
}

impl Client {
    /// `/integration-slack/workspaces/{workspace}/connections[/{conn}]`
    fn slack_connections_url(
        &self,
        workspace: &WorkspaceId,
        conn: Option<&ConnectionId>,
    ) -> Result<Url, Error> {
        let mut segments = vec![
            "integration-slack",
            "workspaces",
            workspace.as_ref(),
            "connections",
        ];
        if let Some(c) = conn {
            segments.push(c.as_ref());
        }

        self.endpoint(segments)
    }

    /// Connect a PagerDuty source to a channel in `workspace`.
    ///
    /// A response without a `slack_connection` object is an [Error::Decode].
    pub async fn create_slack_connection(
        &self,
        workspace: &WorkspaceId,
        conn: &SlackConnection,
    ) -> Result<SlackConnection, Error> {
        let url = self.slack_connections_url(workspace, None)?;

        let res: SlackConnectionResponse = self
            .send_json(
                self.post(url)
                    .json(&SlackConnectionRequest {
                        slack_connection: conn,
                    }),
            )
            .await?;

        Ok(res.slack_connection)
    }

    /// Fetch a single connection.
    ///
    /// A 2xx response without a `slack_connection` object is an
    /// [Error::Decode] rather than an empty result. An empty, `.` or `..` ID
    /// is an [Error::InvalidId] and no request is sent.
    pub async fn get_slack_connection(
        &self,
        workspace: &WorkspaceId,
        conn_id: &ConnectionId,
    ) -> Result<SlackConnection, Error> {
        let url = self.slack_connections_url(workspace, Some(conn_id))?;

        let res: SlackConnectionResponse = self.send_json(self.get(url)).await?;

        Ok(res.slack_connection)
    }

    /// Replace an existing connection, identified by its own `id`. A
    /// connection without an `id` is an [Error::InvalidId].
    pub async fn update_slack_connection(
        &self,
        workspace: &WorkspaceId,
        conn: &SlackConnection,
    ) -> Result<SlackConnection, Error> {
        let url = self.slack_connections_url(workspace, Some(&conn.id))?;

        let res: SlackConnectionResponse = self
            .send_json(
                self.put(url)
                    .json(&SlackConnectionRequest {
                        slack_connection: conn,
                    }),
            )
            .await?;

        Ok(res.slack_connection)
    }

    /// Delete a connection. Any response body is ignored.
    pub async fn delete_slack_connection(
        &self,
        workspace: &WorkspaceId,
        conn_id: &ConnectionId,
    ) -> Result<(), Error> {
        let url = self.slack_connections_url(workspace, Some(conn_id))?;

        self.send(self.delete(url)).await.map(|_| ())
    }

    /// Fetch a single page of connections.
    pub async fn list_slack_connections(
        &self,
        workspace: &WorkspaceId,
        opts: &ListSlackConnectionsOptions,
    ) -> Result<ListSlackConnectionsResponse, Error> {
        let url = self.slack_connections_url(workspace, None)?;

        self.send_json(self.get(url).query(opts)).await
    }

    /// Fetch every connection in a workspace, one page at a time, until
    /// PagerDuty reports there are no more.
    pub async fn list_all_slack_connections(
        &self,
        workspace: &WorkspaceId,
    ) -> Result<Vec<SlackConnection>, Error> {
        let mut connections: Vec<SlackConnection> = Vec::new();
        let mut opts = ListSlackConnectionsOptions::default();

        loop {
            let mut res = self.list_slack_connections(workspace, &opts).await?;

            let received = res.slack_connections.len();
            connections.append(&mut res.slack_connections);

            // An empty page while `more` is set would otherwise loop forever.
            if !res.list.more || received == 0 {
                break Ok(connections);
            }

            let offset = opts
                .offset
                .unwrap_or(0)
                .saturating_add(u32::try_from(received).unwrap_or(u32::MAX));
            debug!("Fetching Slack connections from offset {}", offset);
            opts.offset = Some(offset);
        }
    }
}
