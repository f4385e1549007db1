//! Identifiers used in Slack integration paths.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The ID of a Slack workspace (team) linked to a PagerDuty account, as
/// found in Slack's UI, for example `T01ABC2DE`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkspaceId(pub String);

/// The ID PagerDuty assigns to a Slack connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(pub String);

impl ConnectionId {
    /// Connections which haven't been created yet have no ID.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Format without the surrounding newtype wrapper.
///
/// ```
/// use pagerduty_slack::slack::id::WorkspaceId;
///
/// let x = WorkspaceId("T01ABC2DE".into());
/// assert_eq!(format!("{}", x), "T01ABC2DE");
/// ```
impl fmt::Display for WorkspaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for WorkspaceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ConnectionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WorkspaceId {
    fn from(x: &str) -> Self {
        WorkspaceId(x.to_owned())
    }
}

impl From<&str> for ConnectionId {
    fn from(x: &str) -> Self {
        ConnectionId(x.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transparent_json() {
        assert_eq!(
            serde_json::to_string(&ConnectionId("A12BCDE".into())).unwrap(),
            r#""A12BCDE""#
        );
        assert_eq!(
            serde_json::from_str::<WorkspaceId>(r#""T1""#).unwrap(),
            WorkspaceId("T1".into())
        );
    }
}
