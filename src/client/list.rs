//! Offset-based pagination, common to PagerDuty's list endpoints.
//!
//! <https://developer.pagerduty.com/docs/pagination>

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

/// The metadata attached to every list response, enabling pagination.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListObject {
    pub limit: u32,
    pub offset: u32,
    /// Whether there are further results beyond this page.
    pub more: bool,
    /// Only populated when the request asked for a total, otherwise `null`.
    #[serde_as(as = "DefaultOnNull")]
    pub total: u32,
}
