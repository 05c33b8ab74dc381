//! Review statistics model.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Aggregate statistics over all pull requests and users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Stats {
    /// Total pull request count
    pub total_prs: u64,
    /// Total user count
    pub total_users: u64,
    /// Count of OPEN pull requests
    pub open_prs: u64,
    /// Count of MERGED pull requests
    pub merged_prs: u64,
    /// Count of active users
    pub active_users: u64,
    /// Average reviewers per pull request (0.0 when there are no PRs)
    pub average_reviewers: f64,
}

/// Response wrapper for GET /stats.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatsResponse {
    pub stats: Stats,
}
