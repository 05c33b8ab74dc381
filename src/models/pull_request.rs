//! Pull request model, lifecycle status, and PR request/response types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Pull request lifecycle status. MERGED is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum PrStatus {
    #[serde(rename = "OPEN")]
    Open,
    #[serde(rename = "MERGED")]
    Merged,
}

impl PrStatus {
    /// Database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PrStatus::Open => "OPEN",
            PrStatus::Merged => "MERGED",
        }
    }

    /// Parse the database string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "OPEN" => Some(PrStatus::Open),
            "MERGED" => Some(PrStatus::Merged),
            _ => None,
        }
    }
}

impl std::fmt::Display for PrStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pull request with its assigned reviewer set.
///
/// `assigned_reviewers` is an ordered list of user ids with no duplicates and
/// never contains the author. `merged_at` is stamped exactly once, on the
/// first merge. `version` is the optimistic-lock counter used by the storage
/// layer; it is not part of the API payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PullRequest {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: PrStatus,
    pub assigned_reviewers: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub merged_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub version: i64,
}

/// Short pull request representation for reviewer listings.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PullRequestShort {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: PrStatus,
}

impl From<&PullRequest> for PullRequestShort {
    fn from(pr: &PullRequest) -> Self {
        Self {
            pull_request_id: pr.pull_request_id.clone(),
            pull_request_name: pr.pull_request_name.clone(),
            author_id: pr.author_id.clone(),
            status: pr.status,
        }
    }
}

/// Request body for POST /pullRequest/create.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePullRequestRequest {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
}

/// Request body for POST /pullRequest/merge.
#[derive(Debug, Deserialize, ToSchema)]
pub struct MergePullRequestRequest {
    pub pull_request_id: String,
}

/// Request body for POST /pullRequest/reassign.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReassignReviewerRequest {
    pub pull_request_id: String,
    pub old_user_id: String,
}

/// Response wrapper for a single pull request.
#[derive(Debug, Serialize, ToSchema)]
pub struct PullRequestResponse {
    pub pr: PullRequest,
}

/// Response for a reviewer reassignment: the updated PR plus the id of the
/// reviewer that replaced the removed one.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReassignReviewerResponse {
    pub pr: PullRequest,
    pub replaced_by: String,
}

/// Response for GET /users/getReview.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReviewListResponse {
    pub user_id: String,
    pub pull_requests: Vec<PullRequestShort>,
}
