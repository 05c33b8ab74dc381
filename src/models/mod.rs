//! Domain models and API request/response types.

pub mod pull_request;
pub mod stats;
pub mod team;
pub mod user;

pub use pull_request::{
    CreatePullRequestRequest, MergePullRequestRequest, PrStatus, PullRequest,
    PullRequestResponse, PullRequestShort, ReassignReviewerRequest, ReassignReviewerResponse,
    ReviewListResponse,
};
pub use stats::{Stats, StatsResponse};
pub use team::{Team, TeamMember, TeamResponse};
pub use user::{DeactivateTeamRequest, SetIsActiveRequest, User, UserResponse};
