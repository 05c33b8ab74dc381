//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::{api, error, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "PR Review Server",
        version = "0.3.0",
        description = "API server for tracking teams, users, and pull requests with automatic reviewer assignment and reassignment"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::health,
        api::health::ready,
        // Team endpoints
        api::teams::add_team,
        api::teams::get_team,
        // User endpoints
        api::users::add_user,
        api::users::set_is_active,
        api::users::get_review,
        api::users::deactivate_team,
        // Pull request endpoints
        api::pull_requests::create_pull_request,
        api::pull_requests::merge_pull_request,
        api::pull_requests::reassign_reviewer,
        // Stats endpoint
        api::stats::get_stats,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            // Health
            api::health::HealthResponse,
            api::health::ReadyResponse,
            // Teams
            models::Team,
            models::TeamMember,
            models::TeamResponse,
            // Users
            models::User,
            models::UserResponse,
            models::SetIsActiveRequest,
            models::DeactivateTeamRequest,
            api::users::DeactivateTeamResponse,
            // Pull requests
            models::PrStatus,
            models::PullRequest,
            models::PullRequestShort,
            models::CreatePullRequestRequest,
            models::MergePullRequestRequest,
            models::ReassignReviewerRequest,
            models::PullRequestResponse,
            models::ReassignReviewerResponse,
            models::ReviewListResponse,
            // Stats
            models::Stats,
            models::StatsResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Teams", description = "Team creation and rosters"),
        (name = "Users", description = "User administration and review listings"),
        (name = "Pull Requests", description = "Pull request lifecycle and reviewer assignment"),
        (name = "Stats", description = "Aggregate review statistics")
    )
)]
pub struct ApiDoc;
