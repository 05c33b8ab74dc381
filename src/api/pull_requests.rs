//! Pull request API handlers.

use actix_web::{HttpResponse, post, web};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{
    CreatePullRequestRequest, MergePullRequestRequest, PullRequestResponse,
    ReassignReviewerRequest, ReassignReviewerResponse,
};
use crate::services::ReviewService;

/// Create a pull request.
///
/// The pull request opens with up to two reviewers selected from the
/// author's team roster in ascending user_id order.
#[utoipa::path(
    post,
    path = "/pullRequest/create",
    tag = "Pull Requests",
    request_body = CreatePullRequestRequest,
    responses(
        (status = 201, description = "Pull request created", body = PullRequestResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Pull request id already exists", body = crate::error::ErrorResponse),
    )
)]
#[post("/pullRequest/create")]
pub async fn create_pull_request(
    service: web::Data<ReviewService>,
    body: web::Json<CreatePullRequestRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    if req.pull_request_id.is_empty() || req.author_id.is_empty() {
        return Err(AppError::InvalidInput(
            "pull_request_id and author_id required".to_string(),
        ));
    }

    let pr = service
        .create_pr(req.pull_request_id, req.pull_request_name, req.author_id)
        .await?;

    Ok(HttpResponse::Created().json(PullRequestResponse { pr }))
}

/// Merge a pull request.
///
/// Idempotent: merging an already-merged pull request returns the stored
/// record unchanged.
#[utoipa::path(
    post,
    path = "/pullRequest/merge",
    tag = "Pull Requests",
    request_body = MergePullRequestRequest,
    responses(
        (status = 200, description = "Merged pull request", body = PullRequestResponse),
        (status = 404, description = "Pull request not found", body = crate::error::ErrorResponse),
    )
)]
#[post("/pullRequest/merge")]
pub async fn merge_pull_request(
    service: web::Data<ReviewService>,
    body: web::Json<MergePullRequestRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let pr = service.merge_pr(&req.pull_request_id).await?;

    Ok(HttpResponse::Ok().json(PullRequestResponse { pr }))
}

/// Replace a reviewer on an open pull request.
#[utoipa::path(
    post,
    path = "/pullRequest/reassign",
    tag = "Pull Requests",
    request_body = ReassignReviewerRequest,
    responses(
        (status = 200, description = "Updated pull request with replacement id", body = ReassignReviewerResponse),
        (status = 404, description = "Pull request or user not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Merged, not assigned, no candidate, or concurrent update", body = crate::error::ErrorResponse),
    )
)]
#[post("/pullRequest/reassign")]
pub async fn reassign_reviewer(
    service: web::Data<ReviewService>,
    body: web::Json<ReassignReviewerRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let (pr, replaced_by) = service
        .reassign_reviewer(&req.pull_request_id, &req.old_user_id)
        .await?;

    info!(
        pull_request_id = %pr.pull_request_id,
        replaced_by = %replaced_by,
        "Reviewer reassignment completed"
    );
    Ok(HttpResponse::Ok().json(ReassignReviewerResponse { pr, replaced_by }))
}

/// Configure pull request routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(create_pull_request)
        .service(merge_pull_request)
        .service(reassign_reviewer);
}
