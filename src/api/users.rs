//! User API handlers.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};
use crate::models::{
    DeactivateTeamRequest, PullRequestShort, ReviewListResponse, SetIsActiveRequest, User,
    UserResponse,
};
use crate::services::ReviewService;

/// Query parameters for GET /users/getReview.
#[derive(Debug, Deserialize, ToSchema)]
pub struct GetReviewQuery {
    pub user_id: String,
}

/// Response for POST /users/deactivateTeam.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeactivateTeamResponse {
    pub message: String,
}

/// Create a user directly (outside of team membership).
#[utoipa::path(
    post,
    path = "/users/add",
    tag = "Users",
    request_body = User,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
    )
)]
#[post("/users/add")]
pub async fn add_user(
    service: web::Data<ReviewService>,
    body: web::Json<User>,
) -> AppResult<HttpResponse> {
    let user = body.into_inner();
    if user.user_id.is_empty() {
        return Err(AppError::InvalidInput("user_id required".to_string()));
    }

    let created = service.create_user(user).await?;
    Ok(HttpResponse::Created().json(UserResponse { user: created }))
}

/// Toggle a user's active flag.
#[utoipa::path(
    post,
    path = "/users/setIsActive",
    tag = "Users",
    request_body = SetIsActiveRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse),
    )
)]
#[post("/users/setIsActive")]
pub async fn set_is_active(
    service: web::Data<ReviewService>,
    body: web::Json<SetIsActiveRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let user = service.set_user_active(&req.user_id, req.is_active).await?;

    info!(user_id = %user.user_id, is_active = user.is_active, "User activity toggled");
    Ok(HttpResponse::Ok().json(UserResponse { user }))
}

/// List pull requests the user is assigned to review.
#[utoipa::path(
    get,
    path = "/users/getReview",
    tag = "Users",
    params(
        ("user_id" = String, Query, description = "Reviewer user id")
    ),
    responses(
        (status = 200, description = "Assigned pull requests", body = ReviewListResponse),
        (status = 400, description = "Missing user_id", body = crate::error::ErrorResponse),
    )
)]
#[get("/users/getReview")]
pub async fn get_review(
    service: web::Data<ReviewService>,
    query: web::Query<GetReviewQuery>,
) -> AppResult<HttpResponse> {
    if query.user_id.is_empty() {
        return Err(AppError::InvalidInput("user_id required".to_string()));
    }

    let prs = service.reviews_for(&query.user_id).await?;
    let pull_requests: Vec<PullRequestShort> = prs.iter().map(PullRequestShort::from).collect();

    Ok(HttpResponse::Ok().json(ReviewListResponse {
        user_id: query.into_inner().user_id,
        pull_requests,
    }))
}

/// Deactivate every member of a team.
///
/// Best-effort bulk update: a mid-flight storage failure leaves earlier
/// members deactivated.
#[utoipa::path(
    post,
    path = "/users/deactivateTeam",
    tag = "Users",
    request_body = DeactivateTeamRequest,
    responses(
        (status = 200, description = "Team deactivated", body = DeactivateTeamResponse),
        (status = 400, description = "Missing team_name", body = crate::error::ErrorResponse),
    )
)]
#[post("/users/deactivateTeam")]
pub async fn deactivate_team(
    service: web::Data<ReviewService>,
    body: web::Json<DeactivateTeamRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    if req.team_name.is_empty() {
        return Err(AppError::InvalidInput("team_name required".to_string()));
    }

    service.deactivate_team(&req.team_name).await?;
    Ok(HttpResponse::Ok().json(DeactivateTeamResponse {
        message: "team deactivated".to_string(),
    }))
}

/// Configure user routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(add_user)
        .service(set_is_active)
        .service(get_review)
        .service(deactivate_team);
}
